// SPDX-License-Identifier: MIT

//! Shared types crossing the capture backend boundary

use crate::geometry::Size;
use std::sync::Arc;
use std::time::Instant;

/// Pixel layout of a raw frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit RGBA, 4 bytes per pixel
    Rgba,
    /// NV12: full-resolution Y plane followed by interleaved half-res UV
    Nv12,
    /// Single 8-bit luminance plane
    Gray8,
}

/// A raw video frame delivered by the capture backend
///
/// `data` is shared, not copied: decode tasks hold a reference while the
/// capture loop moves on to the next frame. Rows may carry stride padding
/// beyond `width` pixels.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Bytes per row including any padding
    pub stride: u32,
    pub data: Arc<[u8]>,
    pub format: PixelFormat,
    pub captured_at: Instant,
}

impl CameraFrame {
    pub fn new(width: u32, height: u32, stride: u32, data: Arc<[u8]>, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            stride,
            data,
            format,
            captured_at: Instant::now(),
        }
    }

    /// Frame dimensions as a geometry [`Size`]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Physical placement of a camera on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPosition {
    #[default]
    Unknown,
    Front,
    Back,
    External,
}

/// A camera device as reported by the backend
#[derive(Debug, Clone, Default)]
pub struct CameraInfo {
    pub name: String,
    pub position: CameraPosition,
    /// Capture resolutions the device offers
    pub available_resolutions: Vec<Size>,
}

impl CameraInfo {
    /// Whether the device offers exactly this capture resolution
    pub fn supports_resolution(&self, resolution: Size) -> bool {
        self.available_resolutions
            .iter()
            .any(|r| r.width == resolution.width && r.height == resolution.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_resolution() {
        let info = CameraInfo {
            name: "test".into(),
            position: CameraPosition::Back,
            available_resolutions: vec![Size::new(1920.0, 1080.0), Size::new(1280.0, 720.0)],
        };
        assert!(info.supports_resolution(Size::new(1280.0, 720.0)));
        assert!(!info.supports_resolution(Size::new(640.0, 480.0)));
    }

    #[test]
    fn test_frame_size() {
        let frame = CameraFrame::new(640, 480, 2560, Arc::from(vec![0u8; 0].as_slice()), PixelFormat::Rgba);
        assert_eq!(frame.size(), Size::new(640.0, 480.0));
    }
}
