// SPDX-License-Identifier: MIT

//! Frame buffer to luminance plane conversion
//!
//! Barcode readers work on a single grayscale plane. This module turns the
//! backend's raw frame buffers into a tightly packed luma image, stripping
//! any row stride padding along the way.

use crate::backends::types::{CameraFrame, PixelFormat};
use tracing::debug;

/// A tightly packed 8-bit luminance plane
#[derive(Debug, Clone)]
pub struct LumaImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Convert a raw camera frame into a luma plane
///
/// Returns `None` when the buffer is shorter than its declared geometry;
/// the pipeline treats that the same as a frame with no symbol in it.
pub fn luma_from_frame(frame: &CameraFrame) -> Option<LumaImage> {
    match frame.format {
        PixelFormat::Rgba => rgba_to_luma(frame),
        // NV12 leads with a full-resolution Y plane, which is already the
        // luminance we need; the trailing UV half is ignored.
        PixelFormat::Nv12 | PixelFormat::Gray8 => copy_luma_rows(frame, 1),
    }
}

fn rgba_to_luma(frame: &CameraFrame) -> Option<LumaImage> {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let stride = frame.stride as usize;

    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        let row_start = y * stride;
        let row_end = row_start + width * 4;
        let row = match frame.data.get(row_start..row_end) {
            Some(row) => row,
            None => {
                debug!(
                    len = frame.data.len(),
                    width, height, stride, "RGBA buffer shorter than frame geometry"
                );
                return None;
            }
        };
        for pixel in row.chunks_exact(4) {
            // Integer BT.601 luma weights
            let luma = (77 * u32::from(pixel[0])
                + 150 * u32::from(pixel[1])
                + 29 * u32::from(pixel[2]))
                >> 8;
            data.push(luma as u8);
        }
    }

    Some(LumaImage {
        data,
        width: frame.width,
        height: frame.height,
    })
}

/// Copy `width` luma bytes per row, dropping stride padding
fn copy_luma_rows(frame: &CameraFrame, bytes_per_pixel: usize) -> Option<LumaImage> {
    let width = frame.width as usize * bytes_per_pixel;
    let height = frame.height as usize;
    let stride = frame.stride as usize;

    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        let row_start = y * stride;
        let row = match frame.data.get(row_start..row_start + width) {
            Some(row) => row,
            None => {
                debug!(
                    len = frame.data.len(),
                    width, height, stride, "Luma buffer shorter than frame geometry"
                );
                return None;
            }
        };
        data.extend_from_slice(row);
    }

    Some(LumaImage {
        data,
        width: frame.width,
        height: frame.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_gray8_strips_stride_padding() {
        // 2x2 gray frame with 2 padding bytes per row
        let data: Vec<u8> = vec![10, 20, 0, 0, 30, 40, 0, 0];
        let frame = CameraFrame::new(2, 2, 4, Arc::from(data.as_slice()), PixelFormat::Gray8);

        let luma = luma_from_frame(&frame).unwrap();
        assert_eq!(luma.data, vec![10, 20, 30, 40]);
        assert_eq!(luma.width, 2);
        assert_eq!(luma.height, 2);
    }

    #[test]
    fn test_nv12_uses_y_plane_only() {
        // 2x2 NV12: 4 Y bytes then 2 UV bytes; the UV tail must not land in
        // the luma output.
        let data: Vec<u8> = vec![1, 2, 3, 4, 128, 128];
        let frame = CameraFrame::new(2, 2, 2, Arc::from(data.as_slice()), PixelFormat::Nv12);

        let luma = luma_from_frame(&frame).unwrap();
        assert_eq!(luma.data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_rgba_grayscale_extremes() {
        // One white and one black pixel
        let data: Vec<u8> = vec![255, 255, 255, 255, 0, 0, 0, 255];
        let frame = CameraFrame::new(2, 1, 8, Arc::from(data.as_slice()), PixelFormat::Rgba);

        let luma = luma_from_frame(&frame).unwrap();
        assert!(luma.data[0] > 250);
        assert_eq!(luma.data[1], 0);
    }

    #[test]
    fn test_rgba_respects_stride() {
        let data: Vec<u8> = vec![
            100, 100, 100, 255, 200, 200, 200, 255, 0, 0, // padding
            50, 50, 50, 255, 150, 150, 150, 255, 0, 0, // padding
        ];
        let frame = CameraFrame::new(2, 2, 10, Arc::from(data.as_slice()), PixelFormat::Rgba);

        let luma = luma_from_frame(&frame).unwrap();
        assert_eq!(luma.data.len(), 4);
        // Equal RGB components: luma stays at the component value
        assert_eq!(luma.data[0], 100);
        assert_eq!(luma.data[3], 150);
    }

    #[test]
    fn test_short_buffer_yields_none() {
        let data: Vec<u8> = vec![0; 8];
        let frame = CameraFrame::new(4, 4, 4, Arc::from(data.as_slice()), PixelFormat::Gray8);
        assert!(luma_from_frame(&frame).is_none());
    }
}
