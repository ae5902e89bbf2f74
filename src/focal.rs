// SPDX-License-Identifier: MIT

//! Focal region derivation and auto-focus triggering
//!
//! A user picks a focal point (as a ratio of the capture sensor) and a focal
//! size; the calculator turns those plus the current capture and preview
//! geometry into two rectangles:
//!
//! - the capture-space ratio rect handed to the camera backend to drive
//!   auto-focus, and
//! - the preview-space ratio rect used to render a focus reticle.
//!
//! Both are derived state: every input setter recomputes them synchronously.
//! The focus sink is an injected closure rather than a global handle so
//! multiple controls stay independently testable.

use crate::geometry::{Point, Rect, Size};
use tracing::{debug, trace};

/// Focus sink invoked with the capture-space rect whenever it changes
pub type FocusSink = Box<dyn Fn(Rect) + Send + Sync>;

/// User-chosen focus target, relative to the capture sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalSpec {
    /// Focal point as a ratio of the capture frame (0.0 to 1.0 per axis)
    pub point: Point,
    /// Focus region side as a ratio of the capture frame's short axis
    pub size: f64,
}

impl Default for FocalSpec {
    fn default() -> Self {
        Self {
            point: Point::new(0.5, 0.5),
            size: 0.10,
        }
    }
}

/// Capture and preview dimensions the focal region depends on
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaptureGeometry {
    /// Resolution requested when the camera was started
    pub desired_capture_resolution: Size,
    /// Resolution the capture stream actually negotiated
    pub actual_capture_resolution: Size,
    /// Current preview viewport size in pixels
    pub preview_size: Size,
}

impl CaptureGeometry {
    /// The capture size transforms run against: the negotiated resolution
    /// when known, the requested one otherwise
    pub fn effective_capture_size(&self) -> Size {
        if self.actual_capture_resolution.is_zero() {
            self.desired_capture_resolution
        } else {
            self.actual_capture_resolution
        }
    }
}

/// The derived rect pair; read-only to consumers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocalRegion {
    /// Focus rect as a ratio of the capture frame
    pub capture_rect: Rect,
    /// Focus rect as a ratio of the preview viewport; dimensions may be
    /// negative when the capture region falls outside the preview crop
    pub preview_rect: Rect,
}

/// Recomputes [`FocalRegion`] on input changes and pushes capture-rect
/// changes to the focus sink
pub struct FocalRegionCalculator {
    spec: FocalSpec,
    geometry: CaptureGeometry,
    region: FocalRegion,
    focus_sink: Option<FocusSink>,
}

impl Default for FocalRegionCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl FocalRegionCalculator {
    pub fn new() -> Self {
        Self {
            spec: FocalSpec::default(),
            geometry: CaptureGeometry::default(),
            region: FocalRegion::default(),
            focus_sink: None,
        }
    }

    /// Install the sink invoked whenever the capture rect changes
    pub fn set_focus_sink(&mut self, sink: FocusSink) {
        self.focus_sink = Some(sink);
    }

    pub fn spec(&self) -> FocalSpec {
        self.spec
    }

    pub fn geometry(&self) -> CaptureGeometry {
        self.geometry
    }

    /// The current derived region
    pub fn region(&self) -> FocalRegion {
        self.region
    }

    pub fn set_focal_point(&mut self, point: Point) {
        self.spec.point = point;
        self.recompute();
    }

    pub fn set_focal_size(&mut self, size: f64) {
        self.spec.size = size;
        self.recompute();
    }

    pub fn set_desired_capture_resolution(&mut self, resolution: Size) {
        self.geometry.desired_capture_resolution = resolution;
        self.recompute();
    }

    pub fn set_actual_capture_resolution(&mut self, resolution: Size) {
        self.geometry.actual_capture_resolution = resolution;
        self.recompute();
    }

    pub fn set_preview_size(&mut self, size: Size) {
        self.geometry.preview_size = size;
        self.recompute();
    }

    /// Move the focal point to an absolute preview-pixel tap position
    ///
    /// The tap maps into capture-frame pixels and then to a ratio of the
    /// effective capture size. Ignored while the capture size is unknown.
    pub fn focus_on_tap(&mut self, tap: Point) {
        let capture_size = self.geometry.effective_capture_size();
        if capture_size.is_zero() {
            return;
        }

        let point = tap
            .preview_to_camera(self.geometry.preview_size, capture_size)
            .ratio_of(capture_size);
        debug!(x = point.x, y = point.y, "Focal point set from tap");
        self.set_focal_point(point);
    }

    /// Derive the region from the current spec and geometry
    ///
    /// Retains the previous region while either the effective capture size
    /// or the preview size is zero; auto-focus cannot be computed without
    /// both. Fires the focus sink only when the capture rect changed, so a
    /// preview-size-only change never re-triggers focus.
    fn recompute(&mut self) {
        let capture_size = self.geometry.effective_capture_size();
        if capture_size.is_zero() {
            return;
        }
        let preview_size = self.geometry.preview_size;
        if preview_size.is_zero() {
            return;
        }

        let capture_rect = Rect::centered_ratio(self.spec.point, capture_size, self.spec.size);

        // Map each corner independently: ratio of capture -> capture pixels
        // -> preview pixels (aspect-fill) -> ratio of preview.
        let top_left = capture_rect
            .origin
            .from_ratio_of(capture_size, false)
            .camera_to_preview(capture_size, preview_size)
            .ratio_of(preview_size);
        let bottom_right = capture_rect
            .bottom_right()
            .from_ratio_of(capture_size, false)
            .camera_to_preview(capture_size, preview_size)
            .ratio_of(preview_size);
        let preview_rect = Rect::from_corners(top_left, bottom_right);

        let capture_changed = capture_rect != self.region.capture_rect;
        self.region = FocalRegion {
            capture_rect,
            preview_rect,
        };

        if capture_changed {
            trace!(
                x = capture_rect.origin.x,
                y = capture_rect.origin.y,
                width = capture_rect.size.width,
                height = capture_rect.size.height,
                "Capture focus rect changed, triggering auto-focus"
            );
            if let Some(sink) = &self.focus_sink {
                sink(capture_rect);
            }
        }
    }
}
