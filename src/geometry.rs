// SPDX-License-Identifier: MIT

//! Coordinate transforms between preview and capture space
//!
//! The preview viewport and the camera sensor rarely share a resolution or
//! an aspect ratio, so focus targeting needs to move points and rectangles
//! between four spaces: preview pixels, capture pixels, and the ratio
//! (0.0 to 1.0) variant of each. Everything here is a pure function over
//! `f64`; no clamping happens unless explicitly requested.
//!
//! Zero-sized frames are the caller's responsibility: `ratio_of` on a size
//! with a zero dimension divides by zero. [`crate::focal`] guards this by
//! skipping recomputation entirely.

/// A width/height pair in pixels or ratio units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True iff both dimensions are zero
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// A 2D point; absolute pixels or a 0.0-1.0 ratio depending on context
///
/// Which space a point lives in is tracked by the caller, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by (dx, dy)
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Express this absolute point as a ratio of `size`
    ///
    /// Undefined for sizes with a zero dimension; callers guard.
    pub fn ratio_of(&self, size: Size) -> Point {
        Point::new(self.x / size.width, self.y / size.height)
    }

    /// Scale this ratio point back into absolute coordinates of `size`
    ///
    /// With `clamp`, each component is clamped into `[0, width]` /
    /// `[0, height]`.
    pub fn from_ratio_of(&self, size: Size, clamp: bool) -> Point {
        if clamp {
            Point::new(
                (self.x * size.width).clamp(0.0, size.width),
                (self.y * size.height).clamp(0.0, size.height),
            )
        } else {
            Point::new(self.x * size.width, self.y * size.height)
        }
    }

    /// Map an absolute preview point into capture-frame coordinates
    ///
    /// Recenters about the preview's center, scales by a single axis ratio
    /// (height when the capture frame is wider than tall, width otherwise),
    /// then re-offsets to the capture frame's center. This is the letterbox
    /// "fit" direction of the mapping pair.
    pub fn preview_to_camera(&self, preview_size: Size, camera_frame_size: Size) -> Point {
        let size_ratio = if camera_frame_size.width > camera_frame_size.height {
            camera_frame_size.height / preview_size.height
        } else {
            camera_frame_size.width / preview_size.width
        };
        let centered = self.offset(preview_size.width * -0.5, preview_size.height * -0.5);
        Point::new(centered.x * size_ratio, centered.y * size_ratio).offset(
            camera_frame_size.width * 0.5,
            camera_frame_size.height * 0.5,
        )
    }

    /// Map an absolute capture-frame point into preview coordinates
    ///
    /// The preview renders the capture stream aspect-filled (scaled to cover,
    /// cropping the overflow), so the scale is the larger of the two axis
    /// ratios. Points inside the cropped-away band map outside the preview.
    pub fn camera_to_preview(&self, camera_frame_size: Size, preview_size: Size) -> Point {
        let width_ratio = preview_size.width / camera_frame_size.width;
        let height_ratio = preview_size.height / camera_frame_size.height;
        let size_ratio = width_ratio.max(height_ratio);

        let centered = self.offset(
            camera_frame_size.width * -0.5,
            camera_frame_size.height * -0.5,
        );
        Point::new(centered.x * size_ratio, centered.y * size_ratio)
            .offset(preview_size.width * 0.5, preview_size.height * 0.5)
    }
}

/// An origin plus a size; may carry negative dimensions when reconstructed
/// from corners that crossed during a mapping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Reconstruct a rect from two opposite corners
    pub fn from_corners(top_left: Point, bottom_right: Point) -> Self {
        Self {
            origin: top_left,
            size: Size::new(bottom_right.x - top_left.x, bottom_right.y - top_left.y),
        }
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.origin.x + self.size.width, self.origin.y + self.size.height)
    }

    /// Express this rect as a ratio of `size`
    ///
    /// Both corners go through [`Point::ratio_of`] and the rect is rebuilt
    /// from the transformed corners. Scaling width/height directly would be
    /// wrong for rects with a non-zero origin.
    pub fn ratio_of(&self, size: Size) -> Rect {
        let top_left = self.origin.ratio_of(size);
        let bottom_right = self.bottom_right().ratio_of(size);
        Rect::from_corners(top_left, bottom_right)
    }

    /// Scale this ratio rect back into absolute coordinates of `size`
    pub fn from_ratio_of(&self, size: Size, clamp: bool) -> Rect {
        let top_left = self.origin.from_ratio_of(size, clamp);
        let bottom_right = self.bottom_right().from_ratio_of(size, clamp);
        Rect::from_corners(top_left, bottom_right)
    }

    /// Build a ratio-space rect of side `focal_size` centered at `center`
    ///
    /// The non-dominant axis is scaled by the frame's aspect ratio so the
    /// rect appears square once the frame is rendered aspect-corrected.
    /// A zero frame size yields `focal_size` on both sides.
    pub fn centered_ratio(center: Point, frame_size: Size, focal_size: f64) -> Rect {
        let size = if frame_size.is_zero() {
            Size::new(focal_size, focal_size)
        } else if frame_size.width > frame_size.height {
            Size::new(frame_size.height / frame_size.width * focal_size, focal_size)
        } else {
            Size::new(focal_size, frame_size.width / frame_size.height * focal_size)
        };
        Rect::new(
            Point::new(center.x - size.width * 0.5, center.y - size.height * 0.5),
            size,
        )
    }
}
