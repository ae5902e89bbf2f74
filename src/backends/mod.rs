// SPDX-License-Identifier: MIT

//! Capture backend abstraction
//!
//! The core never talks to a platform camera API directly. Lifecycle,
//! recording, and the auto-focus trigger all go through the
//! [`CaptureBackend`] trait, with concrete per-platform implementations
//! selected at composition time. Frames flow the other way: the backend's
//! capture thread pushes [`types::CameraFrame`]s into
//! [`crate::CameraView::on_frame`].
//!
//! Lifecycle operations report a [`CameraResult`](crate::errors::CameraResult)
//! code rather than an error; the core treats these as opaque outcomes it
//! does not retry.

pub mod types;

pub use types::{CameraFrame, CameraInfo, CameraPosition, PixelFormat};

use crate::errors::CameraResult;
use crate::geometry::{Rect, Size};
use std::path::Path;

/// Platform camera backend port
///
/// Implementations are expected to be cheap to share (`Arc<dyn
/// CaptureBackend>`) and callable from any thread.
pub trait CaptureBackend: Send + Sync {
    /// Start the capture stream at `resolution`; a zero resolution means
    /// "pick the maximum the device offers"
    fn start_capture(&self, resolution: Size) -> CameraResult;

    /// Stop the capture stream
    fn stop_capture(&self) -> CameraResult;

    /// Start recording video to `path` at `resolution`
    fn start_recording(&self, path: &Path, resolution: Size) -> CameraResult;

    /// Stop an active recording
    fn stop_recording(&self) -> CameraResult;

    /// Drive auto-focus at `region`, a ratio rect of the capture frame
    fn trigger_auto_focus(&self, region: Rect);
}
