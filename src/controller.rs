// SPDX-License-Identifier: MIT

//! Camera view facade
//!
//! [`CameraView`] is the composition point of the crate: it owns the focal
//! region calculator and the decode pipeline, talks to the platform through
//! an injected [`CaptureBackend`], and exposes the lifecycle operations of
//! the control. There is no global "current view"; create as many instances
//! as there are controls and inject each one where it is needed.

use crate::backends::types::{CameraFrame, CameraInfo};
use crate::backends::CaptureBackend;
use crate::decode::{DecodeOptions, DecodeResult, FrameDecodePipeline, FrameDisposition};
use crate::errors::CameraResult;
use crate::focal::{FocalRegion, FocalRegionCalculator};
use crate::geometry::{Point, Size};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Live camera control core: lifecycle, focus targeting, barcode events
pub struct CameraView {
    backend: Arc<dyn CaptureBackend>,
    camera: Mutex<Option<CameraInfo>>,
    focal: Mutex<FocalRegionCalculator>,
    pipeline: FrameDecodePipeline,
    barcode_detection_enabled: AtomicBool,
}

impl CameraView {
    /// Build a view over `backend`, wiring capture-rect changes to the
    /// backend's auto-focus trigger
    pub fn new(backend: Arc<dyn CaptureBackend>, pipeline: FrameDecodePipeline) -> Self {
        let mut focal = FocalRegionCalculator::new();
        let focus_backend = Arc::clone(&backend);
        focal.set_focus_sink(Box::new(move |rect| {
            focus_backend.trigger_auto_focus(rect);
        }));

        Self {
            backend,
            camera: Mutex::new(None),
            focal: Mutex::new(focal),
            pipeline,
            barcode_detection_enabled: AtomicBool::new(false),
        }
    }

    /// Select the camera device used by subsequent lifecycle calls
    pub fn set_camera(&self, camera: Option<CameraInfo>) {
        *self.camera.lock().unwrap() = camera;
    }

    /// Start the capture stream
    ///
    /// A zero `resolution` requests the device maximum. Returns
    /// `NoCameraSelected` without a selected camera and
    /// `ResolutionNotAvailable` when the camera does not offer the requested
    /// resolution. On success the desired capture resolution feeds the focal
    /// region and stale barcode results are forgotten.
    pub fn start_camera(&self, resolution: Size) -> CameraResult {
        let camera = self.camera.lock().unwrap();
        let Some(camera) = camera.as_ref() else {
            return CameraResult::NoCameraSelected;
        };
        if resolution.width != 0.0
            && resolution.height != 0.0
            && !camera.supports_resolution(resolution)
        {
            return CameraResult::ResolutionNotAvailable;
        }

        info!(camera = %camera.name, width = resolution.width, height = resolution.height, "Starting camera");
        let result = self.backend.start_capture(resolution);
        if result.is_success() {
            self.focal
                .lock()
                .unwrap()
                .set_desired_capture_resolution(resolution);
            self.pipeline.clear_results();
        }
        result
    }

    /// Stop the capture stream
    pub fn stop_camera(&self) -> CameraResult {
        info!("Stopping camera");
        self.backend.stop_capture()
    }

    /// Start recording video to `path`
    pub fn start_recording(&self, path: &Path, resolution: Size) -> CameraResult {
        let camera = self.camera.lock().unwrap();
        let Some(camera) = camera.as_ref() else {
            return CameraResult::NoCameraSelected;
        };
        if resolution.width != 0.0
            && resolution.height != 0.0
            && !camera.supports_resolution(resolution)
        {
            return CameraResult::ResolutionNotAvailable;
        }

        info!(camera = %camera.name, path = %path.display(), "Starting recording");
        let result = self.backend.start_recording(path, resolution);
        if result.is_success() {
            self.pipeline.clear_results();
        }
        result
    }

    /// Stop an active recording
    pub fn stop_recording(&self) -> CameraResult {
        info!("Stopping recording");
        self.backend.stop_recording()
    }

    /// Re-trigger auto-focus at the current capture rect
    pub fn force_auto_focus(&self) {
        let region = self.focal_region();
        self.backend.trigger_auto_focus(region.capture_rect);
    }

    /// The current derived focus rectangles
    pub fn focal_region(&self) -> FocalRegion {
        self.focal.lock().unwrap().region()
    }

    pub fn set_focal_point(&self, point: Point) {
        self.focal.lock().unwrap().set_focal_point(point);
    }

    pub fn set_focal_size(&self, size: f64) {
        self.focal.lock().unwrap().set_focal_size(size);
    }

    /// Move the focal point to an absolute preview-pixel tap position
    pub fn focus_on_tap(&self, tap: Point) {
        self.focal.lock().unwrap().focus_on_tap(tap);
    }

    /// Report the preview viewport size (on layout changes)
    pub fn set_preview_size(&self, size: Size) {
        self.focal.lock().unwrap().set_preview_size(size);
    }

    /// Report the resolution the capture stream actually negotiated
    pub fn set_actual_capture_resolution(&self, resolution: Size) {
        self.focal
            .lock()
            .unwrap()
            .set_actual_capture_resolution(resolution);
    }

    /// Toggle barcode detection over incoming frames
    pub fn set_barcode_detection_enabled(&self, enabled: bool) {
        debug!(enabled, "Barcode detection toggled");
        self.barcode_detection_enabled
            .store(enabled, Ordering::SeqCst);
    }

    pub fn barcode_detection_enabled(&self) -> bool {
        self.barcode_detection_enabled.load(Ordering::SeqCst)
    }

    /// Replace the decode options for subsequent frames
    pub fn set_decode_options(&self, options: DecodeOptions) {
        self.pipeline.set_options(options);
    }

    /// Register an observer for non-duplicate barcode result sets
    ///
    /// Observers run on the decode task's thread; marshal to your own
    /// execution context as needed.
    pub fn subscribe_barcodes(&self, observer: impl Fn(&[DecodeResult]) + Send + Sync + 'static) {
        self.pipeline.subscribe(observer);
    }

    /// The last emitted barcode result set
    pub fn last_barcode_results(&self) -> Option<Vec<DecodeResult>> {
        self.pipeline.last_results()
    }

    /// Ingest a frame from the capture backend
    ///
    /// Returns `None` while barcode detection is disabled, otherwise the
    /// pipeline's admission disposition.
    pub fn on_frame(&self, frame: CameraFrame) -> Option<FrameDisposition> {
        if !self.barcode_detection_enabled() {
            return None;
        }
        Some(self.pipeline.process_frame(frame))
    }

    /// Access the decode pipeline (e.g. for `wait_idle` during teardown)
    pub fn pipeline(&self) -> &FrameDecodePipeline {
        &self.pipeline
    }
}
