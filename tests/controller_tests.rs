// SPDX-License-Identifier: MIT

//! Integration tests for the camera view facade against a fake backend

use camera_view::{
    CameraFrame, CameraInfo, CameraPosition, CameraResult, CameraView, CaptureBackend,
    DecodeOptions, FrameDecodePipeline, FrameDisposition, PixelFormat, Point, Rect, Size,
    ThrottleConfig,
};
use std::path::Path;
use std::sync::{Arc, Mutex, Once};

/// Route log output through the test harness; filter via RUST_LOG
fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

#[derive(Default)]
struct FakeBackend {
    started: Mutex<Vec<Size>>,
    stopped: Mutex<u32>,
    recordings: Mutex<Vec<(String, Size)>>,
    focus_calls: Mutex<Vec<Rect>>,
}

impl CaptureBackend for FakeBackend {
    fn start_capture(&self, resolution: Size) -> CameraResult {
        self.started.lock().unwrap().push(resolution);
        CameraResult::Success
    }

    fn stop_capture(&self) -> CameraResult {
        *self.stopped.lock().unwrap() += 1;
        CameraResult::Success
    }

    fn start_recording(&self, path: &Path, resolution: Size) -> CameraResult {
        self.recordings
            .lock()
            .unwrap()
            .push((path.display().to_string(), resolution));
        CameraResult::Success
    }

    fn stop_recording(&self) -> CameraResult {
        CameraResult::Success
    }

    fn trigger_auto_focus(&self, region: Rect) {
        self.focus_calls.lock().unwrap().push(region);
    }
}

fn test_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .unwrap()
}

fn make_view(runtime: &tokio::runtime::Runtime) -> (CameraView, Arc<FakeBackend>) {
    init_tracing();
    let backend = Arc::new(FakeBackend::default());
    let config = ThrottleConfig {
        frame_rate_divisor: 1,
        ..ThrottleConfig::default()
    };
    let pipeline =
        FrameDecodePipeline::with_runtime(runtime.handle().clone(), config, DecodeOptions::default());
    let view = CameraView::new(Arc::clone(&backend) as Arc<dyn CaptureBackend>, pipeline);
    (view, backend)
}

fn back_camera() -> CameraInfo {
    CameraInfo {
        name: "back".into(),
        position: CameraPosition::Back,
        available_resolutions: vec![Size::new(4000.0, 3000.0), Size::new(1920.0, 1080.0)],
    }
}

#[test]
fn test_start_camera_without_selection() {
    let rt = test_runtime();
    let (view, backend) = make_view(&rt);

    assert_eq!(
        view.start_camera(Size::new(1920.0, 1080.0)),
        CameraResult::NoCameraSelected
    );
    assert!(backend.started.lock().unwrap().is_empty());
}

#[test]
fn test_start_camera_resolution_not_available() {
    let rt = test_runtime();
    let (view, backend) = make_view(&rt);
    view.set_camera(Some(back_camera()));

    assert_eq!(
        view.start_camera(Size::new(640.0, 480.0)),
        CameraResult::ResolutionNotAvailable
    );
    assert!(backend.started.lock().unwrap().is_empty());
}

#[test]
fn test_start_camera_zero_resolution_means_device_maximum() {
    // Zero resolution skips the availability check and delegates as-is.
    let rt = test_runtime();
    let (view, backend) = make_view(&rt);
    view.set_camera(Some(back_camera()));

    assert_eq!(view.start_camera(Size::ZERO), CameraResult::Success);
    assert_eq!(backend.started.lock().unwrap().as_slice(), &[Size::ZERO]);
}

#[test]
fn test_start_camera_feeds_focal_geometry() {
    let rt = test_runtime();
    let (view, _backend) = make_view(&rt);
    view.set_camera(Some(back_camera()));
    view.set_preview_size(Size::new(1000.0, 800.0));

    assert_eq!(
        view.start_camera(Size::new(4000.0, 3000.0)),
        CameraResult::Success
    );

    // Wide sensor: the focal rect's width side shrinks by the aspect ratio.
    let region = view.focal_region();
    assert!((region.capture_rect.size.width - 0.075).abs() < 1e-9);
    assert!((region.capture_rect.size.height - 0.10).abs() < 1e-9);
}

#[test]
fn test_capture_rect_change_drives_backend_auto_focus() {
    let rt = test_runtime();
    let (view, backend) = make_view(&rt);
    view.set_camera(Some(back_camera()));
    view.set_preview_size(Size::new(1000.0, 800.0));
    view.start_camera(Size::new(4000.0, 3000.0));

    let calls_after_start = backend.focus_calls.lock().unwrap().len();
    assert!(calls_after_start >= 1);

    view.set_focal_point(Point::new(0.2, 0.8));
    let calls = backend.focus_calls.lock().unwrap();
    assert_eq!(calls.len(), calls_after_start + 1);
    assert_eq!(*calls.last().unwrap(), view.focal_region().capture_rect);
}

#[test]
fn test_tap_to_focus_reaches_backend() {
    let rt = test_runtime();
    let (view, backend) = make_view(&rt);
    view.set_camera(Some(back_camera()));
    view.set_preview_size(Size::new(1000.0, 800.0));
    view.start_camera(Size::new(4000.0, 3000.0));

    let before = backend.focus_calls.lock().unwrap().len();
    view.focus_on_tap(Point::new(250.0, 600.0));
    assert_eq!(backend.focus_calls.lock().unwrap().len(), before + 1);
}

#[test]
fn test_preview_resize_does_not_retrigger_focus() {
    let rt = test_runtime();
    let (view, backend) = make_view(&rt);
    view.set_camera(Some(back_camera()));
    view.set_preview_size(Size::new(1000.0, 800.0));
    view.start_camera(Size::new(4000.0, 3000.0));

    let before = backend.focus_calls.lock().unwrap().len();
    view.set_preview_size(Size::new(500.0, 400.0));
    assert_eq!(backend.focus_calls.lock().unwrap().len(), before);
}

#[test]
fn test_frames_ignored_while_detection_disabled() {
    let rt = test_runtime();
    let (view, _backend) = make_view(&rt);

    let frame = CameraFrame::new(
        4,
        4,
        4,
        Arc::from(vec![127u8; 16].as_slice()),
        PixelFormat::Gray8,
    );
    assert_eq!(view.on_frame(frame.clone()), None);

    view.set_barcode_detection_enabled(true);
    assert_eq!(view.on_frame(frame), Some(FrameDisposition::Queued));
    view.pipeline().wait_idle();
}

#[test]
fn test_recording_lifecycle() {
    let rt = test_runtime();
    let (view, backend) = make_view(&rt);

    assert_eq!(
        view.start_recording(Path::new("/tmp/clip.mkv"), Size::ZERO),
        CameraResult::NoCameraSelected
    );

    view.set_camera(Some(back_camera()));
    assert_eq!(
        view.start_recording(Path::new("/tmp/clip.mkv"), Size::new(123.0, 456.0)),
        CameraResult::ResolutionNotAvailable
    );
    assert_eq!(
        view.start_recording(Path::new("/tmp/clip.mkv"), Size::new(1920.0, 1080.0)),
        CameraResult::Success
    );
    assert_eq!(view.stop_recording(), CameraResult::Success);

    let recordings = backend.recordings.lock().unwrap();
    assert_eq!(recordings.len(), 1);
    assert_eq!(recordings[0].0, "/tmp/clip.mkv");
}

#[test]
fn test_stop_camera_delegates() {
    let rt = test_runtime();
    let (view, backend) = make_view(&rt);
    assert_eq!(view.stop_camera(), CameraResult::Success);
    assert_eq!(*backend.stopped.lock().unwrap(), 1);
}
