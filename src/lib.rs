// SPDX-License-Identifier: MIT

//! camera-view - live camera preview core with focus targeting and barcode
//! recognition
//!
//! This library implements the engine behind a reusable camera UI control:
//! mapping a preview viewport onto the camera sensor to drive auto-focus,
//! and sampling the live frame stream for barcodes under a bounded
//! concurrency budget.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`geometry`]: Pure coordinate transforms between preview and capture space
//! - [`focal`]: Focal region derivation and auto-focus triggering
//! - [`decode`]: Luminance conversion and the throttled decode pipeline
//! - [`backends`]: The `CaptureBackend` port and frame types
//! - [`controller`]: The `CameraView` facade tying the pieces together
//!
//! # Example
//!
//! ```ignore
//! let pipeline = FrameDecodePipeline::new(ThrottleConfig::default(), DecodeOptions::default())?;
//! let view = CameraView::new(backend, pipeline);
//! view.subscribe_barcodes(|results| println!("scanned: {}", results[0].text));
//! view.set_barcode_detection_enabled(true);
//! // the backend's capture thread calls view.on_frame(frame) per frame
//! ```

pub mod backends;
pub mod controller;
pub mod decode;
pub mod errors;
pub mod focal;
pub mod geometry;

// Re-export commonly used types
pub use backends::{CameraFrame, CameraInfo, CameraPosition, CaptureBackend, PixelFormat};
pub use controller::CameraView;
pub use decode::{
    DecodeOptions, DecodeResult, FrameDecodePipeline, FrameDisposition, ThrottleConfig,
};
pub use errors::{CameraResult, PipelineError};
pub use focal::{CaptureGeometry, FocalRegion, FocalRegionCalculator, FocalSpec};
pub use geometry::{Point, Rect, Size};
pub use rxing::BarcodeFormat;
