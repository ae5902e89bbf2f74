// SPDX-License-Identifier: MIT

//! Barcode recognition over the live frame stream
//!
//! Raw frames convert to a luminance plane ([`luminance`]), decode through
//! a [`decoder::FrameDecoder`], and flow through the throttled, deduplicated
//! [`pipeline::FrameDecodePipeline`].

pub mod decoder;
pub mod luminance;
pub mod options;
pub mod pipeline;

pub use decoder::{FrameDecoder, RxingDecoder};
pub use luminance::LumaImage;
pub use options::{DecodeOptions, DecodeResult};
pub use pipeline::{FrameDecodePipeline, FrameDisposition, ThrottleConfig};
