// SPDX-License-Identifier: MIT

//! Barcode decoding over a luma plane
//!
//! [`FrameDecoder`] is the seam between the pipeline's throttling logic and
//! the actual reader, so tests can substitute a deterministic decoder. The
//! production implementation wraps rxing's multi-format reader.

use crate::decode::luminance::LumaImage;
use crate::decode::options::{DecodeOptions, DecodeResult};
use rxing::common::HybridBinarizer;
use rxing::multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};
use rxing::{BinaryBitmap, Luma8LuminanceSource, MultiFormatReader, Reader};
use tracing::trace;

/// Decodes one luma plane into zero or more results
///
/// Implementations never fail: anything that prevents recognition resolves
/// to an empty result set.
pub trait FrameDecoder: Send + Sync {
    fn decode(&self, luma: LumaImage, options: &DecodeOptions) -> Vec<DecodeResult>;
}

/// rxing-backed decoder
///
/// Stateless; readers are built per call, matching how decodes run as
/// independent parallel tasks.
#[derive(Debug, Default)]
pub struct RxingDecoder;

impl FrameDecoder for RxingDecoder {
    fn decode(&self, luma: LumaImage, options: &DecodeOptions) -> Vec<DecodeResult> {
        let source = Luma8LuminanceSource::new(luma.data, luma.width, luma.height);
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));
        let hints = options.to_hints();

        if options.multi_scan {
            let mut reader = GenericMultipleBarcodeReader::new(MultiFormatReader::default());
            match reader.decode_multiple_with_hints(&mut bitmap, &hints) {
                Ok(results) => results.into_iter().map(DecodeResult::from).collect(),
                Err(err) => {
                    trace!(error = %err, "Multi-scan decode found nothing");
                    Vec::new()
                }
            }
        } else {
            let mut reader = MultiFormatReader::default();
            match reader.decode_with_hints(&mut bitmap, &hints) {
                Ok(result) => vec![DecodeResult::from(result)],
                Err(err) => {
                    trace!(error = %err, "Decode found nothing");
                    Vec::new()
                }
            }
        }
    }
}
