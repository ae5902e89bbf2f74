// SPDX-License-Identifier: MIT

//! Barcode decode options and results

use rxing::{BarcodeFormat, DecodeHintType, DecodeHintValue, DecodingHintDictionary, RXingResult};
use std::collections::HashSet;

/// Options forwarded to the barcode reader
///
/// These map onto rxing decode hints. An empty `possible_formats` set leaves
/// the reader free to try every format it knows.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Character set used to decode byte segments (empty = reader default)
    pub character_set: String,
    /// Symbol formats the reader should attempt
    pub possible_formats: HashSet<BarcodeFormat>,
    /// Spend more time searching for a symbol
    pub try_harder: bool,
    /// Also try the inverted image
    pub try_inverted: bool,
    /// The image is a pure barcode with no surrounding scene
    pub pure_barcode: bool,
    /// Look for several symbols per frame instead of the first one
    pub multi_scan: bool,
}

impl DecodeOptions {
    pub(crate) fn to_hints(&self) -> DecodingHintDictionary {
        let mut hints = DecodingHintDictionary::new();
        if !self.character_set.is_empty() {
            hints.insert(
                DecodeHintType::CHARACTER_SET,
                DecodeHintValue::CharacterSet(self.character_set.clone()),
            );
        }
        if !self.possible_formats.is_empty() {
            hints.insert(
                DecodeHintType::POSSIBLE_FORMATS,
                DecodeHintValue::PossibleFormats(self.possible_formats.clone()),
            );
        }
        if self.try_harder {
            hints.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
        }
        if self.try_inverted {
            hints.insert(
                DecodeHintType::ALSO_INVERTED,
                DecodeHintValue::AlsoInverted(true),
            );
        }
        if self.pure_barcode {
            hints.insert(
                DecodeHintType::PURE_BARCODE,
                DecodeHintValue::PureBarcode(true),
            );
        }
        hints
    }
}

/// One recognized symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodeResult {
    /// Decoded text content
    pub text: String,
    /// Symbol format the reader recognized
    pub format: BarcodeFormat,
}

impl DecodeResult {
    pub fn new(text: impl Into<String>, format: BarcodeFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

impl From<RXingResult> for DecodeResult {
    fn from(result: RXingResult) -> Self {
        Self {
            text: result.getText().to_owned(),
            format: result.getBarcodeFormat().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_produce_no_hints() {
        let hints = DecodeOptions::default().to_hints();
        assert!(hints.is_empty());
    }

    #[test]
    fn test_flags_map_to_hints() {
        let options = DecodeOptions {
            character_set: "UTF-8".into(),
            possible_formats: [BarcodeFormat::QR_CODE, BarcodeFormat::EAN_13]
                .into_iter()
                .collect(),
            try_harder: true,
            try_inverted: true,
            pure_barcode: true,
            multi_scan: false,
        };
        let hints = options.to_hints();
        assert!(hints.contains_key(&DecodeHintType::CHARACTER_SET));
        assert!(hints.contains_key(&DecodeHintType::POSSIBLE_FORMATS));
        assert!(hints.contains_key(&DecodeHintType::TRY_HARDER));
        assert!(hints.contains_key(&DecodeHintType::ALSO_INVERTED));
        assert!(hints.contains_key(&DecodeHintType::PURE_BARCODE));
    }

    #[test]
    fn test_result_equality_is_text_and_format() {
        let a = DecodeResult::new("hello", BarcodeFormat::QR_CODE);
        let b = DecodeResult::new("hello", BarcodeFormat::QR_CODE);
        let c = DecodeResult::new("hello", BarcodeFormat::CODE_128);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
