//! # Symbology Selection and Symbol Images
//!
//! Picks a linear symbology for a raw code value and renders it to PNG.
//!
//! ## Symbologies
//!
//! | Format | Symbology | Input |
//! |--------|-----------|-------|
//! | [`SymbolFormat::FixedNumeric`] | EAN-13 | 12 or 13 digits (13th dropped) |
//! | [`SymbolFormat::GeneralAlphanumeric`] | Code 128 (set B) | anything else |
//!
//! ## Example
//!
//! ```
//! use shelfcode::symbol::{self, SymbolFormat};
//!
//! let spec = symbol::select("4006381333931");
//! assert_eq!(spec.format, SymbolFormat::FixedNumeric);
//! assert_eq!(spec.encoded_value, "400638133393");
//!
//! let spec = symbol::select("ABC123");
//! assert_eq!(spec.format, SymbolFormat::GeneralAlphanumeric);
//! ```

pub mod encode;
pub mod output;

pub use output::{render, render_qr};

/// Length of the EAN-13 payload without its check digit.
pub const FIXED_NUMERIC_LEN: usize = 12;

/// Linear symbol format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolFormat {
    /// EAN-13; the encoder computes the check digit
    FixedNumeric,
    /// Code 128
    GeneralAlphanumeric,
}

impl SymbolFormat {
    /// Human-readable symbology name.
    pub fn symbology(&self) -> &'static str {
        match self {
            SymbolFormat::FixedNumeric => "EAN-13",
            SymbolFormat::GeneralAlphanumeric => "Code 128",
        }
    }
}

/// What to encode and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSpec {
    pub format: SymbolFormat,
    pub encoded_value: String,
}

impl SymbolSpec {
    /// Text printed under the bars: what a scanner reads back.
    ///
    /// For EAN-13 that is the 12 encoded digits plus the check digit.
    pub fn human_readable(&self) -> String {
        match self.format {
            SymbolFormat::FixedNumeric => match ean13_check_digit(&self.encoded_value) {
                Some(check) => format!("{}{}", self.encoded_value, check),
                None => self.encoded_value.clone(),
            },
            SymbolFormat::GeneralAlphanumeric => self.encoded_value.clone(),
        }
    }
}

/// EAN-13 check digit for a 12-digit payload (weights 1, 3, 1, 3, ...).
pub fn ean13_check_digit(digits: &str) -> Option<u32> {
    if digits.len() != FIXED_NUMERIC_LEN {
        return None;
    }
    let mut sum = 0;
    for (i, c) in digits.chars().enumerate() {
        let d = c.to_digit(10)?;
        sum += if i % 2 == 0 { d } else { d * 3 };
    }
    Some((10 - sum % 10) % 10)
}

/// Choose the symbology for a raw code.
///
/// A 12- or 13-digit code becomes [`SymbolFormat::FixedNumeric`] with its
/// first 12 digits. Everything else is encoded unmodified as
/// [`SymbolFormat::GeneralAlphanumeric`]; characters Code 128 can't carry
/// surface later as encoding errors.
pub fn select(raw_code: &str) -> SymbolSpec {
    let len = raw_code.chars().count();
    let all_digits = raw_code.chars().all(|c| c.is_ascii_digit());

    if (len == FIXED_NUMERIC_LEN || len == FIXED_NUMERIC_LEN + 1) && all_digits {
        SymbolSpec {
            format: SymbolFormat::FixedNumeric,
            encoded_value: raw_code[..FIXED_NUMERIC_LEN].to_string(),
        }
    } else {
        SymbolSpec {
            format: SymbolFormat::GeneralAlphanumeric,
            encoded_value: raw_code.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_digits_unchanged() {
        let spec = select("012345678905");
        assert_eq!(spec.format, SymbolFormat::FixedNumeric);
        assert_eq!(spec.encoded_value, "012345678905");
    }

    #[test]
    fn test_thirteen_digits_truncated() {
        let spec = select("4006381333931");
        assert_eq!(spec.format, SymbolFormat::FixedNumeric);
        assert_eq!(spec.encoded_value.len(), 12);
        assert_eq!(spec.encoded_value, "400638133393");
    }

    #[test]
    fn test_alphanumeric_unchanged() {
        let spec = select("ABC123");
        assert_eq!(spec.format, SymbolFormat::GeneralAlphanumeric);
        assert_eq!(spec.encoded_value, "ABC123");
    }

    #[test]
    fn test_other_lengths_are_general() {
        for code in ["12345678901", "12345678901234", "1", "WH-2024-00017"] {
            let spec = select(code);
            assert_eq!(spec.format, SymbolFormat::GeneralAlphanumeric, "{}", code);
            assert_eq!(spec.encoded_value, code);
        }
    }

    #[test]
    fn test_twelve_chars_with_letters_are_general() {
        let spec = select("ABCDEF123456");
        assert_eq!(spec.format, SymbolFormat::GeneralAlphanumeric);
        assert_eq!(spec.encoded_value, "ABCDEF123456");
    }

    #[test]
    fn test_every_fixed_numeric_has_twelve_digits() {
        for n in 0..200u64 {
            let twelve = format!("{:012}", n * 7_919_393);
            let thirteen = format!("{:013}", n * 31_337_017);
            for code in [twelve, thirteen] {
                let spec = select(&code);
                assert_eq!(spec.format, SymbolFormat::FixedNumeric);
                assert_eq!(spec.encoded_value.len(), FIXED_NUMERIC_LEN);
                assert!(code.starts_with(&spec.encoded_value));
            }
        }
    }

    #[test]
    fn test_human_readable_includes_check_digit() {
        assert_eq!(select("012345678905").human_readable(), "0123456789050");
        assert_eq!(select("4006381333931").human_readable(), "4006381333931");
        assert_eq!(select("PALLET-7").human_readable(), "PALLET-7");
    }

    #[test]
    fn test_check_digit_rejects_bad_payloads() {
        assert_eq!(ean13_check_digit("400638133393"), Some(1));
        assert_eq!(ean13_check_digit("40063813339"), None);
        assert_eq!(ean13_check_digit("40063813339X"), None);
    }
}
