//! Linear barcode module encoding.
//!
//! Uses the barcoders crate for EAN-13 and Code 128 encoding.
//! Returns one `bool` per module: true = bar (black), false = space (white).

use barcoders::sym::code128::Code128;
use barcoders::sym::ean13::EAN13;

use super::{SymbolFormat, SymbolSpec};
use crate::error::ShelfError;

/// Code 128 character set B selector, prepended to every payload.
///
/// Set B covers printable ASCII (upper and lower case, digits, punctuation),
/// which is the widest single set for free-form warehouse codes.
const CODE128_SET_B: char = '\u{0181}';

/// Encode a symbol spec into its module sequence.
pub fn encode(spec: &SymbolSpec) -> Result<Vec<bool>, ShelfError> {
    if spec.encoded_value.is_empty() {
        return Err(ShelfError::Encoding("cannot encode an empty code".to_string()));
    }
    match spec.format {
        SymbolFormat::FixedNumeric => encode_ean13(&spec.encoded_value),
        SymbolFormat::GeneralAlphanumeric => encode_code128(&spec.encoded_value),
    }
}

/// Encode 12 digits as EAN-13; the check digit is computed here.
pub fn encode_ean13(data: &str) -> Result<Vec<bool>, ShelfError> {
    let barcode = EAN13::new(data).map_err(|e| {
        ShelfError::Encoding(format!("EAN-13 rejected '{}': {:?}", data, e))
    })?;
    Ok(to_modules(&barcode.encode()))
}

/// Encode free-form text as Code 128 using character set B.
pub fn encode_code128(data: &str) -> Result<Vec<bool>, ShelfError> {
    if data.chars().any(|c| !(' '..='~').contains(&c)) {
        return Err(ShelfError::Encoding(format!(
            "Code 128 set B cannot carry '{}': only printable ASCII is allowed",
            data
        )));
    }

    let prefixed_data = format!("{}{}", CODE128_SET_B, data);
    let barcode = Code128::new(&prefixed_data).map_err(|e| {
        ShelfError::Encoding(format!("Code 128 rejected '{}': {:?}", data, e))
    })?;
    Ok(to_modules(&barcode.encode()))
}

fn to_modules(encoded: &[u8]) -> Vec<bool> {
    encoded.iter().map(|&module| module == 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::select;

    #[test]
    fn test_ean13_encoding() {
        let bars = encode_ean13("012345678905").unwrap();
        // 3 + 6*7 + 5 + 6*7 + 3 modules
        assert_eq!(bars.len(), 95);
        assert_eq!(&bars[..3], &[true, false, true]);
        assert_eq!(&bars[92..], &[true, false, true]);
    }

    #[test]
    fn test_ean13_rejects_letters() {
        let err = encode_ean13("01234567890A").unwrap_err();
        assert!(matches!(err, ShelfError::Encoding(_)));
    }

    #[test]
    fn test_code128_encoding() {
        let bars = encode_code128("ABC123").unwrap();
        assert!(!bars.is_empty());
        assert!(bars[0], "Code 128 starts with a bar");
    }

    #[test]
    fn test_code128_rejects_non_ascii() {
        let err = encode_code128("CAFÉ-01").unwrap_err();
        assert!(matches!(err, ShelfError::Encoding(_)));
        assert!(encode_code128("tab\there").is_err());
    }

    #[test]
    fn test_encode_dispatches_on_format() {
        assert_eq!(encode(&select("4006381333931")).unwrap().len(), 95);
        assert!(encode(&select("WH-17")).is_ok());
        assert!(encode(&select("")).is_err());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let spec = select("PALLET-0042");
        assert_eq!(encode(&spec).unwrap(), encode(&spec).unwrap());
    }
}
