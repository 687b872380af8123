//! Field-level wire codec.
//!
//! Encode/decode primitives for the individual record fields, parametrized
//! by the layout in [`crate::schema`]. The whole-record codec in
//! [`crate::header`] composes these; the raw accessors at the bottom let
//! repair tooling rewrite a single field without re-encoding the record.
//!
//! Decoding is tolerant by design: a field that cannot be decoded yields its
//! documented default (empty text, "no value", "no date", zero) instead of
//! an error. Encoding is authoritative: output is always exactly the field's
//! declared size.

use bstr::BString;

use crate::date::SauceDate;
use crate::schema::{RECORD_LEN, SauceField};
use crate::util::{replace_field, sauce_pad, sauce_trim, zero_pad};
use crate::{SauceError, limits};

/// Decode a space-padded text field.
///
/// The value ends at the first NUL byte (rogue writers zero-pad these
/// fields); trailing blanks and NULs are trimmed off what remains.
pub fn decode_text(bytes: &[u8]) -> BString {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    sauce_trim(&bytes[..end])
}

/// Encode text into a space-padded field of exactly `len` bytes.
pub fn encode_text(value: &BString, len: usize) -> Vec<u8> {
    sauce_pad(value, len)
}

/// Decode a NUL-padded C-string field (TInfoS).
///
/// Returns `None` for a zero-filled slot, which is distinct from a field
/// legitimately holding an empty string: media that do not use TInfoS leave
/// it zeroed, and callers must be able to tell the two apart.
pub fn decode_cstring(bytes: &[u8]) -> Option<BString> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    if end == 0 {
        return None;
    }
    Some(BString::new(bytes[..end].to_vec()))
}

/// Encode a C-string into a NUL-padded field of exactly `len` bytes.
pub fn encode_cstring(value: Option<&BString>, len: usize) -> Vec<u8> {
    match value {
        Some(value) => zero_pad(value, len),
        None => vec![0; len],
    }
}

/// Decode the version field. `None` when the two bytes trim to nothing
/// (zero-filled or blank), which marks the record as structurally broken.
pub fn decode_version(bytes: &[u8]) -> Option<BString> {
    let version = decode_text(bytes);
    if version.is_empty() { None } else { Some(version) }
}

/// Encode the version field; empty input falls back to the default "00".
pub fn encode_version(value: &BString) -> Vec<u8> {
    if value.is_empty() {
        b"00".to_vec()
    } else {
        sauce_pad(value, SauceField::Version.size())
    }
}

/// Decode the date field; anything other than eight digits forming a real
/// calendar date is "no date".
pub fn decode_date(bytes: &[u8]) -> Option<SauceDate> {
    SauceDate::from_bytes(bytes)
}

/// Encode the date field. "No date" is stored as eight blanks, which
/// round-trips back to `None`.
pub fn encode_date(value: Option<&SauceDate>) -> Vec<u8> {
    match value {
        Some(date) => date.to_bytes().to_vec(),
        None => vec![b' '; limits::DATE_LENGTH],
    }
}

/// Encode an integer into a little-endian u32 field, wrapping mod 2³²
/// (negative inputs wrap two's-complement).
pub fn encode_u32(value: i64) -> [u8; 4] {
    (value as u32).to_le_bytes()
}

/// Encode an integer into a little-endian u16 field, wrapping mod 2¹⁶.
pub fn encode_u16(value: i64) -> [u8; 2] {
    (value as u16).to_le_bytes()
}

/// Encode an integer into a u8 field, wrapping mod 2⁸.
pub fn encode_u8(value: i64) -> [u8; 1] {
    [value as u8]
}

/// Decode a little-endian u32 field. Short input decodes to 0.
pub fn decode_u32(bytes: &[u8]) -> u32 {
    match bytes.try_into() {
        Ok(bytes) => u32::from_le_bytes(bytes),
        Err(_) => 0,
    }
}

/// Decode a little-endian u16 field. Short input decodes to 0.
pub fn decode_u16(bytes: &[u8]) -> u16 {
    match bytes.try_into() {
        Ok(bytes) => u16::from_le_bytes(bytes),
        Err(_) => 0,
    }
}

/// Decode a u8 field. Anything but exactly one byte decodes to 0.
pub fn decode_u8(bytes: &[u8]) -> u8 {
    match bytes {
        [byte] => *byte,
        _ => 0,
    }
}

/// Slice one field out of a raw 128-byte record.
///
/// # Errors
///
/// Returns [`SauceError::InvalidLength`] if `record` is not exactly 128
/// bytes. The returned bytes are raw; decoding is the caller's choice.
pub fn read_field(record: &[u8], field: SauceField) -> crate::Result<&[u8]> {
    if record.len() != RECORD_LEN {
        return Err(SauceError::InvalidLength {
            expected: RECORD_LEN,
            actual: record.len(),
        });
    }
    Ok(&record[field.range()])
}

/// Overwrite one field of a raw 128-byte record with pre-encoded bytes.
///
/// # Errors
///
/// Returns [`SauceError::InvalidLength`] if `record` is not exactly 128
/// bytes or `bytes` is not exactly the field's declared size.
pub fn write_field(record: &mut [u8], field: SauceField, bytes: &[u8]) -> crate::Result<()> {
    if record.len() != RECORD_LEN {
        return Err(SauceError::InvalidLength {
            expected: RECORD_LEN,
            actual: record.len(),
        });
    }
    replace_field(record, field, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_splits_at_first_nul() {
        assert_eq!(decode_text(b"Auth\0r  "), BString::from("Auth"));
        assert_eq!(decode_text(b"Hello   "), BString::from("Hello"));
        assert_eq!(decode_text(b"\0\0\0"), BString::from(""));
    }

    #[test]
    fn cstring_empty_is_no_value() {
        assert_eq!(decode_cstring(b"\0\0\0\0"), None);
        assert_eq!(decode_cstring(b"IBM VGA\0\0"), Some(BString::from("IBM VGA")));
        // trailing spaces before the NUL padding are part of the value
        assert_eq!(
            decode_cstring(b"FONT  \0\0"),
            Some(BString::from("FONT  "))
        );
    }

    #[test]
    fn version_defaults() {
        assert_eq!(encode_version(&BString::from("")), b"00");
        assert_eq!(encode_version(&BString::from("00")), b"00");
        assert_eq!(decode_version(b"\0\0"), None);
        assert_eq!(decode_version(b"  "), None);
    }

    #[test]
    fn date_blank_roundtrip() {
        let wire = encode_date(None);
        assert_eq!(wire, b"        ");
        assert_eq!(decode_date(&wire), None);
    }

    #[test]
    fn integer_wrap() {
        assert_eq!(encode_u16(0x1_0050), [0x50, 0x00]);
        assert_eq!(encode_u32(-1), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(decode_u16(&[0x50, 0x00]), 80);
    }

    #[test]
    fn write_field_checks_sizes() {
        let mut record = vec![0u8; RECORD_LEN];
        write_field(&mut record, SauceField::TInfo1, &encode_u16(80)).unwrap();
        assert_eq!(&record[96..98], &[80, 0]);

        let err = write_field(&mut record, SauceField::TInfo1, &[1]).unwrap_err();
        assert!(matches!(err, SauceError::InvalidLength { expected: 2, actual: 1 }));

        let mut short = vec![0u8; 64];
        assert!(write_field(&mut short, SauceField::TInfo1, &[0, 0]).is_err());
    }
}
