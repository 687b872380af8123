//! Byte padding and trimming helpers.
//!
//! The SAUCE wire format has two padding disciplines: text fields are
//! space-padded and the TInfoS field is zero-padded. These helpers implement
//! both, plus the generic pad/replace primitives the raw repair tooling in
//! [`crate::binary`] builds on.

use bstr::BString;

use crate::{SauceError, SauceField};

/// Trims the trailing whitespace and null bytes from the data.
/// This is sauce specific - no other thing than space should be trimmed,
/// however some implementations use null bytes instead of spaces.
pub fn sauce_trim(data: &[u8]) -> BString {
    let mut end = data.len();
    while end > 0 {
        let b = data[end - 1];
        if b != 0 && b != b' ' {
            break;
        }
        end -= 1;
    }
    BString::new(data[..end].to_vec())
}

/// Pads trailing whitespaces or cut too long data.
pub fn sauce_pad(str: &BString, len: usize) -> Vec<u8> {
    let mut data = str.to_vec();
    data.resize(len, b' ');
    data
}

/// Pads trailing \0 or cut too long data.
pub fn zero_pad(str: &BString, len: usize) -> Vec<u8> {
    let mut data = str.to_vec();
    data.resize(len, 0);
    data
}

/// Trim only trailing zero bytes (binary zero padding) – for zero padded
/// fields like TInfoS.
pub fn zero_trim(data: &[u8]) -> BString {
    let mut end = data.len();
    while end > 0 && data[end - 1] == 0 {
        end -= 1;
    }
    BString::new(data[..end].to_vec())
}

/// Appends copies of `fill` byte-by-byte until the buffer is at least `len`
/// bytes long. A multi-byte fill may land truncated at the boundary. Buffers
/// already at or past `len` are returned unchanged.
pub fn pad_trailing(bytes: &[u8], len: usize, fill: &[u8]) -> Vec<u8> {
    let mut data = bytes.to_vec();
    if fill.is_empty() {
        return data;
    }
    let mut next = 0;
    while data.len() < len {
        data.push(fill[next]);
        next = (next + 1) % fill.len();
    }
    data
}

/// Like [`pad_trailing`], but prepends the fill bytes.
pub fn pad_leading(bytes: &[u8], len: usize, fill: &[u8]) -> Vec<u8> {
    if bytes.len() >= len || fill.is_empty() {
        return bytes.to_vec();
    }
    let mut pad = Vec::with_capacity(len);
    let mut next = 0;
    while pad.len() < len - bytes.len() {
        pad.push(fill[next]);
        next = (next + 1) % fill.len();
    }
    pad.extend_from_slice(bytes);
    pad
}

/// Pads with `fill` and then cuts to exactly `len` bytes.
pub fn pad_truncate(bytes: &[u8], len: usize, fill: &[u8]) -> Vec<u8> {
    let mut data = pad_trailing(bytes, len, fill);
    data.truncate(len);
    data
}

/// Overwrites `bytes[pos..pos + new.len()]` with `new`.
///
/// # Errors
///
/// Returns [`SauceError::InvalidLength`] if the replacement would extend past
/// the end of the buffer; a replacement never grows its target.
pub fn replace_slice(bytes: &mut [u8], pos: usize, new: &[u8]) -> crate::Result<()> {
    let end = pos + new.len();
    if end > bytes.len() {
        return Err(SauceError::InvalidLength {
            expected: bytes.len().saturating_sub(pos),
            actual: new.len(),
        });
    }
    bytes[pos..end].copy_from_slice(new);
    Ok(())
}

/// Overwrites a single record field in a raw 128-byte record slice.
/// `new` must be exactly the field's declared size.
pub(crate) fn replace_field(record: &mut [u8], field: SauceField, new: &[u8]) -> crate::Result<()> {
    if new.len() != field.size() {
        return Err(SauceError::InvalidLength {
            expected: field.size(),
            actual: new.len(),
        });
    }
    replace_slice(record, field.offset(), new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstr::BString;

    #[test]
    fn test_sauce_trim() {
        let data = b"Hello World  ";
        assert_eq!(sauce_trim(data), BString::from("Hello World"));
        let data = b"Hello World\0\0";
        assert_eq!(sauce_trim(data), BString::from("Hello World"));

        let data = b"Hello World\t\0";
        assert_eq!(sauce_trim(data), BString::from("Hello World\t"));
        let data = b"    \0   ";
        assert_eq!(sauce_trim(data), BString::from(""));
    }

    #[test]
    fn test_sauce_pad() {
        let data = BString::from(b"Hello World");
        assert_eq!(sauce_pad(&data, 15), b"Hello World    ");

        let data = BString::from(b"Hello World");
        assert_eq!(sauce_pad(&data, 5), b"Hello");

        let data = BString::from(b"");
        assert_eq!(sauce_pad(&data, 1), b" ");
    }

    #[test]
    fn test_zero_trim() {
        let data = b"FONT NAME   \0\0\0"; // keep trailing spaces before zeros
        assert_eq!(zero_trim(data), BString::from("FONT NAME   "));
        let data = b"ABC\0DEF\0"; // internal zeros preserved
        assert_eq!(zero_trim(data), BString::from(b"ABC\0DEF".to_vec()));
    }

    #[test]
    fn test_pad_trailing() {
        assert_eq!(pad_trailing(b"ab", 4, b"."), b"ab..");
        assert_eq!(pad_trailing(b"abcd", 2, b"."), b"abcd"); // already long enough
        // multi-byte fill lands truncated at the boundary
        assert_eq!(pad_trailing(b"a", 4, b"xy"), b"axyx");
    }

    #[test]
    fn test_pad_leading() {
        assert_eq!(pad_leading(b"ab", 4, b"0"), b"00ab");
        assert_eq!(pad_leading(b"abcd", 3, b"0"), b"abcd");
    }

    #[test]
    fn test_pad_truncate() {
        assert_eq!(pad_truncate(b"abcdef", 3, b" "), b"abc");
        assert_eq!(pad_truncate(b"a", 3, b" "), b"a  ");
    }

    #[test]
    fn test_replace_slice() {
        let mut buf = b"hello world".to_vec();
        replace_slice(&mut buf, 6, b"sauce").unwrap();
        assert_eq!(buf, b"hello sauce");

        let mut buf = b"tiny".to_vec();
        let err = replace_slice(&mut buf, 2, b"abc").unwrap_err();
        assert!(matches!(
            err,
            crate::SauceError::InvalidLength {
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(buf, b"tiny"); // untouched on failure
    }
}
