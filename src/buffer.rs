//! Reading and writing SAUCE blocks on in-memory buffers.
//!
//! All operations are pure: readers borrow from the input, writers return a
//! new buffer and never touch the bytes before the SAUCE block. The
//! positional equivalents for files live in [`crate::file`].

use bstr::BString;

use crate::binary;
use crate::block::{SauceBlock, decode_comments};
use crate::field;
use crate::SauceError;
use crate::schema::SauceField;

/// Decode the SAUCE block of a buffer.
///
/// A record whose comment count does not match an actual comment block
/// decodes with an empty comment list; see [`SauceBlock::from_bytes`].
///
/// # Errors
///
/// [`SauceError::NoSauce`] without a trailing record,
/// [`SauceError::InvalidSauce`] for placeholder or version-less records.
pub fn sauce(buf: &[u8]) -> crate::Result<SauceBlock> {
    SauceBlock::from_bytes(buf)
}

/// The raw `(record, comments)` byte slices of a buffer's SAUCE block.
/// The comment slice is empty when no well-formed comment block precedes
/// the record.
///
/// # Errors
///
/// [`SauceError::NoSauce`] without a trailing record.
pub fn raw(buf: &[u8]) -> crate::Result<(&[u8], &[u8])> {
    let (record, comments) = binary::split_sauce(buf);
    if record.is_empty() {
        return Err(SauceError::NoSauce);
    }
    Ok((record, comments))
}

/// The decoded comment lines of a buffer's SAUCE block.
///
/// # Errors
///
/// [`SauceError::NoSauce`] without a record; [`SauceError::NoComments`] when
/// the record announces comments but no comment block is present. A record
/// announcing zero comments yields an empty list.
pub fn comments(buf: &[u8]) -> crate::Result<Vec<BString>> {
    let (record, comment_bytes) = raw(buf)?;
    let lines = field::decode_u8(field::read_field(record, SauceField::CommentLines)?);
    decode_comments(comment_bytes, lines)
}

/// Everything before the SAUCE block. Buffers without a record are returned
/// whole.
pub fn contents(buf: &[u8]) -> &[u8] {
    binary::contents(buf)
}

/// Does the buffer end in a SAUCE record?
pub fn has_sauce(buf: &[u8]) -> bool {
    binary::match_record(buf, false).is_some()
}

/// Does the buffer end in a SAUCE record preceded by a well-formed comment
/// block?
pub fn has_comments(buf: &[u8]) -> bool {
    let (record, comments) = binary::split_sauce(buf);
    !record.is_empty() && !comments.is_empty()
}

/// Write (or replace) the SAUCE block of a buffer.
///
/// The result is `contents ++ [EOF]? ++ comment block ++ record`: any
/// previous SAUCE block is dropped, and an EOF character is inserted when
/// the contents do not already end in one. Writing twice is idempotent
/// modulo the inserted EOF.
pub fn write(buf: &[u8], block: &SauceBlock) -> Vec<u8> {
    let mut data = binary::eof_terminate(contents(buf));
    data.extend(block.to_bytes());
    data
}

/// Remove the comment block, keeping the record.
///
/// The record's comment count is zeroed in place; buffers without a record
/// are returned unchanged.
pub fn remove_comments(buf: &[u8]) -> Vec<u8> {
    let (contents, record, _comments) = binary::split_all(buf);
    if record.is_empty() {
        return buf.to_vec();
    }
    let mut data = contents.to_vec();
    let record_start = data.len();
    data.extend_from_slice(record);
    // Infallible: the record was just appended at the tail.
    let _ = binary::write_field(&mut data[record_start..], SauceField::CommentLines, &[0]);
    data
}

/// Remove the whole SAUCE block.
///
/// Equivalent to [`contents`] as an owned buffer: a pre-existing EOF
/// character stays (it sits before the block), and buffers without a record
/// are returned unchanged.
pub fn remove_sauce(buf: &[u8]) -> Vec<u8> {
    contents(buf).to_vec()
}
