//! Tolerant byte-level operations over a whole buffer.
//!
//! This layer locates, splits and patches the trailing SAUCE block of an
//! in-memory buffer without decoding it. Everything here works on slices and
//! borrows where possible; the typed view lives in [`crate::buffer`] and
//! [`crate::SauceBlock`].
//!
//! The recognition predicates are deliberately strict about shape and
//! nothing else: a record is the last 128 bytes starting with `"SAUCE"`
//! (minus the zero-filled placeholder), a comment block is `"COMNT"` plus a
//! whole number of 64-byte lines. The `match_*` helpers exist for repair
//! tooling that needs positions, including the common case of diagnosing a
//! comment *fragment* whose length is not a multiple of the line size.

use bstr::ByteSlice;

use crate::field;
use crate::header::is_placeholder_record;
use crate::schema::{
    COMMENT_ID, EOF_CHAR, MIN_COMMENT_BLOCK_LEN, RECORD_LEN, SAUCE_ID, SauceField,
    comment_block_len,
};
use crate::{SauceError, limits};

/// Position and length of a matched structure inside a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockMatch {
    /// Byte offset of the structure's ID tag.
    pub position: usize,
    /// Byte length of the structure (never including an EOF character).
    pub length: usize,
}

/// Is this slice exactly one well-formed SAUCE record?
///
/// The zero-filled placeholder (`"SAUCE"` + 123 NULs) is not a record; it is
/// reserved space a buggy writer never populated.
pub fn is_record(bytes: &[u8]) -> bool {
    bytes.len() == RECORD_LEN && bytes.starts_with(SAUCE_ID) && !is_placeholder_record(bytes)
}

/// Is this slice exactly one well-formed comment block (tag plus a whole
/// number of lines)?
pub fn is_comment_block(bytes: &[u8]) -> bool {
    bytes.len() >= MIN_COMMENT_BLOCK_LEN
        && bytes.starts_with(COMMENT_ID)
        && (bytes.len() - COMMENT_ID.len()) % limits::MAX_COMMENT_LENGTH == 0
}

/// Does this slice open like a comment block, whole lines or not?
/// Used to diagnose truncated blocks in malformed files.
pub fn is_comment_fragment(bytes: &[u8]) -> bool {
    bytes.len() >= MIN_COMMENT_BLOCK_LEN && bytes.starts_with(COMMENT_ID)
}

/// Byte offset of the trailing record, if the buffer ends in one.
fn record_start(buf: &[u8]) -> Option<usize> {
    if buf.len() < RECORD_LEN {
        return None;
    }
    let start = buf.len() - RECORD_LEN;
    is_record(&buf[start..]).then_some(start)
}

/// Split a buffer into `(contents, record, comments)`.
///
/// The comment slice is non-empty only when the record's comment count
/// points at a well-formed comment block immediately before the record;
/// anything else (stale count, truncated block) leaves those bytes in
/// `contents`. Without a trailing record the whole buffer is contents.
///
/// The three slices always tile the input:
/// `contents.len() + comments.len() + record.len() == buf.len()`.
pub fn split_all(buf: &[u8]) -> (&[u8], &[u8], &[u8]) {
    let Some(start) = record_start(buf) else {
        return (buf, &[], &[]);
    };
    let lines = buf[start..][SauceField::CommentLines.range()][0];
    split_for_lines(buf, start, lines)
}

/// [`split_all`] with an explicit comment count instead of the record's
/// field, for repairing records whose count went stale.
pub fn split_with(buf: &[u8], lines: u8) -> (&[u8], &[u8], &[u8]) {
    let Some(start) = record_start(buf) else {
        return (buf, &[], &[]);
    };
    split_for_lines(buf, start, lines)
}

fn split_for_lines(buf: &[u8], record_start: usize, lines: u8) -> (&[u8], &[u8], &[u8]) {
    let record = &buf[record_start..];
    let block_len = comment_block_len(lines);
    if lines > 0 && record_start >= block_len {
        let comment_start = record_start - block_len;
        let comments = &buf[comment_start..record_start];
        if is_comment_block(comments) {
            return (&buf[..comment_start], record, comments);
        }
    }
    (&buf[..record_start], record, &[])
}

/// Split into `(record, comments)`, dropping the contents.
pub fn split_sauce(buf: &[u8]) -> (&[u8], &[u8]) {
    let (_, record, comments) = split_all(buf);
    (record, comments)
}

/// Split into `(contents, record)` only; comment bytes stay in contents.
pub fn split_record(buf: &[u8]) -> (&[u8], &[u8]) {
    match record_start(buf) {
        Some(start) => (&buf[..start], &buf[start..]),
        None => (buf, &[]),
    }
}

/// Everything before the SAUCE block (record plus recognized comments).
pub fn contents(buf: &[u8]) -> &[u8] {
    split_all(buf).0
}

/// The strict view of the contents: everything before the first EOF
/// character, or [`contents`] when the buffer has none.
pub fn clean_contents(buf: &[u8]) -> &[u8] {
    match buf.find_byte(EOF_CHAR) {
        Some(pos) => &buf[..pos],
        None => contents(buf),
    }
}

/// Does the buffer end with the EOF character?
pub fn is_eof_terminated(buf: &[u8]) -> bool {
    buf.last() == Some(&EOF_CHAR)
}

/// Returns the buffer with exactly one trailing EOF character appended when
/// it does not already end in one.
pub fn eof_terminate(buf: &[u8]) -> Vec<u8> {
    let mut data = buf.to_vec();
    if !is_eof_terminated(buf) {
        data.push(EOF_CHAR);
    }
    data
}

/// Read the raw bytes of one record field from the trailing record.
///
/// Raw on purpose: writers rewrite single fields without re-encoding the
/// whole record (e.g. zeroing the comment count when stripping comments),
/// and decoding is [`crate::field`]'s job.
///
/// # Errors
///
/// [`SauceError::NoSauce`] when the buffer has no trailing record.
pub fn read_field(buf: &[u8], field: SauceField) -> crate::Result<&[u8]> {
    let start = record_start(buf).ok_or(SauceError::NoSauce)?;
    field::read_field(&buf[start..], field)
}

/// Overwrite one record field of the trailing record in place.
///
/// # Errors
///
/// [`SauceError::NoSauce`] when the buffer has no trailing record;
/// [`SauceError::InvalidLength`] when `bytes` is not the field's exact size.
pub fn write_field(buf: &mut [u8], field: SauceField, bytes: &[u8]) -> crate::Result<()> {
    let start = record_start(buf).ok_or(SauceError::NoSauce)?;
    field::write_field(&mut buf[start..], field, bytes)
}

/// Match the trailing record.
///
/// With `eof_required`, the byte immediately before the record must be the
/// EOF character; the match then starts at the record's ID byte (the
/// position after the EOF character) and the length excludes the EOF byte.
pub fn match_record(buf: &[u8], eof_required: bool) -> Option<BlockMatch> {
    let start = record_start(buf)?;
    if eof_required && (start == 0 || buf[start - 1] != EOF_CHAR) {
        return None;
    }
    Some(BlockMatch {
        position: start,
        length: RECORD_LEN,
    })
}

/// Match the first comment block before the trailing record.
///
/// A comment block needs a record after it — the record is what terminates
/// the block — so this returns `None` on record-less buffers. The matched
/// length runs from the `"COMNT"` tag to the record and is always a whole
/// number of lines.
pub fn match_comment_block(buf: &[u8], eof_required: bool) -> Option<BlockMatch> {
    let end = record_start(buf)?;
    first_comment_match(buf, end, eof_required, true)
}

/// Match the first comment fragment, record or no record.
///
/// Fragments end at the record when one exists, otherwise at the end of the
/// buffer, and their length need not be a whole number of lines. This is
/// the diagnosis tool for truncated blocks.
pub fn match_comment_fragment(buf: &[u8], eof_required: bool) -> Option<BlockMatch> {
    let end = record_start(buf).unwrap_or(buf.len());
    first_comment_match(buf, end, eof_required, false)
}

fn first_comment_match(
    buf: &[u8],
    end: usize,
    eof_required: bool,
    whole_lines: bool,
) -> Option<BlockMatch> {
    for position in buf[..end].find_iter(COMMENT_ID) {
        let length = end - position;
        if length < MIN_COMMENT_BLOCK_LEN {
            continue;
        }
        if whole_lines && (length - COMMENT_ID.len()) % limits::MAX_COMMENT_LENGTH != 0 {
            continue;
        }
        if eof_required && (position == 0 || buf[position - 1] != EOF_CHAR) {
            continue;
        }
        return Some(BlockMatch { position, length });
    }
    None
}

/// Recover the comment line count from the comment block's byte length.
///
/// This is the structural count for repair workflows; compare it against
/// [`comment_lines_field`] to detect a stale record. Counts past the spec
/// limit clamp to 255.
///
/// # Errors
///
/// [`SauceError::NoSauce`] without a record, [`SauceError::NoComments`]
/// without a comment block.
pub fn count_comment_lines(buf: &[u8]) -> crate::Result<u8> {
    if record_start(buf).is_none() {
        return Err(SauceError::NoSauce);
    }
    let matched = match_comment_block(buf, false).ok_or(SauceError::NoComments)?;
    let lines = (matched.length - COMMENT_ID.len()) / limits::MAX_COMMENT_LENGTH;
    Ok(lines.min(limits::MAX_COMMENTS) as u8)
}

/// Read the comment line count straight from the record field.
///
/// # Errors
///
/// [`SauceError::NoSauce`] without a record.
pub fn comment_lines_field(buf: &[u8]) -> crate::Result<u8> {
    let bytes = read_field(buf, SauceField::CommentLines)?;
    Ok(field::decode_u8(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SauceHeader;

    fn record_bytes() -> Vec<u8> {
        SauceHeader::default().to_bytes()
    }

    fn record_with_comments(lines: u8) -> Vec<u8> {
        let mut data = COMMENT_ID.to_vec();
        for _ in 0..lines {
            data.extend([b' '; 64]);
        }
        let mut header = SauceHeader::default();
        header.comment_lines = lines;
        data.extend(header.to_bytes());
        data
    }

    #[test]
    fn predicates() {
        assert!(is_record(&record_bytes()));
        assert!(!is_record(b"SAUCE"));
        let mut placeholder = vec![0u8; RECORD_LEN];
        placeholder[..5].copy_from_slice(b"SAUCE");
        assert!(!is_record(&placeholder));

        let mut block = COMMENT_ID.to_vec();
        block.extend([b' '; 64]);
        assert!(is_comment_block(&block));
        assert!(is_comment_fragment(&block));
        block.extend([b' '; 10]);
        assert!(!is_comment_block(&block)); // ragged length
        assert!(is_comment_fragment(&block));
    }

    #[test]
    fn split_tiles_the_buffer() {
        let mut buf = b"body".to_vec();
        buf.push(EOF_CHAR);
        buf.extend(record_with_comments(2));

        let (contents, record, comments) = split_all(&buf);
        assert_eq!(contents, b"body\x1a");
        assert_eq!(record.len(), RECORD_LEN);
        assert_eq!(comments.len(), comment_block_len(2));
        assert_eq!(contents.len() + record.len() + comments.len(), buf.len());
    }

    #[test]
    fn stale_count_leaves_bytes_in_contents() {
        // Record says two lines, only one is actually there.
        let mut buf = COMMENT_ID.to_vec();
        buf.extend([b' '; 64]);
        let mut header = SauceHeader::default();
        header.comment_lines = 2;
        buf.extend(header.to_bytes());

        let (contents, record, comments) = split_all(&buf);
        assert_eq!(comments, b"");
        assert_eq!(record.len(), RECORD_LEN);
        assert_eq!(contents.len(), comment_block_len(1));
    }

    #[test]
    fn split_with_overrides_the_field() {
        // Stale record field (0), but one structural line present.
        let mut buf = COMMENT_ID.to_vec();
        buf.extend([b' '; 64]);
        buf.extend(record_bytes());

        let (_, _, comments) = split_all(&buf);
        assert_eq!(comments, b"");
        let (_, _, comments) = split_with(&buf, 1);
        assert_eq!(comments.len(), comment_block_len(1));
    }

    #[test]
    fn field_level_access() {
        let mut buf = b"x".to_vec();
        buf.extend(record_with_comments(3));
        assert_eq!(comment_lines_field(&buf).unwrap(), 3);
        assert_eq!(count_comment_lines(&buf).unwrap(), 3);

        write_field(&mut buf, SauceField::CommentLines, &[0]).unwrap();
        assert_eq!(comment_lines_field(&buf).unwrap(), 0);
        // Structural count is unaffected by the field rewrite.
        assert_eq!(count_comment_lines(&buf).unwrap(), 3);

        assert!(matches!(
            read_field(b"no sauce here", SauceField::Title),
            Err(SauceError::NoSauce)
        ));
    }

    #[test]
    fn eof_matching() {
        let mut buf = b"body".to_vec();
        buf.push(EOF_CHAR);
        buf.extend(record_bytes());

        let matched = match_record(&buf, true).unwrap();
        assert_eq!(matched.position, 5);
        assert_eq!(matched.length, RECORD_LEN);

        // Without the EOF character adjacency fails but plain match works.
        let buf2: Vec<u8> = b"body".iter().copied().chain(record_bytes()).collect();
        assert!(match_record(&buf2, true).is_none());
        assert!(match_record(&buf2, false).is_some());
    }

    #[test]
    fn fragment_matching() {
        // Truncated comment block with no record: fragment only.
        let mut buf = b"data\x1a".to_vec();
        let fragment_pos = buf.len();
        buf.extend(COMMENT_ID);
        buf.extend([b'x'; 70]);

        assert!(match_comment_block(&buf, false).is_none());
        let matched = match_comment_fragment(&buf, true).unwrap();
        assert_eq!(matched.position, fragment_pos);
        assert_eq!(matched.length, 75);
    }

    #[test]
    fn clean_contents_cuts_at_first_eof() {
        let mut buf = b"one\x1atwo".to_vec();
        buf.extend(record_bytes());
        assert_eq!(clean_contents(&buf), b"one");
        assert_eq!(clean_contents(b"no eof"), b"no eof");
    }

    #[test]
    fn eof_termination() {
        assert!(!is_eof_terminated(b"abc"));
        assert_eq!(eof_terminate(b"abc"), b"abc\x1a");
        assert_eq!(eof_terminate(b"abc\x1a"), b"abc\x1a");
    }
}
