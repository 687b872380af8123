//! Reading and writing SAUCE blocks positionally on files.
//!
//! The same logical operations as [`crate::buffer`], but over a seekable
//! stream: reads scan backward from the end of the stream and never load
//! more than the SAUCE block itself, writes truncate at the new contents
//! boundary *before* appending the new trailer so stale comment blocks can
//! never survive next to fresh ones.
//!
//! Streams are not locked; callers that mutate the same path from several
//! tasks must serialize per file.
//!
//! One documented coercion: a comment pointer in the record that points
//! outside the file (stale pointers are common in the wild) reads as "no
//! comments", not as an I/O error.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use bstr::BString;

use crate::binary;
use crate::block::{SauceBlock, decode_comments};
use crate::field;
use crate::schema::{EOF_CHAR, RECORD_LEN, SauceField, comment_block_len};
use crate::{SauceError, SauceHeader};

/// Decode the SAUCE block of a file.
///
/// # Errors
///
/// [`SauceError::NoSauce`] when the file is shorter than a record or does
/// not end in one; [`SauceError::InvalidSauce`] for placeholder or
/// version-less records; [`SauceError::Io`] for OS-level failures.
pub fn sauce<P: AsRef<Path>>(path: P) -> crate::Result<SauceBlock> {
    sauce_from(&mut File::open(path)?)
}

/// [`sauce`] over an already opened seekable stream.
pub fn sauce_from<S: Read + Seek>(stream: &mut S) -> crate::Result<SauceBlock> {
    let record = read_trailing_record(stream)?.ok_or(SauceError::NoSauce)?;
    let header = SauceHeader::from_record(&record)?;

    let mut comments = Vec::new();
    if header.comment_lines > 0 {
        match read_comment_block(stream, header.comment_lines)? {
            Some(bytes) => {
                comments = decode_comments(&bytes, header.comment_lines).unwrap_or_default();
            }
            None => {
                log::warn!(
                    "SAUCE record announces {} comment lines but no comment block precedes it - ignoring comments",
                    header.comment_lines
                );
            }
        }
    }

    Ok(SauceBlock::new(header, comments))
}

/// The raw `(record, comments)` bytes of a file's SAUCE block. The comment
/// bytes are empty when no well-formed comment block precedes the record.
///
/// # Errors
///
/// [`SauceError::NoSauce`] without a trailing record; [`SauceError::Io`]
/// for OS-level failures.
pub fn raw<P: AsRef<Path>>(path: P) -> crate::Result<(Vec<u8>, Vec<u8>)> {
    let mut stream = File::open(path)?;
    let record = read_trailing_record(&mut stream)?
        .filter(|record| binary::is_record(record))
        .ok_or(SauceError::NoSauce)?;
    let lines = field::decode_u8(field::read_field(&record, SauceField::CommentLines)?);
    let comments = read_comment_block(&mut stream, lines)?.unwrap_or_default();
    Ok((record, comments))
}

/// The decoded comment lines of a file's SAUCE block.
///
/// # Errors
///
/// [`SauceError::NoSauce`] without a record, [`SauceError::NoComments`]
/// when the record announces comments but no block is present,
/// [`SauceError::Io`] for OS-level failures.
pub fn comments<P: AsRef<Path>>(path: P) -> crate::Result<Vec<BString>> {
    let mut stream = File::open(path)?;
    let record = read_trailing_record(&mut stream)?
        .filter(|record| binary::is_record(record))
        .ok_or(SauceError::NoSauce)?;
    let lines = field::decode_u8(field::read_field(&record, SauceField::CommentLines)?);
    match read_comment_block(&mut stream, lines)? {
        Some(bytes) => decode_comments(&bytes, lines),
        None if lines == 0 => Ok(Vec::new()),
        None => Err(SauceError::NoComments),
    }
}

/// Does the file end in a SAUCE record?
///
/// # Errors
///
/// [`SauceError::Io`] for OS-level failures.
pub fn has_sauce<P: AsRef<Path>>(path: P) -> crate::Result<bool> {
    let mut stream = File::open(path)?;
    Ok(read_trailing_record(&mut stream)?
        .is_some_and(|record| binary::is_record(&record)))
}

/// Does the file end in a SAUCE record preceded by a well-formed comment
/// block?
///
/// # Errors
///
/// [`SauceError::Io`] for OS-level failures.
pub fn has_comments<P: AsRef<Path>>(path: P) -> crate::Result<bool> {
    let mut stream = File::open(path)?;
    let Some(record) = read_trailing_record(&mut stream)?.filter(|r| binary::is_record(r)) else {
        return Ok(false);
    };
    let lines = field::decode_u8(field::read_field(&record, SauceField::CommentLines)?);
    Ok(read_comment_block(&mut stream, lines)?.is_some() && lines > 0)
}

/// The byte length of the file's contents: everything before the SAUCE
/// block.
///
/// When the record's comment pointer does not land on an actual comment
/// block, those bytes count as contents — the writer's intent cannot be
/// assumed.
///
/// # Errors
///
/// [`SauceError::Io`] for OS-level failures.
pub fn contents_size<P: AsRef<Path>>(path: P) -> crate::Result<u64> {
    contents_size_from(&mut File::open(path)?)
}

/// [`contents_size`] over an already opened seekable stream.
pub fn contents_size_from<S: Read + Seek>(stream: &mut S) -> crate::Result<u64> {
    let len = stream.seek(SeekFrom::End(0))?;
    let Some(record) = read_trailing_record(stream)? else {
        return Ok(len);
    };
    if !binary::is_record(&record) {
        return Ok(len);
    }

    let lines = field::decode_u8(field::read_field(&record, SauceField::CommentLines)?);
    let record_start = len - RECORD_LEN as u64;
    match read_comment_block(stream, lines)? {
        Some(_) => Ok(record_start - comment_block_len(lines) as u64),
        None => Ok(record_start),
    }
}

/// The file's contents (everything before the SAUCE block) as a buffer.
///
/// # Errors
///
/// [`SauceError::Io`] for OS-level failures.
pub fn contents<P: AsRef<Path>>(path: P) -> crate::Result<Vec<u8>> {
    let mut stream = File::open(path)?;
    let size = contents_size_from(&mut stream)?;
    stream.seek(SeekFrom::Start(0))?;
    let mut data = vec![0; size as usize];
    stream.read_exact(&mut data)?;
    Ok(data)
}

/// Write (or replace) the SAUCE block of a file.
///
/// The file is truncated at its contents boundary first, then the new
/// trailer — an EOF character when the contents do not already end in one,
/// the comment block, the record — is appended in one write. The file is
/// created when missing.
///
/// # Errors
///
/// [`SauceError::Io`] for OS-level failures.
pub fn write<P: AsRef<Path>>(path: P, block: &SauceBlock) -> crate::Result<()> {
    let mut stream = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    let boundary = contents_size_from(&mut stream)?;
    let needs_eof = if boundary == 0 {
        true
    } else {
        stream.seek(SeekFrom::Start(boundary - 1))?;
        let mut last = [0u8; 1];
        stream.read_exact(&mut last)?;
        last[0] != EOF_CHAR
    };

    stream.set_len(boundary)?;
    stream.seek(SeekFrom::Start(boundary))?;

    let mut trailer = Vec::with_capacity(1 + block.len());
    if needs_eof {
        trailer.push(EOF_CHAR);
    }
    trailer.extend(block.to_bytes());
    stream.write_all(&trailer)?;
    stream.flush()?;
    Ok(())
}

/// Remove the comment block of a file, keeping the record.
///
/// Truncates the comment block away (when one is actually present) and
/// rewrites the record with a zeroed comment count. Files without a record
/// are left untouched.
///
/// # Errors
///
/// [`SauceError::Io`] for OS-level failures.
pub fn remove_comments<P: AsRef<Path>>(path: P) -> crate::Result<()> {
    let mut stream = OpenOptions::new().read(true).write(true).open(path)?;

    let Some(mut record) = read_trailing_record(&mut stream)?.filter(|r| binary::is_record(r))
    else {
        return Ok(());
    };
    let lines = field::decode_u8(field::read_field(&record, SauceField::CommentLines)?);
    if lines == 0 {
        return Ok(());
    }

    let len = stream.seek(SeekFrom::End(0))?;
    let record_start = len - RECORD_LEN as u64;
    let position = match read_comment_block(&mut stream, lines)? {
        Some(_) => {
            let comment_start = record_start - comment_block_len(lines) as u64;
            stream.set_len(comment_start)?;
            comment_start
        }
        None => record_start,
    };

    field::write_field(&mut record, SauceField::CommentLines, &[0])?;
    stream.seek(SeekFrom::Start(position))?;
    stream.write_all(&record)?;
    stream.flush()?;
    Ok(())
}

/// Remove the whole SAUCE block of a file by truncating at the contents
/// boundary. Files without a record are left untouched.
///
/// # Errors
///
/// [`SauceError::Io`] for OS-level failures.
pub fn remove_sauce<P: AsRef<Path>>(path: P) -> crate::Result<()> {
    let mut stream = OpenOptions::new().read(true).write(true).open(path)?;
    let boundary = contents_size_from(&mut stream)?;
    stream.set_len(boundary)?;
    Ok(())
}

/// Read the last 128 bytes, or `None` for streams shorter than a record.
/// The bytes are returned unvalidated; callers pick their strictness.
fn read_trailing_record<S: Read + Seek>(stream: &mut S) -> crate::Result<Option<Vec<u8>>> {
    let len = stream.seek(SeekFrom::End(0))?;
    if len < RECORD_LEN as u64 {
        return Ok(None);
    }
    stream.seek(SeekFrom::End(-(RECORD_LEN as i64)))?;
    let mut record = vec![0u8; RECORD_LEN];
    stream.read_exact(&mut record)?;
    Ok(Some(record))
}

/// Read the comment block announced by a record's comment count.
///
/// Returns `None` — never an error — when the count is zero, when the file
/// is too short for the announced block, or when the bytes at the computed
/// position are not a comment block: stale pointers are data corruption the
/// reader is expected to survive. An out-of-range seek from a hostile
/// stream implementation is treated the same way; genuine read errors
/// propagate.
fn read_comment_block<S: Read + Seek>(stream: &mut S, lines: u8) -> crate::Result<Option<Vec<u8>>> {
    if lines == 0 {
        return Ok(None);
    }
    let block_len = comment_block_len(lines);
    let total = (RECORD_LEN + block_len) as u64;
    let len = stream.seek(SeekFrom::End(0))?;
    if len < total {
        return Ok(None);
    }
    match stream.seek(SeekFrom::End(-(total as i64))) {
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::InvalidInput => return Ok(None),
        Err(err) => return Err(err.into()),
    }
    let mut block = vec![0u8; block_len];
    stream.read_exact(&mut block)?;
    if binary::is_comment_block(&block) {
        Ok(Some(block))
    } else {
        Ok(None)
    }
}
