//! SAUCE v00 record structure and serialization.
//!
//! [`SauceHeader`] is the decoded form of the raw 128-byte record that
//! closes every SAUCE'd file. Decoding is tolerant — individual fields that
//! cannot be parsed fall back to their documented defaults — but two shapes
//! are rejected outright as [`crate::SauceError::InvalidSauce`]:
//!
//! - the zero-filled placeholder (`"SAUCE"` followed by 123 NUL bytes) that
//!   buggy writers emit when they reserve space without populating it;
//! - a record whose version bytes trim to nothing, since a record that
//!   cannot state its version cannot be trusted to state anything else.
//!
//! # Record Layout
//!
//! See [`crate::schema`] for the field table; this module never spells an
//! offset out by hand.

use bstr::BString;

use crate::date::SauceDate;
use crate::field;
use crate::media::Media;
use crate::schema::{RECORD_LEN, SAUCE_ID, SauceField};
use crate::{SauceDataType, SauceError};

/// Decoded SAUCE v00 record (128 bytes on the wire).
///
/// String fields are raw CP437 byte strings, trimmed of their wire padding;
/// use [`crate::encodings`] to turn them into Rust strings. `t_info_s` is
/// `None` when the 22-byte slot is zero-filled, which is how media that do
/// not use the field leave it.
#[derive(Clone, Debug, PartialEq)]
pub struct SauceHeader {
    /// Version tag, `"00"` everywhere in practice. Other decodable values
    /// are preserved rather than rejected.
    pub version: BString,
    /// The title of the file (up to 35 bytes).
    pub title: BString,
    /// The (nick)name or handle of the creator (up to 20 bytes).
    pub author: BString,
    /// The group or company name (up to 20 bytes).
    pub group: BString,

    /// Creation date; `None` when the field is blank or not a real date.
    pub date: Option<SauceDate>,

    /// Size of the original file in bytes (excluding SAUCE metadata).
    /// 0 when unknown or past the 32-bit limit.
    pub file_size: u32,

    /// Type of data (see [`SauceDataType`]).
    pub data_type: SauceDataType,

    /// Type-specific code; meaning depends on `data_type`.
    pub file_type: u8,

    /// Type-dependent numeric information field 1 (little-endian u16).
    pub t_info1: u16,
    /// Type-dependent numeric information field 2 (little-endian u16).
    pub t_info2: u16,
    /// Type-dependent numeric information field 3 (little-endian u16).
    pub t_info3: u16,
    /// Type-dependent numeric information field 4 (little-endian u16).
    pub t_info4: u16,

    /// Number of lines in the optional comment block preceding the record.
    /// 0 indicates no comment block is present.
    pub comment_lines: u8,

    /// Type-dependent flags byte.
    pub t_flags: u8,

    /// Type-dependent string field; `None` for a zero-filled slot.
    pub t_info_s: Option<BString>,
}

impl Default for SauceHeader {
    fn default() -> Self {
        SauceHeader {
            version: BString::from("00"),
            title: BString::default(),
            author: BString::default(),
            group: BString::default(),
            date: None,
            file_size: 0,
            data_type: SauceDataType::None,
            file_type: 0,
            t_info1: 0,
            t_info2: 0,
            t_info3: 0,
            t_info4: 0,
            comment_lines: 0,
            t_flags: 0,
            t_info_s: None,
        }
    }
}

/// The zero-filled placeholder record check: `"SAUCE"` and nothing else.
pub(crate) fn is_placeholder_record(record: &[u8]) -> bool {
    record.len() == RECORD_LEN
        && record.starts_with(SAUCE_ID)
        && record[SAUCE_ID.len()..].iter().all(|&b| b == 0)
}

impl SauceHeader {
    /// Decode a record from exactly 128 bytes.
    ///
    /// # Errors
    ///
    /// - [`SauceError::NoSauce`] if the slice is not 128 bytes or does not
    ///   open with the `"SAUCE"` tag.
    /// - [`SauceError::InvalidSauce`] for the zero-filled placeholder record
    ///   or an unreadable version field.
    ///
    /// Everything else decodes: unparseable dates become `None`, data type
    /// bytes outside 0–8 become [`SauceDataType::None`], and a file type
    /// that does not resolve against the media registry is clamped to 0.
    /// BinaryText is the one exception — its file type byte encodes the
    /// column width, so any value is accepted there.
    pub fn from_record(record: &[u8]) -> crate::Result<Self> {
        if record.len() != RECORD_LEN || !record.starts_with(SAUCE_ID) {
            return Err(SauceError::NoSauce);
        }
        if is_placeholder_record(record) {
            return Err(SauceError::InvalidSauce("zero-filled placeholder record"));
        }

        let raw = |field: SauceField| &record[field.range()];

        let Some(version) = field::decode_version(raw(SauceField::Version)) else {
            return Err(SauceError::InvalidSauce("unreadable version field"));
        };

        let data_byte = field::decode_u8(raw(SauceField::DataType));
        let data_type = SauceDataType::from(data_byte);
        if u8::from(data_type) != data_byte {
            log::warn!("Unknown SAUCE data type {data_byte} - treating as None");
        }

        let mut file_type = field::decode_u8(raw(SauceField::FileType));
        if Media::resolve(file_type, data_type) == Media::None && file_type != 0 {
            log::warn!(
                "File type {file_type} does not resolve for data type {data_type} - clamping to 0"
            );
            file_type = 0;
        }

        Ok(SauceHeader {
            version,
            title: field::decode_text(raw(SauceField::Title)),
            author: field::decode_text(raw(SauceField::Author)),
            group: field::decode_text(raw(SauceField::Group)),
            date: field::decode_date(raw(SauceField::Date)),
            file_size: field::decode_u32(raw(SauceField::FileSize)),
            data_type,
            file_type,
            t_info1: field::decode_u16(raw(SauceField::TInfo1)),
            t_info2: field::decode_u16(raw(SauceField::TInfo2)),
            t_info3: field::decode_u16(raw(SauceField::TInfo3)),
            t_info4: field::decode_u16(raw(SauceField::TInfo4)),
            comment_lines: field::decode_u8(raw(SauceField::CommentLines)),
            t_flags: field::decode_u8(raw(SauceField::TFlags)),
            t_info_s: field::decode_cstring(raw(SauceField::TInfoS)),
        })
    }

    /// Decode the record from the last 128 bytes of file data.
    ///
    /// # Errors
    ///
    /// As [`from_record`](Self::from_record); data shorter than 128 bytes is
    /// [`SauceError::NoSauce`].
    pub fn from_bytes(data: &[u8]) -> crate::Result<Self> {
        if data.len() < RECORD_LEN {
            return Err(SauceError::NoSauce);
        }
        Self::from_record(&data[data.len() - RECORD_LEN..])
    }

    /// The media type this record's `(file_type, data_type)` pair resolves
    /// to.
    pub fn media(&self) -> Media {
        Media::resolve(self.file_type, self.data_type)
    }

    /// Serialize to exactly 128 bytes.
    ///
    /// Encoding is authoritative: string fields are padded or cut to their
    /// declared widths, an empty version becomes `"00"`, and a
    /// `(file_type, data_type)` pair that does not resolve in the media
    /// registry is replaced by the none/zero pair so the output always
    /// decodes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let (mut data_type, mut file_type) = (self.data_type, self.file_type);
        if Media::resolve(file_type, data_type) == Media::None
            && (file_type != 0 || data_type != SauceDataType::None)
        {
            log::warn!(
                "Unresolvable media pair ({file_type}, {data_type}) - writing none/zero pair"
            );
            data_type = SauceDataType::None;
            file_type = 0;
        }

        let mut record = Vec::with_capacity(RECORD_LEN);
        record.extend_from_slice(SAUCE_ID);
        record.extend(field::encode_version(&self.version));
        record.extend(field::encode_text(&self.title, SauceField::Title.size()));
        record.extend(field::encode_text(&self.author, SauceField::Author.size()));
        record.extend(field::encode_text(&self.group, SauceField::Group.size()));
        record.extend(field::encode_date(self.date.as_ref()));
        record.extend(field::encode_u32(self.file_size as i64));
        record.push(data_type.into());
        record.push(file_type);
        record.extend(field::encode_u16(self.t_info1 as i64));
        record.extend(field::encode_u16(self.t_info2 as i64));
        record.extend(field::encode_u16(self.t_info3 as i64));
        record.extend(field::encode_u16(self.t_info4 as i64));
        record.push(self.comment_lines);
        record.push(self.t_flags);
        record.extend(field::encode_cstring(
            self.t_info_s.as_ref(),
            SauceField::TInfoS.size(),
        ));

        debug_assert_eq!(record.len(), RECORD_LEN);
        record
    }

    /// Serialize the record to a writer.
    ///
    /// # Errors
    ///
    /// Returns [`SauceError::Io`] if writing fails.
    pub fn write<A: std::io::Write>(&self, writer: &mut A) -> crate::Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }
}
