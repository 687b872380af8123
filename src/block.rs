//! The logical SAUCE block: record plus comment lines.
//!
//! [`SauceBlock`] is what decoding produces and what encoding consumes. The
//! comment lines live here, not in the record — the record's comment count
//! is derived from the list on every encode, which is how the crate repairs
//! the count/length mismatches that stale writers leave behind.

use bstr::BString;

use crate::date::SauceDate;
use crate::encodings;
use crate::flags::AnsiFlags;
use crate::fonts::SauceFont;
use crate::header::SauceHeader;
use crate::media::{InfoSlot, Media, SlotMeaning, SlotValue};
use crate::schema::{COMMENT_ID, COMMENT_ID_LEN, COMMENT_LINE_LEN, RECORD_LEN, sauce_block_len};
use crate::util::sauce_pad;
use crate::{SauceDataType, SauceError, limits};

/// A complete SAUCE block: the 128-byte record and any comment lines.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SauceBlock {
    pub(crate) header: SauceHeader,

    /// Up to 255 comments, each 64 bytes long max.
    pub(crate) comments: Vec<BString>,
}

/// Decode a comment block holding `expected` lines.
///
/// - `expected == 0` decodes to an empty list without looking at the bytes.
/// - Anything that does not open with `"COMNT"` is [`SauceError::NoComments`].
/// - Short input is tolerated: lines are peeled off until `expected` lines
///   are consumed or the input runs out. All-NUL lines (zero-filled slots)
///   are dropped; blank lines survive as empty strings.
pub fn decode_comments(bytes: &[u8], expected: u8) -> crate::Result<Vec<BString>> {
    if expected == 0 {
        return Ok(Vec::new());
    }
    if bytes.len() < COMMENT_ID_LEN || &bytes[..COMMENT_ID_LEN] != COMMENT_ID {
        return Err(SauceError::NoComments);
    }

    let mut comments = Vec::new();
    let mut rest = &bytes[COMMENT_ID_LEN..];
    for _ in 0..expected {
        if rest.len() < COMMENT_LINE_LEN {
            break;
        }
        let (line, tail) = rest.split_at(COMMENT_LINE_LEN);
        rest = tail;
        if line.iter().all(|&b| b == 0) {
            continue;
        }
        comments.push(crate::field::decode_text(line));
    }
    Ok(comments)
}

impl SauceBlock {
    /// Construct a block from a decoded record and comment lines.
    pub fn new(header: SauceHeader, comments: Vec<BString>) -> Self {
        SauceBlock { header, comments }
    }

    /// Decode a SAUCE block from the tail of file data.
    ///
    /// The record is taken from the last 128 bytes. If it announces
    /// comments, the comment block is expected immediately before it; a
    /// missing or malformed comment block (a very common defect — the count
    /// field goes stale) is tolerated and decodes as *no comments*.
    ///
    /// # Errors
    ///
    /// - [`SauceError::NoSauce`] when there is no record.
    /// - [`SauceError::InvalidSauce`] when the record is a zero-filled
    ///   placeholder or its version field is unreadable.
    pub fn from_bytes(data: &[u8]) -> crate::Result<Self> {
        let header = SauceHeader::from_bytes(data)?;

        let mut comments = Vec::new();
        if header.comment_lines > 0 {
            let expected = sauce_block_len(header.comment_lines);
            if data.len() < expected {
                log::warn!(
                    "SAUCE record announces {} comment lines but the file is too short - ignoring comments",
                    header.comment_lines
                );
            } else {
                let comment_bytes = &data[data.len() - expected..data.len() - RECORD_LEN];
                match decode_comments(comment_bytes, header.comment_lines) {
                    Ok(lines) => comments = lines,
                    Err(_) => {
                        log::warn!("SAUCE comment block missing COMNT ID - ignoring comments");
                    }
                }
            }
        }

        Ok(SauceBlock { header, comments })
    }

    /// Serialize the comment block; empty bytes when there are no comments.
    pub fn encode_comments(&self) -> Vec<u8> {
        if self.comments.is_empty() {
            return Vec::new();
        }
        let length = COMMENT_ID_LEN + self.comments.len() * COMMENT_LINE_LEN;
        let mut block = Vec::with_capacity(length);
        block.extend_from_slice(COMMENT_ID);
        for comment in &self.comments {
            block.extend(sauce_pad(comment, COMMENT_LINE_LEN));
        }
        debug_assert_eq!(block.len(), length);
        block
    }

    /// Serialize the whole block (comment block first, then the record).
    ///
    /// The record's comment count is derived from the comment list, never
    /// taken from a previously decoded value. No EOF character is included;
    /// the buffer and file writers decide whether one is needed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut header = self.header.clone();
        header.comment_lines = self.comment_lines();

        let mut data = self.encode_comments();
        data.extend(header.to_bytes());
        data
    }

    /// Serialize the block to a writer, optionally preceded by the EOF
    /// character.
    ///
    /// # Errors
    ///
    /// Returns [`SauceError::Io`] if writing fails.
    pub fn write<A: std::io::Write>(&self, writer: &mut A, prepend_eof: bool) -> crate::Result<()> {
        if prepend_eof {
            writer.write_all(&[crate::schema::EOF_CHAR])?;
        }
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Total byte length of the serialized block (without an EOF character).
    pub fn len(&self) -> usize {
        sauce_block_len(self.comment_lines())
    }

    /// A SAUCE block is never empty; the record alone is 128 bytes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The comment count as it will be written to the record.
    pub fn comment_lines(&self) -> u8 {
        self.comments.len().min(limits::MAX_COMMENTS) as u8
    }

    pub fn header(&self) -> &SauceHeader {
        &self.header
    }

    pub fn version(&self) -> &BString {
        &self.header.version
    }

    pub fn title(&self) -> &BString {
        &self.header.title
    }

    pub fn author(&self) -> &BString {
        &self.header.author
    }

    pub fn group(&self) -> &BString {
        &self.header.group
    }

    pub fn date(&self) -> Option<&SauceDate> {
        self.header.date.as_ref()
    }

    pub fn file_size(&self) -> u32 {
        self.header.file_size
    }

    pub fn data_type(&self) -> SauceDataType {
        self.header.data_type
    }

    pub fn file_type(&self) -> u8 {
        self.header.file_type
    }

    /// The media type the record's `(file_type, data_type)` pair resolves to.
    pub fn media(&self) -> Media {
        self.header.media()
    }

    pub fn comments(&self) -> &[BString] {
        &self.comments
    }

    /// Comments decoded to text and joined with `separator`.
    pub fn formatted_comments(&self, separator: &str) -> String {
        self.comments
            .iter()
            .map(|line| encodings::decode_text(line))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Append one comment line.
    ///
    /// # Errors
    ///
    /// [`SauceError::CommentLimitExceeded`] past 255 lines,
    /// [`SauceError::CommentTooLong`] past 64 bytes.
    pub fn add_comment(&mut self, comment: BString) -> crate::Result<()> {
        if self.comments.len() >= limits::MAX_COMMENTS {
            return Err(SauceError::CommentLimitExceeded);
        }
        if comment.len() > limits::MAX_COMMENT_LENGTH {
            return Err(SauceError::CommentTooLong(comment.len()));
        }
        self.comments.push(comment);
        Ok(())
    }

    /// Insert one comment line at the front.
    ///
    /// # Errors
    ///
    /// As [`add_comment`](Self::add_comment).
    pub fn prepend_comment(&mut self, comment: BString) -> crate::Result<()> {
        if self.comments.len() >= limits::MAX_COMMENTS {
            return Err(SauceError::CommentLimitExceeded);
        }
        if comment.len() > limits::MAX_COMMENT_LENGTH {
            return Err(SauceError::CommentTooLong(comment.len()));
        }
        self.comments.insert(0, comment);
        Ok(())
    }

    /// Append several comment lines; stops at the first invalid line.
    ///
    /// # Errors
    ///
    /// As [`add_comment`](Self::add_comment).
    pub fn add_comments<I: IntoIterator<Item = BString>>(&mut self, lines: I) -> crate::Result<()> {
        for line in lines {
            self.add_comment(line)?;
        }
        Ok(())
    }

    /// Drop all comment lines.
    pub fn clear_comments(&mut self) {
        self.comments.clear();
    }

    /// Interpret the TInfo1 slot under this block's media type.
    pub fn t_info1(&self) -> Option<(SlotMeaning, SlotValue)> {
        self.media().interpret(InfoSlot::Info1, &self.header)
    }

    /// Interpret the TInfo2 slot under this block's media type.
    pub fn t_info2(&self) -> Option<(SlotMeaning, SlotValue)> {
        self.media().interpret(InfoSlot::Info2, &self.header)
    }

    /// Interpret the TInfo3 slot under this block's media type.
    pub fn t_info3(&self) -> Option<(SlotMeaning, SlotValue)> {
        self.media().interpret(InfoSlot::Info3, &self.header)
    }

    /// Interpret the TInfo4 slot under this block's media type.
    pub fn t_info4(&self) -> Option<(SlotMeaning, SlotValue)> {
        self.media().interpret(InfoSlot::Info4, &self.header)
    }

    /// Interpret the TFlags slot under this block's media type.
    pub fn t_flags(&self) -> Option<(SlotMeaning, SlotValue)> {
        self.media().interpret(InfoSlot::Flags, &self.header)
    }

    /// Interpret the TInfoS slot under this block's media type.
    pub fn t_info_s(&self) -> Option<(SlotMeaning, SlotValue)> {
        self.media().interpret(InfoSlot::InfoS, &self.header)
    }

    /// Flatten record fields and media interpretation into one descriptor
    /// list for UIs. Blank fields and unused slots are omitted.
    pub fn details(&self) -> Vec<Detail> {
        let mut details = vec![Detail {
            name: "version",
            value: DetailValue::Text(encodings::decode_text(&self.header.version)),
        }];

        for (name, text) in [
            ("title", &self.header.title),
            ("author", &self.header.author),
            ("group", &self.header.group),
        ] {
            if !text.is_empty() {
                details.push(Detail {
                    name,
                    value: DetailValue::Text(encodings::decode_text(text)),
                });
            }
        }

        if let Some(date) = self.header.date {
            details.push(Detail {
                name: "date",
                value: DetailValue::Date(date),
            });
        }

        details.push(Detail {
            name: "data_type",
            value: DetailValue::Text(self.data_type().name().to_string()),
        });
        details.push(Detail {
            name: "media",
            value: DetailValue::Text(self.media().name().to_string()),
        });
        if self.header.file_size > 0 {
            details.push(Detail {
                name: "file_size",
                value: DetailValue::Number(self.header.file_size),
            });
        }

        for slot in InfoSlot::ALL {
            if let Some((meaning, value)) = self.media().interpret(slot, &self.header) {
                details.push(Detail {
                    name: meaning.name(),
                    value: match value {
                        SlotValue::Number(n) => DetailValue::Number(n as u32),
                        SlotValue::Flags(flags) => DetailValue::Flags(flags),
                        SlotValue::Font(font) => DetailValue::Font(font),
                        SlotValue::Text(text) => {
                            DetailValue::Text(encodings::decode_text(&text))
                        }
                    },
                });
            }
        }

        if !self.comments.is_empty() {
            details.push(Detail {
                name: "comments",
                value: DetailValue::List(
                    self.comments
                        .iter()
                        .map(|line| encodings::decode_text(line))
                        .collect(),
                ),
            });
        }

        details
    }
}

/// One entry of [`SauceBlock::details`].
#[derive(Clone, Debug, PartialEq)]
pub struct Detail {
    pub name: &'static str,
    pub value: DetailValue,
}

/// A typed detail value.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailValue {
    Text(String),
    Number(u32),
    Date(SauceDate),
    Flags(AnsiFlags),
    Font(&'static SauceFont),
    List(Vec<String>),
}

impl std::fmt::Display for DetailValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailValue::Text(text) => f.write_str(text),
            DetailValue::Number(n) => write!(f, "{n}"),
            DetailValue::Date(date) => write!(f, "{date}"),
            DetailValue::Flags(flags) => write!(f, "{flags}"),
            DetailValue::Font(font) => f.write_str(font.name),
            DetailValue::List(lines) => f.write_str(&lines.join(" / ")),
        }
    }
}
