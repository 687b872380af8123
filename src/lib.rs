//! Reading, writing, repairing and introspecting SAUCE metadata.
//!
//! SAUCE (Standard Architecture for Universal Comment Extensions) is a
//! 128-byte record appended to the end of a file, optionally preceded by a
//! comment block of up to 255 lines of 64 bytes each. An EOF character
//! (`0x1A`) separates the file contents from the SAUCE block so DOS-era
//! viewers stop before the metadata.
//!
//! Blocks found in the wild are frequently malformed: wrong comment counts,
//! missing EOF characters, zero-filled placeholder records, stale comment
//! blocks left behind by sloppy writers. This crate reads tolerantly and
//! writes authoritatively.
//!
//! # Layout
//!
//! ```text
//! [contents] [0x1A] [COMNT + n * 64-byte lines]? [128-byte record]
//! ```
//!
//! # Reading
//!
//! ```no_run
//! let data = std::fs::read("example.ans")?;
//! let block = sauce_codec::buffer::sauce(&data)?;
//! println!("Title: {}", block.title());
//! for detail in block.details() {
//!     println!("{}: {}", detail.name, detail.value);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Writing
//!
//! ```
//! use sauce_codec::{Media, SauceBlockBuilder, SauceDate};
//! use bstr::BString;
//!
//! let block = SauceBlockBuilder::default()
//!     .title(BString::from("My ANSI Art"))?
//!     .author(BString::from("Artist"))?
//!     .group(BString::from("Group"))?
//!     .date(SauceDate::new(1994, 8, 31))
//!     .media(Media::Ansi)
//!     .character_size(80, 25)
//!     .build();
//!
//! let file = sauce_codec::buffer::write(b"content", &block);
//! assert!(sauce_codec::buffer::has_sauce(&file));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The same operations are available positionally over files via [`file`],
//! which reads backward from the end of the stream and never loads more than
//! the SAUCE block itself into memory.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SauceError>;

pub mod binary;
pub mod buffer;
pub mod encodings;
pub mod field;
pub mod file;
pub mod flags;
pub mod fonts;
pub mod limits;
pub mod media;
pub mod schema;
pub mod util;

mod block;
mod builder;
mod date;
mod header;

pub mod prelude;

pub use block::{Detail, DetailValue, SauceBlock};
pub use builder::SauceBlockBuilder;
pub use date::SauceDate;
pub use flags::{AnsiFlags, AspectRatioMode, LetterSpacingMode};
pub use fonts::{FontEncoding, FontOptions, SauceFont};
pub use header::SauceHeader;
pub use media::{InfoSlot, Media, SlotMeaning, SlotValue};
pub use schema::SauceField;

#[derive(Error, Debug)]
pub enum SauceError {
    /// The buffer or file does not end in a SAUCE record.
    #[error("no SAUCE record found")]
    NoSauce,

    /// The record announces comments but no comment block is present.
    #[error("no SAUCE comment block found")]
    NoComments,

    /// A record is present but structurally broken (zero-filled placeholder
    /// or unreadable version field).
    #[error("invalid SAUCE record: {0}")]
    InvalidSauce(&'static str),

    /// A raw helper was handed a slice of the wrong size.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("comment limit exceeded (255)")]
    CommentLimitExceeded,

    #[error("comment too long: {0} bytes only up to 64 bytes are allowed.")]
    CommentTooLong(usize),

    #[error("title too long: {0} bytes only up to 35 bytes are allowed.")]
    TitleTooLong(usize),

    #[error("author too long: {0} bytes only up to 20 bytes are allowed.")]
    AuthorTooLong(usize),

    #[error("group too long: {0} bytes only up to 20 bytes are allowed.")]
    GroupTooLong(usize),

    #[error("font name too long: {0} bytes only up to 22 bytes are allowed.")]
    FontNameTooLong(usize),

    #[error("binary text width must be even and between 2 and 510: {0}")]
    BinaryTextWidthInvalid(u16),
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SauceDataType {
    /// None / Undefined (spec DataType 0)
    #[default]
    None = 0,
    /// A character based file.
    /// These files are typically interpreted sequentially. Also known as streams.
    Character = 1,
    /// Bitmap graphic and animation files.
    Bitmap = 2,
    /// A vector graphic file.
    Vector = 3,
    /// An audio file.
    Audio = 4,
    /// Raw memory copy of a text mode screen (.BIN file)
    BinaryText = 5,
    /// XBin or eXtended BIN file.
    XBin = 6,
    /// Archive file.
    Archive = 7,
    /// Executable file.
    Executable = 8,
}

impl From<u8> for SauceDataType {
    /// Bytes outside the nine canonical types decode as [`SauceDataType::None`].
    fn from(byte: u8) -> SauceDataType {
        match byte {
            1 => SauceDataType::Character,
            2 => SauceDataType::Bitmap,
            3 => SauceDataType::Vector,
            4 => SauceDataType::Audio,
            5 => SauceDataType::BinaryText,
            6 => SauceDataType::XBin,
            7 => SauceDataType::Archive,
            8 => SauceDataType::Executable,
            _ => SauceDataType::None,
        }
    }
}

impl From<SauceDataType> for u8 {
    fn from(data_type: SauceDataType) -> u8 {
        data_type as u8
    }
}

impl SauceDataType {
    /// The nine canonical data types, in spec order.
    pub const ALL: [SauceDataType; 9] = [
        SauceDataType::None,
        SauceDataType::Character,
        SauceDataType::Bitmap,
        SauceDataType::Vector,
        SauceDataType::Audio,
        SauceDataType::BinaryText,
        SauceDataType::XBin,
        SauceDataType::Archive,
        SauceDataType::Executable,
    ];

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            SauceDataType::None => "None",
            SauceDataType::Character => "Character",
            SauceDataType::Bitmap => "Bitmap",
            SauceDataType::Vector => "Vector",
            SauceDataType::Audio => "Audio",
            SauceDataType::BinaryText => "BinaryText",
            SauceDataType::XBin => "XBin",
            SauceDataType::Archive => "Archive",
            SauceDataType::Executable => "Executable",
        }
    }
}

impl std::fmt::Display for SauceDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::SauceDataType;

    #[test]
    fn data_type_roundtrip() {
        for dt in SauceDataType::ALL {
            assert_eq!(SauceDataType::from(u8::from(dt)), dt);
        }
    }

    #[test]
    fn unknown_data_type_coerces_to_none() {
        assert_eq!(SauceDataType::from(9), SauceDataType::None);
        assert_eq!(SauceDataType::from(255), SauceDataType::None);
    }
}
