//! Record layout schema.
//!
//! Single source of truth for the 128-byte SAUCE record layout. Every other
//! layer is parametrized by these offsets and sizes; nothing else in the
//! crate spells out a field position as a literal.
//!
//! | Offset | Length | Field      | Type     |
//! |--------|--------|------------|----------|
//! | 0      | 5      | ID         | char[5]  |
//! | 5      | 2      | Version    | char[2]  |
//! | 7      | 35     | Title      | char[35] |
//! | 42     | 20     | Author     | char[20] |
//! | 62     | 20     | Group      | char[20] |
//! | 82     | 8      | Date       | char[8]  |
//! | 90     | 4      | FileSize   | u32 LE   |
//! | 94     | 1      | DataType   | u8       |
//! | 95     | 1      | FileType   | u8       |
//! | 96     | 2      | TInfo1     | u16 LE   |
//! | 98     | 2      | TInfo2     | u16 LE   |
//! | 100    | 2      | TInfo3     | u16 LE   |
//! | 102    | 2      | TInfo4     | u16 LE   |
//! | 104    | 1      | Comments   | u8       |
//! | 105    | 1      | TFlags     | u8       |
//! | 106    | 22     | TInfoS     | char[22] |
//!
//! **Total: 128 bytes**

/// Byte length of the SAUCE record.
pub const RECORD_LEN: usize = 128;

/// The five magic bytes opening every record.
pub const SAUCE_ID: &[u8; 5] = b"SAUCE";

/// The five magic bytes opening every comment block.
pub const COMMENT_ID: &[u8; 5] = b"COMNT";

/// Byte length of the "COMNT" tag.
pub const COMMENT_ID_LEN: usize = 5;

/// Byte length of a single comment line.
pub const COMMENT_LINE_LEN: usize = 64;

/// Smallest possible comment block: the tag plus one line.
pub const MIN_COMMENT_BLOCK_LEN: usize = COMMENT_ID_LEN + COMMENT_LINE_LEN;

/// The EOF character separating contents from the SAUCE block.
pub const EOF_CHAR: u8 = 0x1A;

/// Byte length of a comment block holding `lines` comment lines.
/// Zero lines means no block at all.
pub const fn comment_block_len(lines: u8) -> usize {
    if lines == 0 {
        0
    } else {
        COMMENT_ID_LEN + lines as usize * COMMENT_LINE_LEN
    }
}

/// Byte length of a whole SAUCE block (record plus optional comment block).
pub const fn sauce_block_len(lines: u8) -> usize {
    RECORD_LEN + comment_block_len(lines)
}

/// The sixteen fields of a SAUCE record, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SauceField {
    Id,
    Version,
    Title,
    Author,
    Group,
    Date,
    FileSize,
    DataType,
    FileType,
    TInfo1,
    TInfo2,
    TInfo3,
    TInfo4,
    CommentLines,
    TFlags,
    TInfoS,
}

impl SauceField {
    /// All fields in wire order. Consecutive entries tile `[0, 128)` with no
    /// gaps, which the tests assert.
    pub const ALL: [SauceField; 16] = [
        SauceField::Id,
        SauceField::Version,
        SauceField::Title,
        SauceField::Author,
        SauceField::Group,
        SauceField::Date,
        SauceField::FileSize,
        SauceField::DataType,
        SauceField::FileType,
        SauceField::TInfo1,
        SauceField::TInfo2,
        SauceField::TInfo3,
        SauceField::TInfo4,
        SauceField::CommentLines,
        SauceField::TFlags,
        SauceField::TInfoS,
    ];

    /// Byte offset of the field inside the 128-byte record.
    pub const fn offset(self) -> usize {
        match self {
            SauceField::Id => 0,
            SauceField::Version => 5,
            SauceField::Title => 7,
            SauceField::Author => 42,
            SauceField::Group => 62,
            SauceField::Date => 82,
            SauceField::FileSize => 90,
            SauceField::DataType => 94,
            SauceField::FileType => 95,
            SauceField::TInfo1 => 96,
            SauceField::TInfo2 => 98,
            SauceField::TInfo3 => 100,
            SauceField::TInfo4 => 102,
            SauceField::CommentLines => 104,
            SauceField::TFlags => 105,
            SauceField::TInfoS => 106,
        }
    }

    /// Byte size of the field.
    pub const fn size(self) -> usize {
        match self {
            SauceField::Id => 5,
            SauceField::Version => 2,
            SauceField::Title => 35,
            SauceField::Author => 20,
            SauceField::Group => 20,
            SauceField::Date => 8,
            SauceField::FileSize => 4,
            SauceField::DataType => 1,
            SauceField::FileType => 1,
            SauceField::TInfo1 => 2,
            SauceField::TInfo2 => 2,
            SauceField::TInfo3 => 2,
            SauceField::TInfo4 => 2,
            SauceField::CommentLines => 1,
            SauceField::TFlags => 1,
            SauceField::TInfoS => 22,
        }
    }

    /// Fields a record cannot be assembled without. The rest default to
    /// zero/blank when absent from caller input.
    pub const fn required() -> [SauceField; 2] {
        [SauceField::Id, SauceField::Version]
    }

    /// The byte range of this field inside a record slice.
    pub const fn range(self) -> std::ops::Range<usize> {
        self.offset()..self.offset() + self.size()
    }
}
