//! Builder for constructing SAUCE blocks.
//!
//! A fluent API that enforces the SAUCE field constraints as each value is
//! set, so only encodable blocks can be built. Lengths are validated here;
//! the codec itself never fails on a built block (it pads and truncates
//! authoritatively).
//!
//! # Example
//!
//! ```
//! use sauce_codec::{AnsiFlags, Media, SauceBlockBuilder, SauceDate};
//! use bstr::BString;
//!
//! let block = SauceBlockBuilder::default()
//!     .title(BString::from("Winter Scene"))?
//!     .author(BString::from("Artist"))?
//!     .group(BString::from("Group"))?
//!     .date(SauceDate::new(1994, 8, 31))
//!     .media(Media::Ansi)
//!     .character_size(80, 25)
//!     .font(BString::from("IBM VGA"))?
//!     .add_comment(BString::from("greets to the scene"))?
//!     .build();
//!
//! assert_eq!(block.comment_lines(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use bstr::BString;

use crate::block::SauceBlock;
use crate::date::SauceDate;
use crate::flags::AnsiFlags;
use crate::header::SauceHeader;
use crate::media::Media;
use crate::{SauceDataType, SauceError, limits};

/// Builder for [`SauceBlock`] with field validation.
///
/// # Field Constraints
///
/// - **Title**: maximum 35 bytes
/// - **Author**: maximum 20 bytes
/// - **Group**: maximum 20 bytes
/// - **Font name**: maximum 22 bytes
/// - **Comments**: maximum 255 lines, each up to 64 bytes
///
/// Defaults are an empty record: version `"00"`, blank strings, no date,
/// media [`Media::None`], zeroed type-dependent fields.
#[derive(Default)]
pub struct SauceBlockBuilder {
    header: SauceHeader,
    comments: Vec<BString>,
}

impl SauceBlockBuilder {
    /// Set the title field.
    ///
    /// # Errors
    ///
    /// [`SauceError::TitleTooLong`] past 35 bytes.
    pub fn title(mut self, title: BString) -> crate::Result<Self> {
        if title.len() > limits::MAX_TITLE_LENGTH {
            return Err(SauceError::TitleTooLong(title.len()));
        }
        self.header.title = title;
        Ok(self)
    }

    /// Set the author field.
    ///
    /// # Errors
    ///
    /// [`SauceError::AuthorTooLong`] past 20 bytes.
    pub fn author(mut self, author: BString) -> crate::Result<Self> {
        if author.len() > limits::MAX_AUTHOR_LENGTH {
            return Err(SauceError::AuthorTooLong(author.len()));
        }
        self.header.author = author;
        Ok(self)
    }

    /// Set the group field.
    ///
    /// # Errors
    ///
    /// [`SauceError::GroupTooLong`] past 20 bytes.
    pub fn group(mut self, group: BString) -> crate::Result<Self> {
        if group.len() > limits::MAX_GROUP_LENGTH {
            return Err(SauceError::GroupTooLong(group.len()));
        }
        self.header.group = group;
        Ok(self)
    }

    /// Set the creation date.
    pub fn date(mut self, date: SauceDate) -> Self {
        self.header.date = Some(date);
        self
    }

    /// Clear the creation date (stored as blanks on the wire).
    pub fn no_date(mut self) -> Self {
        self.header.date = None;
        self
    }

    /// Set the original file size. Sizes past the 32-bit limit are stored
    /// as 0 per the format rules.
    pub fn file_size(mut self, file_size: u64) -> Self {
        self.header.file_size = u32::try_from(file_size).unwrap_or(0);
        self
    }

    /// Set the data type directly, leaving the file type untouched.
    /// Prefer [`media`](Self::media), which sets the pair coherently.
    pub fn data_type(mut self, data_type: SauceDataType) -> Self {
        self.header.data_type = data_type;
        self
    }

    /// Set the `(file_type, data_type)` pair from a media type.
    pub fn media(mut self, media: Media) -> Self {
        let (file_type, data_type) = media.handle();
        self.header.file_type = file_type;
        self.header.data_type = data_type;
        self
    }

    /// Set character dimensions (TInfo1 = width, TInfo2 = lines).
    pub fn character_size(mut self, width: u16, lines: u16) -> Self {
        self.header.t_info1 = width;
        self.header.t_info2 = lines;
        self
    }

    /// Set pixel dimensions and depth for raster media
    /// (TInfo1/TInfo2/TInfo3).
    pub fn pixel_size(mut self, width: u16, height: u16, depth: u16) -> Self {
        self.header.t_info1 = width;
        self.header.t_info2 = height;
        self.header.t_info3 = depth;
        self
    }

    /// Set the sample rate for sampled audio media (TInfo1).
    pub fn sample_rate(mut self, rate: u16) -> Self {
        self.header.t_info1 = rate;
        self
    }

    /// Configure BinaryText: sets the data type and stores `columns / 2` in
    /// the file type byte.
    ///
    /// # Errors
    ///
    /// [`SauceError::BinaryTextWidthInvalid`] unless `columns` is even and
    /// between 2 and 510.
    pub fn binary_text_width(mut self, columns: u16) -> crate::Result<Self> {
        if columns == 0 || columns % 2 != 0 || columns > 510 {
            return Err(SauceError::BinaryTextWidthInvalid(columns));
        }
        self.header.data_type = SauceDataType::BinaryText;
        self.header.file_type = (columns / 2) as u8;
        Ok(self)
    }

    /// Set one of the raw TInfo slots.
    pub fn t_info1(mut self, value: u16) -> Self {
        self.header.t_info1 = value;
        self
    }

    /// Set one of the raw TInfo slots.
    pub fn t_info2(mut self, value: u16) -> Self {
        self.header.t_info2 = value;
        self
    }

    /// Set one of the raw TInfo slots.
    pub fn t_info3(mut self, value: u16) -> Self {
        self.header.t_info3 = value;
        self
    }

    /// Set one of the raw TInfo slots.
    pub fn t_info4(mut self, value: u16) -> Self {
        self.header.t_info4 = value;
        self
    }

    /// Set the TFlags byte from decoded ANSi flags.
    pub fn ansi_flags(mut self, flags: AnsiFlags) -> Self {
        self.header.t_flags = flags.to_byte();
        self
    }

    /// Set the raw TFlags byte.
    pub fn t_flags(mut self, flags: u8) -> Self {
        self.header.t_flags = flags;
        self
    }

    /// Set the font name stored in TInfoS. An empty name clears the field.
    ///
    /// # Errors
    ///
    /// [`SauceError::FontNameTooLong`] past 22 bytes.
    pub fn font(mut self, font: BString) -> crate::Result<Self> {
        if font.len() > limits::MAX_FONT_NAME_LENGTH {
            return Err(SauceError::FontNameTooLong(font.len()));
        }
        self.header.t_info_s = if font.is_empty() { None } else { Some(font) };
        Ok(self)
    }

    /// Append a comment line.
    ///
    /// # Errors
    ///
    /// [`SauceError::CommentLimitExceeded`] past 255 lines,
    /// [`SauceError::CommentTooLong`] past 64 bytes.
    pub fn add_comment(mut self, comment: BString) -> crate::Result<Self> {
        if self.comments.len() >= limits::MAX_COMMENTS {
            return Err(SauceError::CommentLimitExceeded);
        }
        if comment.len() > limits::MAX_COMMENT_LENGTH {
            return Err(SauceError::CommentTooLong(comment.len()));
        }
        self.comments.push(comment);
        Ok(self)
    }

    /// Finalize into a [`SauceBlock`]. The record's comment count is
    /// derived from the comment list.
    pub fn build(mut self) -> SauceBlock {
        self.header.comment_lines = self.comments.len().min(limits::MAX_COMMENTS) as u8;
        SauceBlock::new(self.header, self.comments)
    }
}

impl SauceBlock {
    /// Convert this block back into a builder for modification.
    pub fn to_builder(&self) -> SauceBlockBuilder {
        SauceBlockBuilder {
            header: self.header.clone(),
            comments: self.comments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors() {
        let long_title = BString::from("x".repeat(36));
        assert!(matches!(
            SauceBlockBuilder::default().title(long_title),
            Err(SauceError::TitleTooLong(36))
        ));

        assert!(matches!(
            SauceBlockBuilder::default().binary_text_width(161),
            Err(SauceError::BinaryTextWidthInvalid(161))
        ));
    }

    #[test]
    fn binary_text_width_is_halved() {
        let block = SauceBlockBuilder::default()
            .binary_text_width(160)
            .unwrap()
            .build();
        assert_eq!(block.file_type(), 80);
        assert_eq!(block.media(), Media::BinaryText);
    }

    #[test]
    fn media_sets_the_pair() {
        let block = SauceBlockBuilder::default().media(Media::Gif).build();
        assert_eq!(block.data_type(), SauceDataType::Bitmap);
        assert_eq!(block.file_type(), 0);
        assert_eq!(block.media(), Media::Gif);
    }

    #[test]
    fn oversize_file_size_stores_zero() {
        let block = SauceBlockBuilder::default()
            .file_size(u64::from(u32::MAX) + 1)
            .build();
        assert_eq!(block.file_size(), 0);
    }
}
