//! Crate prelude: convenient re-exports of the most commonly used
//! types, enums, and builders for working with SAUCE metadata.
//!
//! Importing the prelude lets you get started quickly without a long
//! list of individual `use` statements:
//!
//! ```
//! use sauce_codec::prelude::*;
//! use bstr::BString;
//!
//! let block = SauceBlockBuilder::default()
//!     .title(BString::from("Example"))?
//!     .author(BString::from("Me"))?
//!     .date(SauceDate::new(2025, 11, 8))
//!     .media(Media::Ansi)
//!     .character_size(80, 25)
//!     .build();
//!
//! assert_eq!(block.media(), Media::Ansi);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The prelude intentionally omits the low-level layers (`binary`, `field`,
//! `schema`) to keep the import surface focused; reach for those through
//! the crate root when repairing malformed files.

pub use crate::{
    // Core block & builder
    SauceBlock,
    SauceBlockBuilder,
    // Record & date
    SauceHeader,
    SauceDate,
    // Enums & errors
    SauceDataType,
    SauceError,
    Result,
    // Media registry
    Media,
    InfoSlot,
    SlotMeaning,
    SlotValue,
    // Flags & fonts
    AnsiFlags,
    AspectRatioMode,
    LetterSpacingMode,
    FontEncoding,
    FontOptions,
    SauceFont,
    // Detail listing
    Detail,
    DetailValue,
};
