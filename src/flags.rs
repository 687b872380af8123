//! ANSi display flags stored in the TFlags byte.
//!
//! For ANSi-flavored media (ASCII, ANSi, ANSiMation, BinaryText) the TFlags
//! byte carries three display hints in its lower five bits:
//!
//! ```text
//! bit  4   3   2   1   0
//!     AR1 AR0 LS1 LS0 NB
//! ```
//!
//! - `NB` — non-blink ("iCE color") mode.
//! - `LS` — letter spacing: 00 none, 01 eight-pixel font, 10 nine-pixel font.
//! - `AR` — aspect ratio: 00 none, 01 legacy device, 10 modern square pixels.
//!
//! The `11` states of both two-bit groups are reserved; they decode as
//! [`LetterSpacingMode::Invalid`] / [`AspectRatioMode::Invalid`] and encode
//! back bit-exactly, so repair tooling can observe them without destroying
//! them.

const FLAG_NON_BLINK: u8 = 0b0000_0001;

const MASK_LETTER_SPACING: u8 = 0b0000_0110;
const LETTER_SPACING_NONE: u8 = 0b0000_0000;
const LETTER_SPACING_8PX: u8 = 0b0000_0010;
const LETTER_SPACING_9PX: u8 = 0b0000_0100;

const MASK_ASPECT_RATIO: u8 = 0b0001_1000;
const ASPECT_RATIO_NONE: u8 = 0b0000_0000;
const ASPECT_RATIO_LEGACY: u8 = 0b0000_1000;
const ASPECT_RATIO_MODERN: u8 = 0b0001_0000;

/// Letter-spacing preference (LS bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LetterSpacingMode {
    /// No preference (00).
    #[default]
    None,
    /// Select the 8-pixel wide font (01).
    EightPixel,
    /// Select the 9-pixel wide font (10).
    NinePixel,
    /// Reserved bit pattern (11).
    Invalid,
}

/// Aspect-ratio preference (AR bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatioMode {
    /// No preference (00).
    #[default]
    None,
    /// Image was created for a legacy device with stretched pixels (01).
    Legacy,
    /// Image was created for modern square pixels (10).
    Modern,
    /// Reserved bit pattern (11).
    Invalid,
}

/// Decoded TFlags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnsiFlags {
    pub non_blink_mode: bool,
    pub letter_spacing: LetterSpacingMode,
    pub aspect_ratio: AspectRatioMode,
}

impl AnsiFlags {
    /// Decode a raw TFlags byte. Bits 5–7 are ignored.
    pub fn from_byte(byte: u8) -> Self {
        let letter_spacing = match byte & MASK_LETTER_SPACING {
            LETTER_SPACING_NONE => LetterSpacingMode::None,
            LETTER_SPACING_8PX => LetterSpacingMode::EightPixel,
            LETTER_SPACING_9PX => LetterSpacingMode::NinePixel,
            _ => LetterSpacingMode::Invalid,
        };
        let aspect_ratio = match byte & MASK_ASPECT_RATIO {
            ASPECT_RATIO_NONE => AspectRatioMode::None,
            ASPECT_RATIO_LEGACY => AspectRatioMode::Legacy,
            ASPECT_RATIO_MODERN => AspectRatioMode::Modern,
            _ => AspectRatioMode::Invalid,
        };
        AnsiFlags {
            non_blink_mode: byte & FLAG_NON_BLINK != 0,
            letter_spacing,
            aspect_ratio,
        }
    }

    /// Decode from an arbitrary integer: only the low 8 bits are considered,
    /// negative inputs wrap two's-complement.
    pub fn from_bits(bits: i64) -> Self {
        Self::from_byte(bits as u8)
    }

    /// Encode back to a TFlags byte.
    pub fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.non_blink_mode {
            byte |= FLAG_NON_BLINK;
        }
        byte |= match self.letter_spacing {
            LetterSpacingMode::None => LETTER_SPACING_NONE,
            LetterSpacingMode::EightPixel => LETTER_SPACING_8PX,
            LetterSpacingMode::NinePixel => LETTER_SPACING_9PX,
            LetterSpacingMode::Invalid => MASK_LETTER_SPACING,
        };
        byte |= match self.aspect_ratio {
            AspectRatioMode::None => ASPECT_RATIO_NONE,
            AspectRatioMode::Legacy => ASPECT_RATIO_LEGACY,
            AspectRatioMode::Modern => ASPECT_RATIO_MODERN,
            AspectRatioMode::Invalid => MASK_ASPECT_RATIO,
        };
        byte
    }
}

impl From<u8> for AnsiFlags {
    fn from(byte: u8) -> Self {
        AnsiFlags::from_byte(byte)
    }
}

impl From<AnsiFlags> for u8 {
    fn from(flags: AnsiFlags) -> u8 {
        flags.to_byte()
    }
}

impl std::fmt::Display for AnsiFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "non_blink={} letter_spacing={:?} aspect_ratio={:?}",
            self.non_blink_mode, self.letter_spacing, self.aspect_ratio
        )
    }
}
