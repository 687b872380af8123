//! Media type registry.
//!
//! A SAUCE record identifies its payload through the `(data_type, file_type)`
//! pair; everything type-dependent (what TInfo1..4, TFlags and TInfoS mean)
//! hangs off that pair. This module is the one declarative table for the
//! mapping: every known media type, its canonical pair, its display name and
//! the meaning of each type-dependent slot.
//!
//! Two lookups matter:
//! - [`Media::resolve`] goes from a wire pair to a media type. Unknown pairs
//!   resolve to [`Media::None`]; BinaryText (data type 5) matches *any* file
//!   type because the file type byte encodes the column width there.
//! - [`Media::interpret`] goes from a slot's raw value to its
//!   `(meaning, typed value)` pair, decoding ANSi flags and font names where
//!   the table says so.

use bstr::BString;

use crate::SauceDataType;
use crate::flags::AnsiFlags;
use crate::fonts::{self, SauceFont};
use crate::header::SauceHeader;

/// All media types a SAUCE record can describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Media {
    #[default]
    None,
    // Character (data type 1)
    Ascii,
    Ansi,
    AnsiMation,
    RipScript,
    PcBoard,
    Avatar,
    Html,
    Source,
    TundraDraw,
    // Bitmap (data type 2)
    Gif,
    Pcx,
    Lbm,
    Tga,
    Fli,
    Flc,
    Bmp,
    Gl,
    Dl,
    WpgBitmap,
    Png,
    Jpg,
    Mpg,
    Avi,
    // Vector (data type 3)
    Dxf,
    Dwg,
    WpgVector,
    Studio3ds,
    // Audio (data type 4)
    Mod,
    Composer669,
    Stm,
    S3m,
    Mtm,
    Far,
    Ult,
    Amf,
    Dmf,
    Okt,
    Rol,
    Cmf,
    Mid,
    Sadt,
    Voc,
    Wav,
    Smp8,
    Smp8s,
    Smp16,
    Smp16s,
    Patch8,
    Patch16,
    Xm,
    Hsc,
    It,
    // Binary text (data type 5, any file type)
    BinaryText,
    // XBin (data type 6)
    XBin,
    // Archive (data type 7)
    Zip,
    Arj,
    Lzh,
    Arc,
    Tar,
    Zoo,
    Rar,
    Uc2,
    Pak,
    Sqz,
    // Executable (data type 8)
    Executable,
}

/// The six type-dependent slots of a record, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoSlot {
    Info1,
    Info2,
    Info3,
    Info4,
    Flags,
    InfoS,
}

impl InfoSlot {
    pub const ALL: [InfoSlot; 6] = [
        InfoSlot::Info1,
        InfoSlot::Info2,
        InfoSlot::Info3,
        InfoSlot::Info4,
        InfoSlot::Flags,
        InfoSlot::InfoS,
    ];
}

/// What a type-dependent slot means for a given media type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotMeaning {
    CharacterWidth,
    NumberOfLines,
    PixelWidth,
    PixelHeight,
    PixelDepth,
    NumberOfColors,
    SampleRate,
    AnsiFlags,
    FontId,
}

impl SlotMeaning {
    /// The snake_case name used in flat detail listings.
    pub fn name(self) -> &'static str {
        match self {
            SlotMeaning::CharacterWidth => "character_width",
            SlotMeaning::NumberOfLines => "number_of_lines",
            SlotMeaning::PixelWidth => "pixel_width",
            SlotMeaning::PixelHeight => "pixel_height",
            SlotMeaning::PixelDepth => "pixel_depth",
            SlotMeaning::NumberOfColors => "number_of_colors",
            SlotMeaning::SampleRate => "sample_rate",
            SlotMeaning::AnsiFlags => "ansi_flags",
            SlotMeaning::FontId => "font_id",
        }
    }
}

/// A typed slot value produced by [`Media::interpret`].
#[derive(Clone, Debug, PartialEq)]
pub enum SlotValue {
    Number(u16),
    Flags(AnsiFlags),
    /// A font name that resolved against the font registry.
    Font(&'static SauceFont),
    /// Raw text for font names not in the registry.
    Text(BString),
}

impl std::fmt::Display for SlotValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotValue::Number(n) => write!(f, "{n}"),
            SlotValue::Flags(flags) => write!(f, "{flags}"),
            SlotValue::Font(font) => f.write_str(font.name),
            SlotValue::Text(text) => write!(f, "{text}"),
        }
    }
}

/// One row of the registry.
#[derive(Debug)]
pub struct MediaRecord {
    pub media: Media,
    pub file_type: u8,
    pub data_type: SauceDataType,
    pub name: &'static str,
    pub info_1: Option<SlotMeaning>,
    pub info_2: Option<SlotMeaning>,
    pub info_3: Option<SlotMeaning>,
    pub info_4: Option<SlotMeaning>,
    pub flags: Option<SlotMeaning>,
    pub info_s: Option<SlotMeaning>,
}

impl MediaRecord {
    /// The meaning assigned to a slot, if the media uses it.
    pub fn meaning(&self, slot: InfoSlot) -> Option<SlotMeaning> {
        match slot {
            InfoSlot::Info1 => self.info_1,
            InfoSlot::Info2 => self.info_2,
            InfoSlot::Info3 => self.info_3,
            InfoSlot::Info4 => self.info_4,
            InfoSlot::Flags => self.flags,
            InfoSlot::InfoS => self.info_s,
        }
    }
}

/// Row with no type-dependent slots.
const fn plain(media: Media, file_type: u8, data_type: SauceDataType, name: &'static str) -> MediaRecord {
    MediaRecord {
        media,
        file_type,
        data_type,
        name,
        info_1: None,
        info_2: None,
        info_3: None,
        info_4: None,
        flags: None,
        info_s: None,
    }
}

/// Character media with width/lines.
const fn sized(media: Media, file_type: u8, data_type: SauceDataType, name: &'static str) -> MediaRecord {
    MediaRecord {
        info_1: Some(SlotMeaning::CharacterWidth),
        info_2: Some(SlotMeaning::NumberOfLines),
        ..plain(media, file_type, data_type, name)
    }
}

/// Character media with width/lines plus ANSi flags and font selection.
const fn ansi_like(media: Media, file_type: u8, name: &'static str) -> MediaRecord {
    MediaRecord {
        flags: Some(SlotMeaning::AnsiFlags),
        info_s: Some(SlotMeaning::FontId),
        ..sized(media, file_type, SauceDataType::Character, name)
    }
}

/// Raster media with pixel dimensions and depth.
const fn raster(media: Media, file_type: u8, name: &'static str) -> MediaRecord {
    MediaRecord {
        info_1: Some(SlotMeaning::PixelWidth),
        info_2: Some(SlotMeaning::PixelHeight),
        info_3: Some(SlotMeaning::PixelDepth),
        ..plain(media, file_type, SauceDataType::Bitmap, name)
    }
}

/// Sampled audio with a sample rate.
const fn sampled(media: Media, file_type: u8, name: &'static str) -> MediaRecord {
    MediaRecord {
        info_1: Some(SlotMeaning::SampleRate),
        ..plain(media, file_type, SauceDataType::Audio, name)
    }
}

/// The full registry, in `(data_type, file_type)` order.
pub static MEDIA_TABLE: &[MediaRecord] = &[
    plain(Media::None, 0, SauceDataType::None, "None"),
    // Character
    ansi_like(Media::Ascii, 0, "ASCII"),
    ansi_like(Media::Ansi, 1, "ANSi"),
    ansi_like(Media::AnsiMation, 2, "ANSiMation"),
    MediaRecord {
        info_1: Some(SlotMeaning::PixelWidth),
        info_2: Some(SlotMeaning::PixelHeight),
        info_3: Some(SlotMeaning::NumberOfColors),
        ..plain(Media::RipScript, 3, SauceDataType::Character, "RIPScript")
    },
    sized(Media::PcBoard, 4, SauceDataType::Character, "PCBoard"),
    sized(Media::Avatar, 5, SauceDataType::Character, "Avatar"),
    plain(Media::Html, 6, SauceDataType::Character, "HTML"),
    plain(Media::Source, 7, SauceDataType::Character, "Source"),
    sized(Media::TundraDraw, 8, SauceDataType::Character, "TundraDraw"),
    // Bitmap
    raster(Media::Gif, 0, "GIF"),
    raster(Media::Pcx, 1, "PCX"),
    raster(Media::Lbm, 2, "LBM/IFF"),
    raster(Media::Tga, 3, "TGA"),
    raster(Media::Fli, 4, "FLI"),
    raster(Media::Flc, 5, "FLC"),
    raster(Media::Bmp, 6, "BMP"),
    raster(Media::Gl, 7, "GL"),
    raster(Media::Dl, 8, "DL"),
    raster(Media::WpgBitmap, 9, "WPG"),
    raster(Media::Png, 10, "PNG"),
    raster(Media::Jpg, 11, "JPG/JPeg"),
    raster(Media::Mpg, 12, "MPG"),
    raster(Media::Avi, 13, "AVI"),
    // Vector
    plain(Media::Dxf, 0, SauceDataType::Vector, "DXF"),
    plain(Media::Dwg, 1, SauceDataType::Vector, "DWG"),
    plain(Media::WpgVector, 2, SauceDataType::Vector, "WPG"),
    plain(Media::Studio3ds, 3, SauceDataType::Vector, "3DS"),
    // Audio
    plain(Media::Mod, 0, SauceDataType::Audio, "MOD"),
    plain(Media::Composer669, 1, SauceDataType::Audio, "669"),
    plain(Media::Stm, 2, SauceDataType::Audio, "STM"),
    plain(Media::S3m, 3, SauceDataType::Audio, "S3M"),
    plain(Media::Mtm, 4, SauceDataType::Audio, "MTM"),
    plain(Media::Far, 5, SauceDataType::Audio, "FAR"),
    plain(Media::Ult, 6, SauceDataType::Audio, "ULT"),
    plain(Media::Amf, 7, SauceDataType::Audio, "AMF"),
    plain(Media::Dmf, 8, SauceDataType::Audio, "DMF"),
    plain(Media::Okt, 9, SauceDataType::Audio, "OKT"),
    plain(Media::Rol, 10, SauceDataType::Audio, "ROL"),
    plain(Media::Cmf, 11, SauceDataType::Audio, "CMF"),
    plain(Media::Mid, 12, SauceDataType::Audio, "MID"),
    plain(Media::Sadt, 13, SauceDataType::Audio, "SADT"),
    plain(Media::Voc, 14, SauceDataType::Audio, "VOC"),
    plain(Media::Wav, 15, SauceDataType::Audio, "WAV"),
    sampled(Media::Smp8, 16, "SMP8"),
    sampled(Media::Smp8s, 17, "SMP8S"),
    sampled(Media::Smp16, 18, "SMP16"),
    sampled(Media::Smp16s, 19, "SMP16S"),
    plain(Media::Patch8, 20, SauceDataType::Audio, "PATCH8"),
    plain(Media::Patch16, 21, SauceDataType::Audio, "PATCH16"),
    plain(Media::Xm, 22, SauceDataType::Audio, "XM"),
    plain(Media::Hsc, 23, SauceDataType::Audio, "HSC"),
    plain(Media::It, 24, SauceDataType::Audio, "IT"),
    // Binary text: the file type byte stores width/2, any value resolves.
    MediaRecord {
        flags: Some(SlotMeaning::AnsiFlags),
        info_s: Some(SlotMeaning::FontId),
        ..plain(Media::BinaryText, 0, SauceDataType::BinaryText, "BinaryText")
    },
    sized(Media::XBin, 0, SauceDataType::XBin, "XBin"),
    // Archive
    plain(Media::Zip, 0, SauceDataType::Archive, "ZIP"),
    plain(Media::Arj, 1, SauceDataType::Archive, "ARJ"),
    plain(Media::Lzh, 2, SauceDataType::Archive, "LZH"),
    plain(Media::Arc, 3, SauceDataType::Archive, "ARC"),
    plain(Media::Tar, 4, SauceDataType::Archive, "TAR"),
    plain(Media::Zoo, 5, SauceDataType::Archive, "ZOO"),
    plain(Media::Rar, 6, SauceDataType::Archive, "RAR"),
    plain(Media::Uc2, 7, SauceDataType::Archive, "UC2"),
    plain(Media::Pak, 8, SauceDataType::Archive, "PAK"),
    plain(Media::Sqz, 9, SauceDataType::Archive, "SQZ"),
    plain(Media::Executable, 0, SauceDataType::Executable, "Executable"),
];

impl Media {
    /// Resolve a wire `(file_type, data_type)` pair to a media type.
    ///
    /// Unknown pairs resolve to [`Media::None`]. BinaryText accepts any file
    /// type (the byte encodes width/2 there, not an identity).
    pub fn resolve(file_type: u8, data_type: SauceDataType) -> Media {
        if data_type == SauceDataType::BinaryText {
            return Media::BinaryText;
        }
        MEDIA_TABLE
            .iter()
            .find(|rec| rec.data_type == data_type && rec.file_type == file_type)
            .map(|rec| rec.media)
            .unwrap_or(Media::None)
    }

    /// The registry row for this media type.
    pub fn record(self) -> &'static MediaRecord {
        MEDIA_TABLE
            .iter()
            .find(|rec| rec.media == self)
            .expect("every Media variant has a registry row")
    }

    /// The canonical `(file_type, data_type)` pair. Inverse of
    /// [`Media::resolve`] for every row of the table.
    pub fn handle(self) -> (u8, SauceDataType) {
        let rec = self.record();
        (rec.file_type, rec.data_type)
    }

    /// Display name, e.g. `"ANSi"`.
    pub fn name(self) -> &'static str {
        self.record().name
    }

    /// The slots this media uses, in wire order, with their meanings.
    pub fn meanings(self) -> Vec<(InfoSlot, SlotMeaning)> {
        let rec = self.record();
        InfoSlot::ALL
            .iter()
            .filter_map(|&slot| rec.meaning(slot).map(|meaning| (slot, meaning)))
            .collect()
    }

    /// Interpret one slot of a record under this media type.
    ///
    /// Returns `None` if the media does not use the slot, or if the slot is a
    /// font selector and the record's TInfoS is zero-filled.
    pub fn interpret(self, slot: InfoSlot, header: &SauceHeader) -> Option<(SlotMeaning, SlotValue)> {
        let meaning = self.record().meaning(slot)?;
        let value = match slot {
            InfoSlot::Info1 => SlotValue::Number(header.t_info1),
            InfoSlot::Info2 => SlotValue::Number(header.t_info2),
            InfoSlot::Info3 => SlotValue::Number(header.t_info3),
            InfoSlot::Info4 => SlotValue::Number(header.t_info4),
            InfoSlot::Flags => SlotValue::Flags(AnsiFlags::from_byte(header.t_flags)),
            InfoSlot::InfoS => {
                let name = header.t_info_s.as_ref()?;
                match fonts::font_by_name(name.as_slice()) {
                    Some(font) => SlotValue::Font(font),
                    None => SlotValue::Text(name.clone()),
                }
            }
        };
        Some((meaning, value))
    }

    /// All media types belonging to a data type, in file type order.
    pub fn for_data_type(data_type: SauceDataType) -> Vec<Media> {
        MEDIA_TABLE
            .iter()
            .filter(|rec| rec.data_type == data_type)
            .map(|rec| rec.media)
            .collect()
    }

    /// The file type bytes a data type can carry, in table order.
    pub fn file_types_for(data_type: SauceDataType) -> Vec<u8> {
        MEDIA_TABLE
            .iter()
            .filter(|rec| rec.data_type == data_type)
            .map(|rec| rec.file_type)
            .collect()
    }
}

impl std::fmt::Display for Media {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_handle_closure() {
        for rec in MEDIA_TABLE {
            let (file_type, data_type) = rec.media.handle();
            assert_eq!(Media::resolve(file_type, data_type), rec.media);
        }
    }

    #[test]
    fn binary_text_matches_any_file_type() {
        for file_type in [0u8, 40, 255] {
            assert_eq!(
                Media::resolve(file_type, SauceDataType::BinaryText),
                Media::BinaryText
            );
        }
    }

    #[test]
    fn unknown_pairs_resolve_to_none() {
        assert_eq!(Media::resolve(9, SauceDataType::Character), Media::None);
        assert_eq!(Media::resolve(200, SauceDataType::Audio), Media::None);
    }

    #[test]
    fn table_is_complete() {
        assert_eq!(MEDIA_TABLE.len(), 66);
        // No duplicate pairs besides the BinaryText wildcard.
        for (i, a) in MEDIA_TABLE.iter().enumerate() {
            for b in &MEDIA_TABLE[i + 1..] {
                assert!(
                    a.data_type != b.data_type || a.file_type != b.file_type,
                    "duplicate pair for {:?}/{:?}",
                    a.media,
                    b.media
                );
            }
        }
    }

    #[test]
    fn ansi_meanings_in_order() {
        let meanings = Media::Ansi.meanings();
        assert_eq!(
            meanings,
            vec![
                (InfoSlot::Info1, SlotMeaning::CharacterWidth),
                (InfoSlot::Info2, SlotMeaning::NumberOfLines),
                (InfoSlot::Flags, SlotMeaning::AnsiFlags),
                (InfoSlot::InfoS, SlotMeaning::FontId),
            ]
        );
    }
}
