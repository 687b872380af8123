//! Font registry for the TInfoS font selector.
//!
//! ANSi-flavored media name their display font in the 22-byte TInfoS field
//! using the exact spellings of the SAUCE FontName annex: the five IBM PC
//! families (bare names imply code page 437, suffixed names select one of
//! the 25 code pages), the Amiga workbench fonts, the two C64 PETSCII
//! variants and Atari ATASCII — 141 identifiers over 28 encodings.
//!
//! Each font carries its text encoding. Display properties (pixel cell,
//! source resolution, display aspect, pixel ratio and the vertical stretch
//! a modern square-pixel display needs to reproduce the original look) are
//! recorded only for the 68 identifiers whose hardware timings are known:
//! the VGA and VGA50 lines across all code pages, the EGA lines as shipped
//! (bare names and their CP437 ROMs), the base VGA25G font, and the
//! non-IBM machines. [`font_options`] returns `None` for the rest.
//! Families with both 8- and 9-pixel text modes expose one option record
//! per cell width so the letter-spacing flag can pick between them.

/// Text encoding a font renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontEncoding {
    Cp437,
    /// Arabic ASMO 708.
    Cp708,
    Cp720,
    Cp737,
    /// Baltic codepage 770.
    Cp770,
    Cp775,
    Cp819,
    Cp850,
    Cp852,
    /// Turkish/Maltese codepage 853.
    Cp853,
    Cp855,
    Cp857,
    Cp858,
    Cp860,
    Cp861,
    Cp862,
    Cp863,
    Cp864,
    Cp865,
    Cp866,
    Cp869,
    Cp872,
    /// Kamenický Czech/Slovak encoding ("KAM" suffix).
    Kamenicky,
    /// Mazovia Polish encoding ("MAZ" suffix).
    Mazovia,
    /// Cyrillic "MIK" encoding.
    Mik,
    /// Amiga Latin-1 flavored encoding.
    Amiga,
    /// Commodore 64 PETSCII.
    Petscii,
    /// Atari ATASCII.
    Atascii,
}

/// Display properties of a font at one cell width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontOptions {
    /// Pixel cell size (width, height).
    pub cell: (u8, u8),
    /// Source display resolution.
    pub resolution: (u16, u16),
    /// Display aspect of the original monitor, e.g. 4:3.
    pub display_aspect: (u8, u8),
    /// Pixel aspect ratio on that display.
    pub pixel_ratio: (u8, u8),
    /// Vertical stretch percentage needed on square pixels.
    pub vertical_stretch: f32,
}

/// One font registry entry.
#[derive(Debug, PartialEq)]
pub struct SauceFont {
    /// Stable symbolic identifier, e.g. `"ibm_vga_437"`.
    pub id: &'static str,
    /// Exact TInfoS spelling, e.g. `"IBM VGA 437"`.
    pub name: &'static str,
    pub encoding: FontEncoding,
    /// Display options per cell width; empty for identifiers the registry
    /// has no display measurements for.
    pub options: &'static [FontOptions],
}

/// The default font assumed when TInfoS is empty.
pub const DEFAULT_FONT_NAME: &str = "IBM VGA";

static VGA_OPTIONS: &[FontOptions] = &[
    FontOptions {
        cell: (9, 16),
        resolution: (720, 400),
        display_aspect: (4, 3),
        pixel_ratio: (20, 27),
        vertical_stretch: 35.0,
    },
    FontOptions {
        cell: (8, 16),
        resolution: (640, 400),
        display_aspect: (4, 3),
        pixel_ratio: (6, 5),
        vertical_stretch: 20.0,
    },
];

static VGA50_OPTIONS: &[FontOptions] = &[
    FontOptions {
        cell: (9, 8),
        resolution: (720, 400),
        display_aspect: (4, 3),
        pixel_ratio: (20, 27),
        vertical_stretch: 35.0,
    },
    FontOptions {
        cell: (8, 8),
        resolution: (640, 400),
        display_aspect: (4, 3),
        pixel_ratio: (6, 5),
        vertical_stretch: 20.0,
    },
];

static VGA25G_OPTIONS: &[FontOptions] = &[FontOptions {
    cell: (8, 19),
    resolution: (640, 480),
    display_aspect: (4, 3),
    pixel_ratio: (1, 1),
    vertical_stretch: 0.0,
}];

static EGA_OPTIONS: &[FontOptions] = &[
    FontOptions {
        cell: (9, 14),
        resolution: (720, 350),
        display_aspect: (4, 3),
        pixel_ratio: (20, 27),
        vertical_stretch: 35.0,
    },
    FontOptions {
        cell: (8, 14),
        resolution: (640, 350),
        display_aspect: (4, 3),
        pixel_ratio: (35, 48),
        vertical_stretch: 37.14,
    },
];

static EGA43_OPTIONS: &[FontOptions] = &[
    FontOptions {
        cell: (9, 8),
        resolution: (720, 350),
        display_aspect: (4, 3),
        pixel_ratio: (20, 27),
        vertical_stretch: 35.0,
    },
    FontOptions {
        cell: (8, 8),
        resolution: (640, 350),
        display_aspect: (4, 3),
        pixel_ratio: (35, 48),
        vertical_stretch: 37.14,
    },
];

static AMIGA_OPTIONS: &[FontOptions] = &[FontOptions {
    cell: (8, 16),
    resolution: (640, 400),
    display_aspect: (4, 3),
    pixel_ratio: (5, 6),
    vertical_stretch: 20.0,
}];

static C64_OPTIONS: &[FontOptions] = &[FontOptions {
    cell: (8, 8),
    resolution: (320, 200),
    display_aspect: (4, 3),
    pixel_ratio: (5, 6),
    vertical_stretch: 20.0,
}];

static ATARI_OPTIONS: &[FontOptions] = &[FontOptions {
    cell: (8, 8),
    resolution: (320, 192),
    display_aspect: (4, 3),
    pixel_ratio: (4, 5),
    vertical_stretch: 25.0,
}];

/// No display measurements on record for this identifier.
static NO_DISPLAY: &[FontOptions] = &[];

const fn font(
    id: &'static str,
    name: &'static str,
    encoding: FontEncoding,
    options: &'static [FontOptions],
) -> SauceFont {
    SauceFont {
        id,
        name,
        encoding,
        options,
    }
}

/// Expands the non-437 code page variants: one entry per family per code
/// page, around the bare family names, the CP437 variants (spelled out
/// because their display data differs per family) and the non-IBM machines.
/// Display measurements exist for the VGA/VGA50 lines at every code page;
/// the other lines only carry them as shipped.
macro_rules! font_table {
    ($(($sfx:literal, $id:literal, $enc:ident)),* $(,)?) => {
        /// Every font identifier of the SAUCE FontName annex.
        pub static FONTS: &[SauceFont] = &[
            font("ibm_vga", "IBM VGA", FontEncoding::Cp437, VGA_OPTIONS),
            font("ibm_vga50", "IBM VGA50", FontEncoding::Cp437, VGA50_OPTIONS),
            font("ibm_vga25g", "IBM VGA25G", FontEncoding::Cp437, VGA25G_OPTIONS),
            font("ibm_ega", "IBM EGA", FontEncoding::Cp437, EGA_OPTIONS),
            font("ibm_ega43", "IBM EGA43", FontEncoding::Cp437, EGA43_OPTIONS),
            font("ibm_vga_437", "IBM VGA 437", FontEncoding::Cp437, VGA_OPTIONS),
            font("ibm_vga50_437", "IBM VGA50 437", FontEncoding::Cp437, VGA50_OPTIONS),
            font("ibm_vga25g_437", "IBM VGA25G 437", FontEncoding::Cp437, NO_DISPLAY),
            font("ibm_ega_437", "IBM EGA 437", FontEncoding::Cp437, EGA_OPTIONS),
            font("ibm_ega43_437", "IBM EGA43 437", FontEncoding::Cp437, EGA43_OPTIONS),
            $(
                font(concat!("ibm_vga_", $id), concat!("IBM VGA ", $sfx), FontEncoding::$enc, VGA_OPTIONS),
                font(concat!("ibm_vga50_", $id), concat!("IBM VGA50 ", $sfx), FontEncoding::$enc, VGA50_OPTIONS),
                font(concat!("ibm_vga25g_", $id), concat!("IBM VGA25G ", $sfx), FontEncoding::$enc, NO_DISPLAY),
                font(concat!("ibm_ega_", $id), concat!("IBM EGA ", $sfx), FontEncoding::$enc, NO_DISPLAY),
                font(concat!("ibm_ega43_", $id), concat!("IBM EGA43 ", $sfx), FontEncoding::$enc, NO_DISPLAY),
            )*
            font("amiga_topaz_1", "Amiga Topaz 1", FontEncoding::Amiga, AMIGA_OPTIONS),
            font("amiga_topaz_1_plus", "Amiga Topaz 1+", FontEncoding::Amiga, AMIGA_OPTIONS),
            font("amiga_topaz_2", "Amiga Topaz 2", FontEncoding::Amiga, AMIGA_OPTIONS),
            font("amiga_topaz_2_plus", "Amiga Topaz 2+", FontEncoding::Amiga, AMIGA_OPTIONS),
            font("amiga_p0t_noodle", "Amiga P0T-NOoDLE", FontEncoding::Amiga, AMIGA_OPTIONS),
            font("amiga_microknight", "Amiga MicroKnight", FontEncoding::Amiga, AMIGA_OPTIONS),
            font("amiga_microknight_plus", "Amiga MicroKnight+", FontEncoding::Amiga, AMIGA_OPTIONS),
            font("amiga_mosoul", "Amiga mOsOul", FontEncoding::Amiga, AMIGA_OPTIONS),
            font("c64_petscii_unshifted", "C64 PETSCII unshifted", FontEncoding::Petscii, C64_OPTIONS),
            font("c64_petscii_shifted", "C64 PETSCII shifted", FontEncoding::Petscii, C64_OPTIONS),
            font("atari_atascii", "Atari ATASCII", FontEncoding::Atascii, ATARI_OPTIONS),
        ];
    };
}

font_table!(
    ("708", "708", Cp708),
    ("720", "720", Cp720),
    ("737", "737", Cp737),
    ("770", "770", Cp770),
    ("775", "775", Cp775),
    ("819", "819", Cp819),
    ("850", "850", Cp850),
    ("852", "852", Cp852),
    ("853", "853", Cp853),
    ("855", "855", Cp855),
    ("857", "857", Cp857),
    ("858", "858", Cp858),
    ("860", "860", Cp860),
    ("861", "861", Cp861),
    ("862", "862", Cp862),
    ("863", "863", Cp863),
    ("864", "864", Cp864),
    ("865", "865", Cp865),
    ("866", "866", Cp866),
    ("869", "869", Cp869),
    ("872", "872", Cp872),
    ("KAM", "kam", Kamenicky),
    ("MAZ", "maz", Mazovia),
    ("MIK", "mik", Mik),
);

/// Look a font up by its symbolic id, e.g. `"ibm_vga"`.
pub fn font_by_id(id: &str) -> Option<&'static SauceFont> {
    FONTS.iter().find(|font| font.id == id)
}

/// Look a font up by its exact TInfoS spelling, e.g. `"IBM VGA 437"`.
/// Spellings are matched byte-exact; SAUCE font names are case-sensitive.
pub fn font_by_name(name: &[u8]) -> Option<&'static SauceFont> {
    FONTS.iter().find(|font| font.name.as_bytes() == name)
}

/// The display options of a font. `None` for identifiers the registry has
/// no display measurements for (most non-437 code page variants).
pub fn font_options(id: &str) -> Option<&'static [FontOptions]> {
    let font = font_by_id(id)?;
    if font.options.is_empty() {
        None
    } else {
        Some(font.options)
    }
}

/// The display option of a font at a specific cell size.
pub fn font_option(id: &str, cell: (u8, u8)) -> Option<&'static FontOptions> {
    font_by_id(id)?.options.iter().find(|opt| opt.cell == cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_shape() {
        // 5 bare IBM families, 25 code page variants each, 8 Amiga, 2 C64,
        // 1 Atari.
        assert_eq!(FONTS.len(), 5 + 5 * 25 + 8 + 2 + 1);
        assert_eq!(FONTS.len(), 141);

        let encodings: std::collections::HashSet<_> =
            FONTS.iter().map(|font| font.encoding).collect();
        assert_eq!(encodings.len(), 28);

        // ids and names are unique
        for (i, a) in FONTS.iter().enumerate() {
            for b in &FONTS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_by_name_and_id() {
        let font = font_by_name(b"IBM VGA").unwrap();
        assert_eq!(font.id, "ibm_vga");
        assert_eq!(font.encoding, FontEncoding::Cp437);

        let font = font_by_id("ibm_ega43_kam").unwrap();
        assert_eq!(font.name, "IBM EGA43 KAM");
        assert_eq!(font.encoding, FontEncoding::Kamenicky);

        assert!(font_by_name(b"ibm vga").is_none()); // case-sensitive
    }

    #[test]
    fn options_by_cell_size() {
        let nine = font_option("ibm_vga", (9, 16)).unwrap();
        assert_eq!(nine.resolution, (720, 400));
        let eight = font_option("ibm_vga", (8, 16)).unwrap();
        assert_eq!(eight.resolution, (640, 400));
        assert!(font_option("ibm_vga", (8, 8)).is_none());
    }

    #[test]
    fn display_data_is_a_proper_subset() {
        let with_options = FONTS.iter().filter(|font| !font.options.is_empty());
        assert_eq!(with_options.count(), 68);

        // VGA and VGA50 carry data at every code page; the other lines only
        // as shipped.
        assert!(font_options("ibm_vga_850").is_some());
        assert!(font_options("ibm_vga50_mik").is_some());
        assert!(font_options("ibm_ega_437").is_some());
        assert!(font_options("ibm_ega_850").is_none());
        assert!(font_options("ibm_ega43_kam").is_none());
        assert!(font_options("ibm_vga25g_437").is_none());
        assert!(font_options("amiga_mosoul").is_some());
    }
}
