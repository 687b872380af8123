use bstr::BString;
use sauce_codec::{Media, SauceBlock, SauceBlockBuilder, SlotValue, buffer};

fn build_character_block(
    title: BString,
    author: BString,
    group: BString,
    comment: Option<BString>,
    font: Option<BString>,
) -> SauceBlock {
    let mut builder = SauceBlockBuilder::default()
        .title(title)
        .unwrap()
        .author(author)
        .unwrap()
        .group(group)
        .unwrap()
        .media(Media::Ansi)
        .character_size(80, 25);

    if let Some(f) = font {
        builder = builder.font(f).unwrap();
    }
    if let Some(c) = comment {
        builder = builder.add_comment(c).unwrap();
    }

    builder.build()
}

fn round_trip(block: &SauceBlock) -> SauceBlock {
    let data = buffer::write(b"", block);
    buffer::sauce(&data).expect("SAUCE should parse")
}

#[test]
fn title_trims_trailing_spaces_after_round_trip() {
    let original = build_character_block(
        BString::from("Hello World  "), // trailing spaces that should be trimmed
        BString::from("Author"),
        BString::from("Group"),
        None,
        None,
    );
    let parsed = round_trip(&original);
    assert_eq!(parsed.title(), &BString::from("Hello World")); // trimmed
}

#[test]
fn author_cuts_at_first_null() {
    // Rogue writers zero-pad the space-padded fields; everything from the
    // first null on is padding, even with text behind it.
    let original = build_character_block(
        BString::from("Title"),
        BString::from(b"Auth\0r  ".to_vec()),
        BString::from("Group"),
        None,
        None,
    );
    let parsed = round_trip(&original);
    assert_eq!(parsed.author(), &BString::from("Auth"));
}

#[test]
fn group_trims_all_trailing_padding() {
    let original = build_character_block(
        BString::from("Title"),
        BString::from("Author"),
        BString::from("Group   "), // trailing spaces
        None,
        None,
    );
    let parsed = round_trip(&original);
    assert_eq!(parsed.group(), &BString::from("Group"));
}

#[test]
fn comment_trims_trailing_spaces() {
    let original = build_character_block(
        BString::from("Title"),
        BString::from("Author"),
        BString::from("Group"),
        Some(BString::from("Comment with pad   ")),
        None,
    );
    let parsed = round_trip(&original);
    assert_eq!(parsed.comments().len(), 1);
    assert_eq!(parsed.comments()[0], BString::from("Comment with pad"));
}

#[test]
fn font_zero_padding_preserves_trailing_spaces_but_not_zeros() {
    // TInfoS is zero-padded; trailing spaces sit before the padding and are
    // part of the value.
    let font_with_spaces = BString::from("FONT NAME   ");
    let original = build_character_block(
        BString::from("Title"),
        BString::from("Author"),
        BString::from("Group"),
        None,
        Some(font_with_spaces.clone()),
    );
    let parsed = round_trip(&original);
    assert_eq!(parsed.header().t_info_s, Some(font_with_spaces.clone()));

    // An unknown spelling surfaces as raw text in slot interpretation.
    let (_, value) = parsed.t_info_s().expect("font slot in use");
    assert_eq!(value, SlotValue::Text(font_with_spaces));
}

#[test]
fn raw_comment_block_layout_is_correct() {
    // Two comments -> ensure "COMNT" + (2 * 64) bytes exist before the record.
    let original = build_character_block(
        BString::from("Title"),
        BString::from("Author"),
        BString::from("Group"),
        Some(BString::from("C1")),
        Some(BString::from("FONT")),
    )
    .to_builder()
    .add_comment(BString::from("Second line"))
    .unwrap()
    .build();

    let buf = buffer::write(b"", &original);

    // Layout: [0x1A][COMNT][comment1 64][comment2 64][record 128]
    assert_eq!(buf.len(), 1 + 5 + 64 * 2 + 128);
    assert_eq!(buf[0], 0x1A);

    let tag = &buf[1..6];
    assert_eq!(tag, b"COMNT");

    let c1 = &buf[6..6 + 64];
    let c2 = &buf[6 + 64..6 + 128];

    // Each comment is exactly 64 bytes, space padded.
    assert!(c1.starts_with(b"C1 "));
    assert!(c2.starts_with(b"Second line "));

    // The record occupies the last 128 bytes.
    let record = &buf[buf.len() - 128..];
    assert_eq!(&record[0..5], b"SAUCE");
}

#[test]
fn title_truncation_and_round_trip_preserves_trimmed_core() {
    // Builder refuses >35, but near-limit input with trailing spaces
    // round-trips to the trimmed core.
    let long_with_spaces = "A".repeat(33) + "  ";
    let original = build_character_block(
        BString::from(long_with_spaces),
        BString::from("Author"),
        BString::from("Group"),
        None,
        None,
    );
    let parsed = round_trip(&original);
    assert_eq!(parsed.title(), &BString::from("A".repeat(33)));
}

#[test]
fn empty_title_author_group_round_trip() {
    let original = build_character_block(
        BString::from(""),
        BString::from(""),
        BString::from(""),
        Some(BString::from("  ")), // becomes empty after trim
        None,
    );
    let parsed = round_trip(&original);
    assert_eq!(parsed.title(), &BString::from(""));
    assert_eq!(parsed.author(), &BString::from(""));
    assert_eq!(parsed.group(), &BString::from(""));
    assert_eq!(parsed.comments()[0], BString::from("")); // trimmed
}
