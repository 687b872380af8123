use bstr::BString;
use sauce_codec::{
    Media, SauceBlock, SauceBlockBuilder, SauceDataType, SauceDate, buffer, schema,
};

/// Build the record + comment block of a well-known 1994 ANSi by hand,
/// byte for byte.
fn acid_member_listing() -> Vec<u8> {
    let mut data = Vec::new();

    // Comment block: COMNT + 5 lines of 64 space-padded bytes.
    let lines = [
        "test notes",
        "second line",
        "more test",
        "",
        "after a blank line",
    ];
    data.extend_from_slice(b"COMNT");
    for line in lines {
        data.extend_from_slice(format!("{line:<64}").as_bytes());
    }

    // Record.
    data.extend_from_slice(b"SAUCE");
    data.extend_from_slice(b"00");
    data.extend_from_slice(format!("{:<35}", "ACiD 1994 Member/Board Listing").as_bytes());
    data.extend_from_slice(&[b' '; 20]); // author blank
    data.extend_from_slice(b"ACiD Productions    ");
    data.extend_from_slice(b"19940831");
    data.extend_from_slice(&8900u32.to_le_bytes());
    data.push(1); // data type: character
    data.push(1); // file type: ANSi
    data.extend_from_slice(&80u16.to_le_bytes());
    data.extend_from_slice(&97u16.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.push(5); // comment lines
    data.push(0); // flags
    data.extend_from_slice(&[0u8; 22]);
    data
}

#[test]
fn decodes_a_real_world_block() {
    let data = acid_member_listing();
    let block = buffer::sauce(&data).unwrap();

    assert_eq!(block.version(), &BString::from("00"));
    assert_eq!(
        block.title(),
        &BString::from("ACiD 1994 Member/Board Listing")
    );
    assert_eq!(block.author(), &BString::from(""));
    assert_eq!(block.group(), &BString::from("ACiD Productions"));
    assert_eq!(block.date(), Some(&SauceDate::new(1994, 8, 31)));
    assert_eq!(block.file_size(), 8900);
    assert_eq!(block.data_type(), SauceDataType::Character);
    assert_eq!(block.file_type(), 1);
    assert_eq!(block.media(), Media::Ansi);

    let header = block.header();
    assert_eq!(header.t_info1, 80);
    assert_eq!(header.t_info2, 97);
    assert_eq!(header.t_info3, 16);
    assert_eq!(header.t_info4, 0);
    assert_eq!(header.t_flags, 0);
    assert_eq!(header.t_info_s, None);

    assert_eq!(
        block.comments(),
        &[
            BString::from("test notes"),
            BString::from("second line"),
            BString::from("more test"),
            BString::from(""),
            BString::from("after a blank line"),
        ]
    );
}

#[test]
fn reencoding_reproduces_the_wire_bytes() {
    let data = acid_member_listing();
    let block = buffer::sauce(&data).unwrap();
    assert_eq!(block.to_bytes(), data);
}

#[test]
fn builder_roundtrip() {
    let block = SauceBlockBuilder::default()
        .title(BString::from("Title"))
        .unwrap()
        .author(BString::from("Author"))
        .unwrap()
        .group(BString::from("Group"))
        .unwrap()
        .date(SauceDate::new(1976, 12, 30))
        .media(Media::XBin)
        .character_size(112, 90)
        .build();

    let mut data = Vec::new();
    block.write(&mut data, true).unwrap();
    let parsed = SauceBlock::from_bytes(&data).unwrap();

    assert_eq!(parsed.title(), &BString::from("Title"));
    assert_eq!(parsed.group(), &BString::from("Group"));
    assert_eq!(parsed.author(), &BString::from("Author"));
    assert_eq!(parsed.data_type(), SauceDataType::XBin);
    assert_eq!(parsed.date(), Some(&SauceDate::new(1976, 12, 30)));
    assert_eq!(parsed.header().t_info1, 112);
    assert_eq!(parsed.header().t_info2, 90);
}

#[test]
fn builder_comments_roundtrip() {
    let block = SauceBlockBuilder::default()
        .title(BString::from("Title"))
        .unwrap()
        .add_comment(BString::new("This is a comment".into()))
        .unwrap()
        .add_comment(BString::new("This is another comment".into()))
        .unwrap()
        .build();

    let data = buffer::write(b"", &block);
    let parsed = buffer::sauce(&data).unwrap();

    assert_eq!(parsed.comments().len(), 2);
    assert_eq!(parsed.comments()[0], BString::from("This is a comment"));
    assert_eq!(
        parsed.comments()[1],
        BString::from("This is another comment")
    );
}

#[test]
fn block_len_matches_serialization() {
    let mut block = SauceBlock::default();
    assert_eq!(block.len(), schema::RECORD_LEN);
    block.add_comment(BString::from("hi")).unwrap();
    assert_eq!(block.len(), schema::sauce_block_len(1));
    assert_eq!(block.to_bytes().len(), block.len());
}

#[test]
fn details_flatten_media_interpretation() {
    let data = acid_member_listing();
    let block = buffer::sauce(&data).unwrap();
    let details = block.details();

    let find = |name: &str| {
        details
            .iter()
            .find(|detail| detail.name == name)
            .unwrap_or_else(|| panic!("missing detail {name}"))
    };

    assert_eq!(find("media").value.to_string(), "ANSi");
    assert_eq!(find("character_width").value.to_string(), "80");
    assert_eq!(find("number_of_lines").value.to_string(), "97");
    assert_eq!(find("file_size").value.to_string(), "8900");
    // Author is blank and must not appear.
    assert!(details.iter().all(|detail| detail.name != "author"));
}
