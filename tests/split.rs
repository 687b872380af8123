use bstr::BString;
use sauce_codec::schema::{EOF_CHAR, RECORD_LEN, SauceField, comment_block_len};
use sauce_codec::{SauceBlockBuilder, SauceError, binary, buffer};

fn sauce_with_comments(lines: usize) -> Vec<u8> {
    let mut builder = SauceBlockBuilder::default()
        .title(BString::from("Split me"))
        .unwrap();
    for i in 0..lines {
        builder = builder
            .add_comment(BString::from(format!("line {i}")))
            .unwrap();
    }
    buffer::write(b"the body", &builder.build())
}

#[test]
fn split_all_is_additive() {
    for lines in [0usize, 1, 5, 255] {
        let buf = sauce_with_comments(lines);
        let (contents, record, comments) = binary::split_all(&buf);
        assert_eq!(
            contents.len() + record.len() + comments.len(),
            buf.len(),
            "split must tile the buffer for {lines} lines"
        );
        assert_eq!(record.len(), RECORD_LEN);
        assert_eq!(comments.len(), comment_block_len(lines as u8));
        assert_eq!(contents, &buf[..contents.len()]);
    }
}

#[test]
fn split_variants_agree() {
    let buf = sauce_with_comments(2);
    let (contents, record, comments) = binary::split_all(&buf);
    assert_eq!(binary::split_sauce(&buf), (record, comments));
    // split_record leaves comment bytes on the contents side.
    let (contents2, record2) = binary::split_record(&buf);
    assert_eq!(record2, record);
    assert_eq!(contents2.len(), contents.len() + comments.len());
}

#[test]
fn split_on_plain_buffer_returns_everything_as_contents() {
    let buf = b"no sauce in sight".to_vec();
    assert_eq!(binary::split_all(&buf), (&buf[..], &[][..], &[][..]));
}

#[test]
fn raw_exposes_undecoded_slices() {
    let buf = sauce_with_comments(1);
    let (record, comments) = buffer::raw(&buf).unwrap();
    assert!(record.starts_with(b"SAUCE"));
    assert!(comments.starts_with(b"COMNT"));
    assert!(matches!(buffer::raw(b"none"), Err(SauceError::NoSauce)));
}

#[test]
fn read_field_returns_raw_bytes() {
    let buf = sauce_with_comments(0);
    let title = binary::read_field(&buf, SauceField::Title).unwrap();
    assert_eq!(title.len(), SauceField::Title.size());
    assert!(title.starts_with(b"Split me"));

    let info1 = binary::read_field(&buf, SauceField::TInfo1).unwrap();
    assert_eq!(info1, &[0, 0]);
}

#[test]
fn write_field_patches_in_place() {
    let mut buf = sauce_with_comments(0);
    binary::write_field(&mut buf, SauceField::TInfo1, &80u16.to_le_bytes()).unwrap();
    let block = buffer::sauce(&buf).unwrap();
    assert_eq!(block.header().t_info1, 80);

    // Wrong size is a precondition violation, not a silent truncation.
    assert!(matches!(
        binary::write_field(&mut buf, SauceField::TInfo1, &[1, 2, 3]),
        Err(SauceError::InvalidLength { .. })
    ));
}

#[test]
fn structural_count_vs_field_count() {
    let mut buf = sauce_with_comments(3);
    assert_eq!(binary::comment_lines_field(&buf).unwrap(), 3);
    assert_eq!(binary::count_comment_lines(&buf).unwrap(), 3);

    // Make the record lie about its count; the structural count still sees
    // the three lines on disk, which is the whole point of having both.
    binary::write_field(&mut buf, SauceField::CommentLines, &[9]).unwrap();
    assert_eq!(binary::comment_lines_field(&buf).unwrap(), 9);
    assert_eq!(binary::count_comment_lines(&buf).unwrap(), 3);

    // The tolerant reader believes neither: mismatched pointer, no comments.
    let block = buffer::sauce(&buf).unwrap();
    assert!(block.comments().is_empty());
}

#[test]
fn match_record_respects_eof_adjacency() {
    let buf = sauce_with_comments(0);
    let with_eof = binary::match_record(&buf, true).unwrap();
    assert_eq!(with_eof.position, buf.len() - RECORD_LEN);
    assert_eq!(with_eof.length, RECORD_LEN);
    assert_eq!(buf[with_eof.position - 1], EOF_CHAR);

    // Strip the EOF: adjacency match fails, plain match still works.
    let mut no_eof = buf.clone();
    no_eof.remove(b"the body".len());
    assert!(binary::match_record(&no_eof, true).is_none());
    assert!(binary::match_record(&no_eof, false).is_some());
}

#[test]
fn match_comment_block_needs_a_record() {
    let buf = sauce_with_comments(2);
    let matched = binary::match_comment_block(&buf, true).unwrap();
    assert_eq!(matched.length, comment_block_len(2));
    assert_eq!(matched.position, buf.len() - RECORD_LEN - matched.length);

    // Chop the record off: the comment bytes alone match only as fragment.
    let headless = &buf[..buf.len() - RECORD_LEN];
    assert!(binary::match_comment_block(headless, false).is_none());
    let fragment = binary::match_comment_fragment(headless, false).unwrap();
    assert_eq!(fragment.position, matched.position);
}

#[test]
fn split_with_explicit_count_recovers_stale_records() {
    let mut buf = sauce_with_comments(2);
    // Stale record: count zeroed, block still on disk.
    binary::write_field(&mut buf, SauceField::CommentLines, &[0]).unwrap();

    let (_, _, comments) = binary::split_all(&buf);
    assert!(comments.is_empty());

    let structural = binary::count_comment_lines(&buf).unwrap();
    let (_, _, comments) = binary::split_with(&buf, structural);
    assert_eq!(comments.len(), comment_block_len(2));
}

#[test]
fn contents_and_clean_contents() {
    let buf = sauce_with_comments(1);
    assert_eq!(binary::contents(&buf), b"the body\x1a");
    assert_eq!(binary::clean_contents(&buf), b"the body");

    assert!(binary::is_eof_terminated(binary::contents(&buf)));
    assert_eq!(binary::eof_terminate(b"abc"), b"abc\x1a");
}
