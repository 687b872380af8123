#![no_main]
use libfuzzer_sys::fuzz_target;
use sauce_codec::binary;

fuzz_target!(|data: &[u8]| {
    // The three slices must always tile the buffer exactly.
    let (contents, record, comments) = binary::split_all(data);
    assert_eq!(contents.len() + record.len() + comments.len(), data.len());

    let _ = binary::match_record(data, true);
    let _ = binary::match_comment_block(data, true);
    let _ = binary::match_comment_fragment(data, false);
    let _ = binary::count_comment_lines(data);
});
