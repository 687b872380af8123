#![no_main]
use libfuzzer_sys::fuzz_target;
use sauce_codec::SauceHeader;

fuzz_target!(|data: &[u8]| {
    // Try interpreting tail bytes as a potential record
    if data.len() >= 128 {
        let _ = SauceHeader::from_bytes(data);
    }
});
