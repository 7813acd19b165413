#![no_main]

use oatrs::file::decode_dex;

extern crate libfuzzer_sys;
extern crate oatrs;

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    // this must not panic
    if let Ok(header) = decode_dex(data) {
        let _ = header.get_version();
    }
});
