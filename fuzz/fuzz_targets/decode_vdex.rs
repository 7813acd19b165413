#![no_main]

use oatrs::file::decode_vdex;

extern crate libfuzzer_sys;
extern crate oatrs;

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    if let Ok(vdex) = decode_vdex(data) {
        assert_eq!(vdex.checksums().len(), vdex.dex_file_count() as usize);
    }
});
