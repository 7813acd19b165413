#![no_main]

use oatrs::file::decode_odex;

extern crate libfuzzer_sys;
extern crate oatrs;

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    if let Ok(odex) = decode_odex(data) {
        assert_eq!(odex.descriptors().len(), odex.dex_file_count() as usize);
        let _ = odex.key_values();
        let _ = odex.to_string();
    }
});
