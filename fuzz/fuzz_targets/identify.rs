#![no_main]

use oatrs::file::identify;

extern crate libfuzzer_sys;
extern crate oatrs;

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    // this must not panic
    if let Ok(file) = identify(data) {
        let _ = file.to_string();
    }
});
