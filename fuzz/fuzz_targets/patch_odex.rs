#![no_main]

use oatrs::file::decode_odex;

extern crate libfuzzer_sys;
extern crate oatrs;

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    let mut buffer = data.to_vec();
    if let Ok(mut odex) = decode_odex(buffer.as_mut_slice()) {
        let checksums: Vec<u32> = odex.checksums().iter().map(|c| !c).collect();
        odex.patch_checksums(&checksums).unwrap();
        let patched = odex.serialize();
        assert_eq!(patched.len(), data.len());

        let changed = patched.iter().zip(data).filter(|(a, b)| a != b).count();
        assert!(changed <= checksums.len() * 4);
    }
});
