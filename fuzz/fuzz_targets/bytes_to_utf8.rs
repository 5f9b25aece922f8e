#![no_main]

use libfuzzer_sys::fuzz_target;
use osi_unicode::endian::bytes_to_utf8;
use osi_unicode::{ConvFlag, Encoding};

fuzz_target!(|data: (Vec<u8>, ConvFlag)| {
    let (bytes, flag) = data;

    let mut out: Vec<u8> = Vec::new();
    let (encoding, r) = bytes_to_utf8(&bytes, flag, &mut out);

    assert_ne!(encoding, Encoding::Undetected);
    assert!(r.position <= bytes.len());
    if r.is_success() {
        assert_eq!(r.position, bytes.len());
    }

    // Whatever was produced, even before a failure, is valid UTF-8.
    assert!(core::str::from_utf8(&out).is_ok());
});
