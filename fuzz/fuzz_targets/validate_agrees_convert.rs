#![no_main]

use libfuzzer_sys::fuzz_target;
use osi_unicode::{convert, validate, ConvFlag};

fuzz_target!(|data: (Vec<u8>, Vec<u16>, Vec<u32>)| {
    let (u8s, u16s, u32s) = data;

    // Validation matches strict conversion, and is idempotent.
    let mut sink: Vec<u32> = Vec::new();
    assert_eq!(validate(&u8s), convert(&u8s, &mut sink, ConvFlag::Strict));
    assert_eq!(validate(&u8s), validate(&u8s));
    let mut sink: Vec<u8> = Vec::new();
    assert_eq!(validate(&u16s), convert(&u16s, &mut sink, ConvFlag::Strict));
    let mut sink: Vec<u16> = Vec::new();
    assert_eq!(validate(&u32s), convert(&u32s, &mut sink, ConvFlag::Strict));

    // UTF-8 rules match the standard library, including the position of
    // the first malformed sequence.
    let r = validate(&u8s);
    match core::str::from_utf8(&u8s) {
        Ok(_) => assert!(r.is_success()),
        Err(e) => {
            assert!(!r.is_success());
            assert_eq!(r.position, e.valid_up_to());
        },
    }

    // UTF-16 rules match the standard library.
    let ok = char::decode_utf16(u16s.iter().copied()).all(|v| v.is_ok());
    assert_eq!(validate(&u16s).is_success(), ok);
});
