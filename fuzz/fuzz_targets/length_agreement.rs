#![no_main]

use libfuzzer_sys::fuzz_target;
use osi_unicode::{convert, u32_length, u8_length, validate, ConvFlag, Generator};

fuzz_target!(|data: (Vec<u8>, Vec<u16>, Vec<u32>)| {
    let (u8s, u16s, u32s) = data;

    assert_eq!(u32_length(&u8s), Generator::new(&u8s, ConvFlag::Strict).count());
    assert_eq!(u32_length(&u16s), Generator::new(&u16s, ConvFlag::Strict).count());
    assert_eq!(u32_length(&u32s), Generator::new(&u32s, ConvFlag::Strict).count());

    if validate(&u8s).is_success() {
        let mut out: Vec<u32> = Vec::new();
        convert(&u8s, &mut out, ConvFlag::Strict);
        assert_eq!(out.len(), u32_length(&u8s));
        assert_eq!(u8_length(&u8s), u8s.len());
    }

    if validate(&u16s).is_success() {
        let mut out: Vec<u8> = Vec::new();
        convert(&u16s, &mut out, ConvFlag::Strict);
        assert_eq!(out.len(), u8_length(&u16s));
    }

    // Lenient conversion from UTF-32 never stops early.
    let mut out: Vec<u8> = Vec::new();
    let r = convert(&u32s, &mut out, ConvFlag::Lenient);
    assert_eq!(r.position, u32s.len());
    assert_eq!(out.len(), u8_length(&u32s));
});
