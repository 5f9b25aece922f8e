#![no_main]

use libfuzzer_sys::fuzz_target;
use osi_unicode::{convert, ConvFlag};

fuzz_target!(|data: Vec<char>| {
    let scalars: Vec<u32> = data.iter().map(|v| *v as u32).collect();
    let text: String = data.iter().collect();

    let mut u8s: Vec<u8> = Vec::new();
    let r = convert(&scalars, &mut u8s, ConvFlag::Strict);
    assert!(r.is_success());
    assert_eq!(r.position, scalars.len());
    assert_eq!(u8s, text.as_bytes());

    let mut u16s: Vec<u16> = Vec::new();
    let r = convert(&scalars, &mut u16s, ConvFlag::Strict);
    assert!(r.is_success());
    assert!(u16s.iter().copied().eq(text.encode_utf16()));

    let mut back: Vec<u32> = Vec::new();
    let r = convert(&u8s, &mut back, ConvFlag::Strict);
    assert!(r.is_success());
    assert_eq!(back, scalars);

    let mut back: Vec<u32> = Vec::new();
    let r = convert(&u16s, &mut back, ConvFlag::Strict);
    assert!(r.is_success());
    assert_eq!(back, scalars);
});
