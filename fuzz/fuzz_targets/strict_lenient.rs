#![no_main]

use libfuzzer_sys::fuzz_target;
use osi_unicode::{convert, ConvErrc, ConvFlag};

fuzz_target!(|data: Vec<u16>| {
    let mut strict: Vec<u32> = Vec::new();
    let rs = convert(&data, &mut strict, ConvFlag::Strict);
    let mut lenient: Vec<u32> = Vec::new();
    let rl = convert(&data, &mut lenient, ConvFlag::Lenient);

    // Lenient conversion only ever stops at a trailing high surrogate,
    // and never earlier than strict conversion.
    assert!(rl.is_success() || rl.errc == ConvErrc::SourceExhausted);
    assert!(rl.position >= rs.position);
    assert!(lenient.starts_with(&strict));

    if rs.is_success() {
        assert_eq!(rl, rs);
        assert_eq!(lenient, strict);
    }

    // Repaired output matches the replacement rules of the standard
    // library.
    if rl.is_success() {
        let expected: Vec<u32> = char::decode_utf16(data.iter().copied())
            .map(|v| v.unwrap_or(char::REPLACEMENT_CHARACTER) as u32)
            .collect();
        assert_eq!(lenient, expected);
    }
});
