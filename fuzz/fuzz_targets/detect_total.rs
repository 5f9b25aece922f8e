#![no_main]

use libfuzzer_sys::fuzz_target;
use osi_unicode::bom::{detect_encoding_from_bom, detect_json_encoding};
use osi_unicode::{detect_encoding, skip_bom, Encoding};

fuzz_target!(|data: Vec<u8>| {
    let bom = detect_encoding_from_bom(&data);
    let r = detect_encoding(&data);
    assert!(r.position <= data.len());
    assert!([0, 2, 3, 4].contains(&r.position));

    // A mark always wins, and only a mark advances the position.
    if bom.encoding != Encoding::Undetected {
        assert_eq!(r, bom);
        assert!(r.position > 0);
    } else {
        assert_eq!(r.position, 0);
    }

    let json = detect_json_encoding(&data);
    assert_ne!(json.encoding, Encoding::Undetected);
    assert!(json.position <= data.len());

    let s = skip_bom(&data);
    match r.encoding {
        Encoding::Utf8 | Encoding::Undetected => {
            assert!(s.is_success());
            assert_eq!(s.position, r.position);
        },
        _ => {
            assert!(!s.is_success());
            assert_eq!(s.position, 0);
        },
    }
});
