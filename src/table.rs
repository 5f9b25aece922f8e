//! # Tables and Constants
//!
//! Lookup tables and numeric constants of the Unicode encoding forms, as
//! used by the reference conversion algorithm. Everything else in this
//! crate is built on top of these.

use crate::error::ConvErrc;

/// ## Trailing Bytes of UTF-8 Sequences
///
/// Indexed by the lead byte of a `UTF-8` sequence, this yields the number
/// of trailing bytes that follow it. Lead bytes `0xF8` to `0xFF` announce
/// 4 or 5 trailing bytes, which is not legal `UTF-8` but is kept so such
/// input is classified as overlong rather than truncated.
pub const TRAILING_BYTES_FOR_UTF8: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5,
];

/// ## UTF-8 Offsets
///
/// Magic values subtracted from the accumulated bits of a `UTF-8` sequence,
/// indexed by its number of trailing bytes. Accumulation adds each byte and
/// shifts by 6, so the marker bits of lead and trailing bytes end up in the
/// sum. Subtracting the offset removes them in one step.
pub const OFFSETS_FROM_UTF8: [u32; 6] = [
    0x00000000,
    0x00003080,
    0x000E2080,
    0x03C82080,
    0xFA082080,
    0x82082080,
];

/// ## First Byte Marks
///
/// Marker bits OR-ed into the lead byte of a `UTF-8` sequence, indexed by
/// the total length of the sequence.
pub const FIRST_BYTE_MARK: [u8; 7] = [0x00, 0x00, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC];

/// The Unicode replacement character, U+FFFD.
pub const REPLACEMENT_CHAR: u32 = 0x0000FFFD;
/// Largest codepoint of the Basic Multilingual Plane.
pub const MAX_BMP: u32 = 0x0000FFFF;
/// Largest codepoint representable in `UTF-16`.
pub const MAX_UTF16: u32 = 0x0010FFFF;
/// Largest legal codepoint.
pub const MAX_LEGAL_UTF32: u32 = 0x0010FFFF;

/// Shift between the halves of a surrogate pair.
pub const HALF_SHIFT: u32 = 10;
/// Base subtracted from supplementary codepoints before splitting.
pub const HALF_BASE: u32 = 0x00010000;
/// Mask of the low half of a surrogate pair.
pub const HALF_MASK: u32 = 0x000003FF;

/// First high surrogate.
pub const SUR_HIGH_START: u32 = 0xD800;
/// Last high surrogate.
pub const SUR_HIGH_END: u32 = 0xDBFF;
/// First low surrogate.
pub const SUR_LOW_START: u32 = 0xDC00;
/// Last low surrogate.
pub const SUR_LOW_END: u32 = 0xDFFF;

/// Check whether `v` is a `UTF-8` continuation byte (`10xxxxxx`).
pub fn is_continuation_byte(v: u8) -> bool {
    (v & 0xC0) == 0x80
}

/// Check whether `v` is a high (leading) surrogate.
pub fn is_high_surrogate(v: u32) -> bool {
    v >= SUR_HIGH_START && v <= SUR_HIGH_END
}

/// Check whether `v` is a low (trailing) surrogate.
pub fn is_low_surrogate(v: u32) -> bool {
    v >= SUR_LOW_START && v <= SUR_LOW_END
}

/// Check whether `v` is in the surrogate range.
pub fn is_surrogate(v: u32) -> bool {
    v >= SUR_HIGH_START && v <= SUR_LOW_END
}

/// ## Combine a Surrogate Pair
///
/// Compute the codepoint encoded by the high surrogate `hi` and the low
/// surrogate `lo`. The caller must ensure both are in their respective
/// ranges.
pub fn combine_surrogates(hi: u32, lo: u32) -> u32 {
    ((hi - SUR_HIGH_START) << HALF_SHIFT) + (lo - SUR_LOW_START) + HALF_BASE
}

/// ## Length of the UTF-8 Encoding
///
/// Yield the number of bytes needed to encode `ch` in `UTF-8`. Values
/// beyond U+10FFFF are replaced with U+FFFD when encoded, hence they need
/// 3 bytes.
pub fn utf8_len(ch: u32) -> usize {
    if ch < 0x80 {
        1
    } else if ch < 0x800 {
        2
    } else if ch < 0x10000 {
        3
    } else if ch <= MAX_LEGAL_UTF32 {
        4
    } else {
        3
    }
}

/// ## Check UTF-8 Sequence Legality
///
/// Check whether `seq` is one legal `UTF-8` sequence. `seq` must hold
/// exactly the lead byte and the trailing bytes it announces (see
/// `TRAILING_BYTES_FOR_UTF8`).
///
/// Trailing bytes are checked back to front for the continuation pattern.
/// The second byte is range-checked against the lead byte, which rejects
/// overlong forms and encoded surrogates. Lead bytes that are
/// continuation bytes, overlong 2-byte leads (`0xC0`, `0xC1`), and leads
/// beyond `0xF4` are illegal. Sequences longer than 4 bytes are reported
/// as overlong.
pub fn is_legal_utf8(seq: &[u8]) -> ConvErrc {
    let first = match seq.first() {
        Some(v) => *v,
        None => return ConvErrc::OverLongUtf8Sequence,
    };

    if seq.len() > 4 {
        return ConvErrc::OverLongUtf8Sequence;
    }

    if seq.len() >= 2 {
        if seq[1..].iter().any(|v| !is_continuation_byte(*v)) {
            return ConvErrc::ExpectedContinuationByte;
        }

        let second = seq[1];
        let illegal = match first {
            0xE0 => second < 0xA0,
            0xED => second > 0x9F,
            0xF0 => second < 0x90,
            0xF4 => second > 0x8F,
            _ => second < 0x80,
        };
        if illegal {
            return ConvErrc::SourceIllegal;
        }
    }

    if first >= 0x80 && first < 0xC2 {
        return ConvErrc::SourceIllegal;
    }
    if first > 0xF4 {
        return ConvErrc::SourceIllegal;
    }

    ConvErrc::Success
}
