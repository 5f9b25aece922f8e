// # Scalar Codec
//
// Decoding of a single scalar value from the front of a code-unit stream,
// and encoding of a single scalar value into a sink. Validation,
// conversion, sequence generation, and length computation are all built on
// these two primitives, so the classification of malformed input is
// identical across the crate.

use crate::convert::ConvFlag;
use crate::error::ConvErrc;
use crate::table;
use crate::unit::{Sink, Unit, Width};

// ## Decoding Step
//
// Result of decoding the sequence at the front of a stream. Every variant
// except `Failed` consumes `len` units. `Failed` consumes nothing, so the
// caller stays at the start of the offending sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    // A scalar value was decoded.
    Scalar { ch: u32, len: usize },
    // Malformed input was replaced with U+FFFD under lenient policy.
    Replaced { len: usize },
    // Input beyond U+10FFFF was replaced with U+FFFD. This is flagged as
    // `ConvErrc::SourceIllegal` under any policy, but does not stop.
    Flagged { len: usize },
    // Decoding cannot continue.
    Failed(ConvErrc),
}

impl Step {
    // Number of units consumed by this step.
    pub(crate) fn len(&self) -> usize {
        match *self {
            Step::Scalar { len, .. } => len,
            Step::Replaced { len } => len,
            Step::Flagged { len } => len,
            Step::Failed(_) => 0,
        }
    }

    // Scalar value produced by this step, if any.
    pub(crate) fn scalar(&self) -> Option<u32> {
        match *self {
            Step::Scalar { ch, .. } => Some(ch),
            Step::Replaced { .. } | Step::Flagged { .. } => Some(table::REPLACEMENT_CHAR),
            Step::Failed(_) => None,
        }
    }
}

// Decode the sequence at the front of `src`, which must not be empty.
pub(crate) fn decode<U: Unit>(src: &[U], flag: ConvFlag) -> Step {
    match U::WIDTH {
        Width::U8 => decode_u8(src, flag),
        Width::U16 => decode_u16(src, flag),
        Width::U32 => decode_u32(src, flag),
    }
}

fn decode_u8<U: Unit>(src: &[U], flag: ConvFlag) -> Step {
    let lead = src[0].widen() as u8;
    let extra = table::TRAILING_BYTES_FOR_UTF8[lead as usize] as usize;
    let len = extra + 1;

    // Truncation and legality are checked under any policy. Neither has a
    // well-defined sequence length to skip.
    if len > src.len() {
        return Step::Failed(ConvErrc::SourceExhausted);
    }

    let mut seq = [0u8; 6];
    for (to, from) in seq.iter_mut().zip(&src[..len]) {
        *to = from.widen() as u8;
    }

    let r = table::is_legal_utf8(&seq[..len]);
    if !r.is_success() {
        return Step::Failed(r);
    }

    let mut ch: u32 = 0;
    for v in &seq[..extra] {
        ch = ch.wrapping_add(*v as u32) << 6;
    }
    ch = ch.wrapping_add(seq[extra] as u32);
    ch = ch.wrapping_sub(table::OFFSETS_FROM_UTF8[extra]);

    // Unreachable for legal sequences, the second-byte ranges of `ED` and
    // `F4` already exclude surrogates and values beyond U+10FFFF.
    if ch > table::MAX_LEGAL_UTF32 {
        Step::Flagged { len }
    } else if table::is_surrogate(ch) {
        match flag {
            ConvFlag::Strict => Step::Failed(ConvErrc::SourceIllegal),
            ConvFlag::Lenient => Step::Replaced { len },
        }
    } else {
        Step::Scalar { ch, len }
    }
}

fn decode_u16<U: Unit>(src: &[U], flag: ConvFlag) -> Step {
    let ch = src[0].widen();

    if table::is_high_surrogate(ch) {
        match src.get(1).map(|v| v.widen()) {
            Some(ch2) if table::is_low_surrogate(ch2) => Step::Scalar {
                ch: table::combine_surrogates(ch, ch2),
                len: 2,
            },
            Some(_) => match flag {
                ConvFlag::Strict => Step::Failed(ConvErrc::UnpairedHighSurrogate),
                ConvFlag::Lenient => Step::Replaced { len: 1 },
            },
            // The low surrogate might still be on its way.
            None => Step::Failed(ConvErrc::SourceExhausted),
        }
    } else if table::is_low_surrogate(ch) {
        match flag {
            ConvFlag::Strict => Step::Failed(ConvErrc::SourceIllegal),
            ConvFlag::Lenient => Step::Replaced { len: 1 },
        }
    } else {
        Step::Scalar { ch, len: 1 }
    }
}

fn decode_u32<U: Unit>(src: &[U], flag: ConvFlag) -> Step {
    let ch = src[0].widen();

    if table::is_surrogate(ch) {
        match flag {
            ConvFlag::Strict => Step::Failed(ConvErrc::IllegalSurrogateValue),
            ConvFlag::Lenient => Step::Replaced { len: 1 },
        }
    } else if ch > table::MAX_LEGAL_UTF32 {
        Step::Flagged { len: 1 }
    } else {
        Step::Scalar { ch, len: 1 }
    }
}

// Encode the scalar `ch` into `sink`. Values beyond U+10FFFF are encoded as
// U+FFFD.
pub(crate) fn encode<U, K>(ch: u32, sink: &mut K)
where
    U: Unit,
    K: Sink<U> + ?Sized,
{
    match U::WIDTH {
        Width::U8 => encode_u8(ch, sink),
        Width::U16 => encode_u16(ch, sink),
        Width::U32 => encode_u32(ch, sink),
    }
}

fn encode_u8<U, K>(mut ch: u32, sink: &mut K)
where
    U: Unit,
    K: Sink<U> + ?Sized,
{
    const BYTE_MASK: u32 = 0xBF;
    const BYTE_MARK: u32 = 0x80;

    let len = table::utf8_len(ch);
    if ch > table::MAX_LEGAL_UTF32 {
        ch = table::REPLACEMENT_CHAR;
    }

    // Fill trailing bytes back to front, 6 bits each.
    let mut bytes = [0u8; 4];
    for v in bytes[1..len].iter_mut().rev() {
        *v = ((ch | BYTE_MARK) & BYTE_MASK) as u8;
        ch >>= 6;
    }
    bytes[0] = (ch | table::FIRST_BYTE_MARK[len] as u32) as u8;

    for v in &bytes[..len] {
        sink.push_unit(U::narrow(*v as u32));
    }
}

fn encode_u16<U, K>(mut ch: u32, sink: &mut K)
where
    U: Unit,
    K: Sink<U> + ?Sized,
{
    if ch > table::MAX_UTF16 {
        ch = table::REPLACEMENT_CHAR;
    }

    if ch <= table::MAX_BMP {
        sink.push_unit(U::narrow(ch));
    } else {
        ch -= table::HALF_BASE;
        sink.push_unit(U::narrow((ch >> table::HALF_SHIFT) + table::SUR_HIGH_START));
        sink.push_unit(U::narrow((ch & table::HALF_MASK) + table::SUR_LOW_START));
    }
}

fn encode_u32<U, K>(ch: u32, sink: &mut K)
where
    U: Unit,
    K: Sink<U> + ?Sized,
{
    if ch > table::MAX_LEGAL_UTF32 {
        sink.push_unit(U::narrow(table::REPLACEMENT_CHAR));
    } else {
        sink.push_unit(U::narrow(ch));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use super::*;

    fn encoded<U: Unit>(ch: u32) -> Vec<U> {
        let mut v = Vec::new();
        encode::<U, _>(ch, &mut v);
        v
    }

    // Decode single sequences of each width and verify the consumed length
    // as well as the decoded value.
    #[test]
    fn decode_basic() {
        assert_eq!(
            decode(&[0x41u8, 0x42], ConvFlag::Strict),
            Step::Scalar { ch: 0x41, len: 1 },
        );
        assert_eq!(
            decode(&[0xC3u8, 0xA9], ConvFlag::Strict),
            Step::Scalar { ch: 0xE9, len: 2 },
        );
        assert_eq!(
            decode(&[0xE2u8, 0x82, 0xAC], ConvFlag::Strict),
            Step::Scalar { ch: 0x20AC, len: 3 },
        );
        assert_eq!(
            decode(&[0xF0u8, 0x9F, 0x98, 0x80], ConvFlag::Strict),
            Step::Scalar { ch: 0x1F600, len: 4 },
        );
        assert_eq!(
            decode(&[0xD83Du16, 0xDE00], ConvFlag::Strict),
            Step::Scalar { ch: 0x1F600, len: 2 },
        );
        assert_eq!(
            decode(&[0x10FFFFu32], ConvFlag::Strict),
            Step::Scalar { ch: 0x10FFFF, len: 1 },
        );
    }

    // Malformed input is classified the same way under both policies,
    // except where lenient policy defines a replacement.
    #[test]
    fn decode_malformed() {
        for flag in [ConvFlag::Strict, ConvFlag::Lenient] {
            assert_eq!(
                decode(&[0xF0u8, 0x90], flag),
                Step::Failed(ConvErrc::SourceExhausted),
            );
            assert_eq!(
                decode(&[0xC3u8, 0x41], flag),
                Step::Failed(ConvErrc::ExpectedContinuationByte),
            );
            assert_eq!(
                decode(&[0xD800u16], flag),
                Step::Failed(ConvErrc::SourceExhausted),
            );
            assert_eq!(decode(&[0x110000u32], flag), Step::Flagged { len: 1 });
        }

        assert_eq!(
            decode(&[0xD800u16, 0x0041], ConvFlag::Strict),
            Step::Failed(ConvErrc::UnpairedHighSurrogate),
        );
        assert_eq!(
            decode(&[0xD800u16, 0x0041], ConvFlag::Lenient),
            Step::Replaced { len: 1 },
        );
        assert_eq!(
            decode(&[0xDC00u16], ConvFlag::Strict),
            Step::Failed(ConvErrc::SourceIllegal),
        );
        assert_eq!(
            decode(&[0xDFFFu32], ConvFlag::Strict),
            Step::Failed(ConvErrc::IllegalSurrogateValue),
        );
        assert_eq!(decode(&[0xDFFFu32], ConvFlag::Lenient), Step::Replaced { len: 1 });

        assert_eq!(Step::Replaced { len: 1 }.scalar(), Some(0xFFFD));
        assert_eq!(Step::Failed(ConvErrc::SourceIllegal).len(), 0);
    }

    // UTF-8 sequences that would decode to surrogates or beyond U+10FFFF
    // are rejected by the legality check under both policies, while their
    // legal neighbors decode as scalars.
    #[test]
    fn decode_utf8_limits() {
        for flag in [ConvFlag::Strict, ConvFlag::Lenient] {
            assert_eq!(
                decode(&[0xED_u8, 0x9F, 0xBF], flag),
                Step::Scalar { ch: 0xD7FF, len: 3 },
            );
            assert_eq!(
                decode(&[0xED_u8, 0xA0, 0x80], flag),
                Step::Failed(ConvErrc::SourceIllegal),
            );
            assert_eq!(
                decode(&[0xF4_u8, 0x8F, 0xBF, 0xBF], flag),
                Step::Scalar { ch: 0x10FFFF, len: 4 },
            );
            assert_eq!(
                decode(&[0xF4_u8, 0x90, 0x80, 0x80], flag),
                Step::Failed(ConvErrc::SourceIllegal),
            );
            assert_eq!(
                decode(&[0xF5_u8, 0x80, 0x80, 0x80], flag),
                Step::Failed(ConvErrc::SourceIllegal),
            );
        }
    }

    // Encode scalars at the boundaries of each form.
    #[test]
    fn encode_basic() {
        assert_eq!(encoded::<u8>(0x24), [0x24]);
        assert_eq!(encoded::<u8>(0xA2), [0xC2, 0xA2]);
        assert_eq!(encoded::<u8>(0x20AC), [0xE2, 0x82, 0xAC]);
        assert_eq!(encoded::<u8>(0x10348), [0xF0, 0x90, 0x8D, 0x88]);
        assert_eq!(encoded::<u8>(0x110000), [0xEF, 0xBF, 0xBD]);

        assert_eq!(encoded::<u16>(0xFFFF), [0xFFFF]);
        assert_eq!(encoded::<u16>(0x10000), [0xD800, 0xDC00]);
        assert_eq!(encoded::<u16>(0x10FFFF), [0xDBFF, 0xDFFF]);
        assert_eq!(encoded::<u16>(0x110000), [0xFFFD]);

        assert_eq!(encoded::<u32>(0x1F600), [0x1F600]);
        assert_eq!(encoded::<u32>(0x7FFFFFFF), [0xFFFD]);
    }
}
