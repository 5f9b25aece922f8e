//! # Validator
//!
//! Validation of code-unit streams against the rules of their encoding
//! form, without producing output. The rules are the same as those of a
//! strict conversion, so a stream validates successfully if, and only if,
//! it converts successfully under `ConvFlag::Strict`.

use crate::convert::{self, ConvFlag};
use crate::error::{ConvErrc, ConvError};
use crate::unit::Unit;

/// ## Operation Outcome
///
/// Result of a validation or conversion. On success, `errc` is
/// `ConvErrc::Success` and `position` equals the length of the input. On
/// failure, `position` is the offset (in code units) of the first unit of
/// the offending sequence.
///
/// The only exception is input beyond U+10FFFF in `UTF-32` streams. It is
/// reported as `ConvErrc::SourceIllegal`, but processing continues to the
/// end of the input, and thus `position` equals the input length.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Outcome {
    pub position: usize,
    pub errc: ConvErrc,
}

impl Outcome {
    /// Create a successful outcome at the given position.
    pub fn success(position: usize) -> Self {
        Self {
            position: position,
            errc: ConvErrc::Success,
        }
    }

    /// Create a failed outcome at the given position.
    pub fn failure(position: usize, errc: ConvErrc) -> Self {
        Self {
            position: position,
            errc: errc,
        }
    }

    /// Check whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.errc.is_success()
    }

    /// ## Convert into a Result
    ///
    /// Yield the position on success, or a positional `ConvError`
    /// otherwise. This allows propagating failures with `?`.
    pub fn into_result(self) -> Result<usize, ConvError> {
        if self.errc.is_success() {
            Ok(self.position)
        } else {
            Err(ConvError {
                position: self.position,
                errc: self.errc,
            })
        }
    }
}

/// ## Validate a Stream
///
/// Scan `src` and stop at the first malformed sequence.
///
/// - `UTF-8`: truncated sequences yield `ConvErrc::SourceExhausted`.
///   Otherwise, the sequence is checked for legality, yielding
///   `ConvErrc::ExpectedContinuationByte`, `ConvErrc::SourceIllegal`, or
///   `ConvErrc::OverLongUtf8Sequence` (for 5 and 6 byte leads).
/// - `UTF-16`: a high surrogate followed by anything but a low surrogate
///   yields `ConvErrc::UnpairedHighSurrogate`, or
///   `ConvErrc::SourceExhausted` at the end of the input. A lone low
///   surrogate yields `ConvErrc::SourceIllegal`.
/// - `UTF-32`: a surrogate yields `ConvErrc::IllegalSurrogateValue`. A
///   value beyond U+10FFFF records `ConvErrc::SourceIllegal` but does not
///   stop the scan. A later surrogate still stops it and replaces the
///   code.
///
/// ```
/// use osi_unicode::{validate, ConvErrc};
///
/// assert!(validate("Grüße".as_bytes()).is_success());
///
/// let r = validate(&[0x0041u16, 0xD800, 0x0042]);
/// assert_eq!(r.position, 1);
/// assert_eq!(r.errc, ConvErrc::UnpairedHighSurrogate);
/// ```
pub fn validate<U: Unit>(src: &[U]) -> Outcome {
    convert::drive(src, ConvFlag::Strict, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-formed input of each width validates up to its end.
    #[test]
    fn valid() {
        let text = "a\u{7FF}\u{FFFF}\u{10FFFF}";
        let u16s: alloc::vec::Vec<u16> = text.encode_utf16().collect();

        assert_eq!(validate(text.as_bytes()), Outcome::success(10));
        assert_eq!(validate(&u16s), Outcome::success(5));
        assert_eq!(validate(&[0x61u32, 0x7FF, 0xFFFF, 0x10FFFF]), Outcome::success(4));
        assert_eq!(validate::<u8>(&[]), Outcome::success(0));
    }

    // Malformed UTF-8 is reported at the lead byte of the offending
    // sequence.
    #[test]
    fn malformed_utf8() {
        assert_eq!(
            validate(&[0xF0u8, 0x90]),
            Outcome::failure(0, ConvErrc::SourceExhausted),
        );
        assert_eq!(
            validate(&[0x41u8, 0xC3, 0x28]),
            Outcome::failure(1, ConvErrc::ExpectedContinuationByte),
        );
        assert_eq!(
            validate(&[0x41u8, 0x42, 0xE0, 0x80, 0x80]),
            Outcome::failure(2, ConvErrc::SourceIllegal),
        );
        assert_eq!(
            validate(&[0x80u8]),
            Outcome::failure(0, ConvErrc::SourceIllegal),
        );
        assert_eq!(
            validate(&[0x41u8, 0xF8, 0x88, 0x80, 0x80, 0x80]),
            Outcome::failure(1, ConvErrc::OverLongUtf8Sequence),
        );
    }

    // Unpaired surrogates in UTF-16 are reported at the surrogate.
    #[test]
    fn malformed_utf16() {
        assert_eq!(validate(&[0xD800u16, 0xDC00]), Outcome::success(2));
        assert_eq!(
            validate(&[0xD800u16]),
            Outcome::failure(0, ConvErrc::SourceExhausted),
        );
        assert_eq!(
            validate(&[0x41u16, 0xD800, 0x41]),
            Outcome::failure(1, ConvErrc::UnpairedHighSurrogate),
        );
        assert_eq!(
            validate(&[0x41u16, 0x42, 0xDFFF]),
            Outcome::failure(2, ConvErrc::SourceIllegal),
        );
    }

    // UTF-32 surrogates stop the scan, while out-of-range values are only
    // recorded and the scan continues to the end.
    #[test]
    fn utf32_asymmetry() {
        assert_eq!(
            validate(&[0x41u32, 0xD800, 0x42]),
            Outcome::failure(1, ConvErrc::IllegalSurrogateValue),
        );
        assert_eq!(
            validate(&[0x110000u32, 0x41, 0x42]),
            Outcome { position: 3, errc: ConvErrc::SourceIllegal },
        );
        assert_eq!(
            validate(&[0x110000u32, 0x41, 0xDC00, 0x42]),
            Outcome::failure(2, ConvErrc::IllegalSurrogateValue),
        );
    }

    // Validating the same input twice yields the same outcome.
    #[test]
    fn idempotent() {
        let inputs: [&[u8]; 4] = [b"abc", &[0xE2, 0x82], &[0xED, 0xA0, 0x80], &[]];
        for v in inputs {
            assert_eq!(validate(v), validate(v));
        }
    }

    // Outcomes convert into results carrying the position.
    #[test]
    fn into_result() {
        assert_eq!(Outcome::success(7).into_result(), Ok(7));
        assert_eq!(
            Outcome::failure(3, ConvErrc::SourceExhausted).into_result(),
            Err(ConvError { position: 3, errc: ConvErrc::SourceExhausted }),
        );
    }
}
