//! # Transcoder
//!
//! Conversion between any pair of the `UTF-8`, `UTF-16`, and `UTF-32`
//! encoding forms. The source is decoded one scalar value at a time and
//! re-encoded into the target width, appending to a caller-provided sink.
//!
//! ## Policy
//!
//! Under `ConvFlag::Strict`, conversion stops at the first malformed
//! sequence and reports its start. Under `ConvFlag::Lenient`, unpaired and
//! misplaced surrogates are replaced with U+FFFD and conversion continues.
//! Truncated input and illegal `UTF-8` byte patterns stop conversion under
//! either policy. Values beyond U+10FFFF in the source are always replaced
//! and flagged as `ConvErrc::SourceIllegal`, without stopping.

use crate::codec::{self, Step};
use crate::error::ConvErrc;
use crate::unit::{Sink, Unit};
use crate::validate::Outcome;

/// ## Conversion Flag
///
/// Error policy of a conversion. The policy is constant over the lifetime
/// of an operation and has to be specified when it is started.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "dev", derive(arbitrary::Arbitrary))]
pub enum ConvFlag {
    /// Any non-conformant input is a hard error.
    #[default]
    Strict,
    /// Non-conformant input is replaced with U+FFFD, if possible.
    Lenient,
}

// Decode `src` under the given policy and hand each produced scalar to
// `emit`, including replacement characters. Scanning stops at the first
// failed step.
pub(crate) fn drive<U, F>(src: &[U], flag: ConvFlag, mut emit: F) -> Outcome
where
    U: Unit,
    F: FnMut(u32),
{
    let mut pos = 0;
    let mut errc = ConvErrc::Success;

    while pos < src.len() {
        let step = codec::decode(&src[pos..], flag);
        match step {
            Step::Failed(e) => return Outcome::failure(pos, e),
            Step::Flagged { .. } => {
                if errc.is_success() {
                    errc = ConvErrc::SourceIllegal;
                }
            },
            Step::Scalar { .. } | Step::Replaced { .. } => {},
        }

        if let Some(ch) = step.scalar() {
            emit(ch);
        }
        pos += step.len();
    }

    Outcome {
        position: pos,
        errc: errc,
    }
}

/// ## Convert Between Encoding Forms
///
/// Decode `src` and append its re-encoding in the width of `T` to `sink`.
/// Supplementary scalar values are split into surrogate pairs for
/// `UTF-16` targets, and encoded with the shortest form for `UTF-8`
/// targets.
///
/// On success, the returned outcome has `ConvErrc::Success` and a position
/// equal to `src.len()`. On failure, the position is the offset of the
/// first code unit of the offending sequence. Anything converted before
/// that point has been appended to `sink`.
///
/// Values beyond U+10FFFF in a `UTF-32` source are replaced with U+FFFD
/// and reported as `ConvErrc::SourceIllegal`, but conversion continues to
/// the end of the input and the position equals `src.len()`.
///
/// ```
/// use osi_unicode::{convert, ConvErrc, ConvFlag};
///
/// let mut utf16: Vec<u16> = Vec::new();
/// let r = convert("a\u{1F600}".as_bytes(), &mut utf16, ConvFlag::Strict);
/// assert_eq!(r.errc, ConvErrc::Success);
/// assert_eq!(utf16, [0x0061, 0xD83D, 0xDE00]);
/// ```
pub fn convert<S, T, K>(src: &[S], sink: &mut K, flag: ConvFlag) -> Outcome
where
    S: Unit,
    T: Unit,
    K: Sink<T> + ?Sized,
{
    drive(src, flag, |ch| codec::encode::<T, K>(ch, &mut *sink))
}
