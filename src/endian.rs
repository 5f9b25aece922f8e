//! # Byte Streams
//!
//! The engine itself works on streams of code units. Data usually arrives
//! as bytes, though. This module reassembles code units of a given byte
//! order from raw bytes, and provides a pipeline that detects the encoding
//! of a byte stream and transcodes it to `UTF-8`.
//!
//! Positions reported by this module are always byte offsets into the
//! input, including the byte-order mark.

use alloc::vec::Vec;
use crate::bom::{self, Encoding};
use crate::convert::{self, ConvFlag};
use crate::error::ConvErrc;
use crate::unit::{Sink, Unit, Width};
use crate::validate::Outcome;

/// ## Byte Order
///
/// Order of the bytes of multi-byte code units.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "dev", derive(arbitrary::Arbitrary))]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

impl Encoding {
    /// ## Code-Unit Width of the Encoding
    ///
    /// Yield the width of the code units of this encoding, or `None` if
    /// the encoding is undetected.
    pub fn width(self) -> Option<Width> {
        match self {
            Encoding::Undetected => None,
            Encoding::Utf8 => Some(Width::U8),
            Encoding::Utf16Le | Encoding::Utf16Be => Some(Width::U16),
            Encoding::Utf32Le | Encoding::Utf32Be => Some(Width::U32),
        }
    }

    /// ## Byte Order of the Encoding
    ///
    /// Yield the byte order of multi-byte encodings. `UTF-8` and
    /// undetected encodings have none.
    pub fn byte_order(self) -> Option<ByteOrder> {
        match self {
            Encoding::Undetected | Encoding::Utf8 => None,
            Encoding::Utf16Le | Encoding::Utf32Le => Some(ByteOrder::Little),
            Encoding::Utf16Be | Encoding::Utf32Be => Some(ByteOrder::Big),
        }
    }
}

/// ## Read Code Units from Bytes
///
/// Reassemble code units of type `U` from `bytes` in the given byte
/// order, and append them to `sink`. Only complete units are read. The
/// number of bytes consumed is returned, which is smaller than the input
/// length if it ends with a partial unit.
pub fn read_units<U, K>(bytes: &[u8], order: ByteOrder, sink: &mut K) -> usize
where
    U: Unit,
    K: Sink<U> + ?Sized,
{
    let n = U::WIDTH.bytes();
    let mut consumed = 0;

    for chunk in bytes.chunks_exact(n) {
        sink.push_unit(U::from_bytes(chunk, order));
        consumed += n;
    }

    consumed
}

// Reassemble the units of `bytes` and transcode them to UTF-8. The
// resulting position is a byte offset into `bytes`.
fn transcode_wide<U, K>(
    bytes: &[u8],
    order: ByteOrder,
    flag: ConvFlag,
    sink: &mut K,
) -> Outcome
where
    U: Unit,
    K: Sink<u8> + ?Sized,
{
    let n = U::WIDTH.bytes();
    let mut units: Vec<U> = Vec::with_capacity(bytes.len() / n);
    let consumed = read_units(bytes, order, &mut units);

    // Hard failures stop before the end of the units. Anything else has
    // scanned all complete units, so a partial unit is reported next.
    let r = convert::convert(&units, sink, flag);
    if r.position == units.len() && consumed < bytes.len() {
        Outcome::failure(consumed, ConvErrc::SourceExhausted)
    } else {
        Outcome {
            position: r.position * n,
            errc: r.errc,
        }
    }
}

/// ## Transcode a Byte Stream to UTF-8
///
/// Detect the encoding of `bytes` via `bom::detect_encoding()`, skip its
/// byte-order mark, and transcode the remainder to `UTF-8`, appending to
/// `sink`. Undetected input is treated as `UTF-8`.
///
/// The encoding that was used for decoding is returned alongside the
/// outcome of the conversion. The position of the outcome is a byte
/// offset into `bytes`. A partial code unit at the end of the input fails
/// with `ConvErrc::SourceExhausted` at its first byte.
///
/// ```
/// use osi_unicode::{ConvFlag, Encoding};
/// use osi_unicode::endian::bytes_to_utf8;
///
/// let mut out: Vec<u8> = Vec::new();
/// let (enc, r) = bytes_to_utf8(b"\xFF\xFEh\x00i\x00", ConvFlag::Strict, &mut out);
/// assert_eq!(enc, Encoding::Utf16Le);
/// assert_eq!(r.position, 6);
/// assert_eq!(out, b"hi");
/// ```
pub fn bytes_to_utf8<K>(
    bytes: &[u8],
    flag: ConvFlag,
    sink: &mut K,
) -> (Encoding, Outcome)
where
    K: Sink<u8> + ?Sized,
{
    let d = bom::detect_encoding(bytes);
    let body = &bytes[d.position..];
    let encoding = match d.encoding {
        Encoding::Undetected => Encoding::Utf8,
        v => v,
    };

    let r = match (encoding.width(), encoding.byte_order()) {
        (Some(Width::U16), Some(order)) => transcode_wide::<u16, K>(body, order, flag, sink),
        (Some(Width::U32), Some(order)) => transcode_wide::<u32, K>(body, order, flag, sink),
        _ => convert::convert::<u8, u8, K>(body, sink, flag),
    };

    (
        encoding,
        Outcome {
            position: d.position + r.position,
            errc: r.errc,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Whole units are read in the requested byte order, and a trailing
    // partial unit is left unconsumed.
    #[test]
    fn read() {
        let mut v: Vec<u16> = Vec::new();
        assert_eq!(read_units(&[0x41, 0x00, 0x3D, 0xD8, 0x00], ByteOrder::Little, &mut v), 4);
        assert_eq!(v, [0x0041, 0xD83D]);

        let mut v: Vec<u32> = Vec::new();
        assert_eq!(read_units(&[0x00, 0x01, 0xF6, 0x00, 0x00], ByteOrder::Big, &mut v), 4);
        assert_eq!(v, [0x1F600]);

        let mut v: Vec<u8> = Vec::new();
        assert_eq!(read_units(b"ab", ByteOrder::Big, &mut v), 2);
        assert_eq!(v, b"ab");
    }

    // Encodings map to their unit width and byte order.
    #[test]
    fn encoding_properties() {
        assert_eq!(Encoding::Undetected.width(), None);
        assert_eq!(Encoding::Utf8.width(), Some(Width::U8));
        assert_eq!(Encoding::Utf16Be.width(), Some(Width::U16));
        assert_eq!(Encoding::Utf32Le.width(), Some(Width::U32));

        assert_eq!(Encoding::Utf8.byte_order(), None);
        assert_eq!(Encoding::Utf16Le.byte_order(), Some(ByteOrder::Little));
        assert_eq!(Encoding::Utf32Be.byte_order(), Some(ByteOrder::Big));
    }

    // Each encoding, with and without a mark, transcodes to the same
    // UTF-8 text.
    #[test]
    fn pipeline() {
        let inputs: [(&[u8], Encoding, usize); 6] = [
            (b"\xEF\xBB\xBFh\xC3\xA9", Encoding::Utf8, 6),
            (b"h\x00\xE9\x00", Encoding::Utf16Le, 4),
            (b"\xFE\xFF\x00h\x00\xE9", Encoding::Utf16Be, 6),
            (b"\xFF\xFE\x00\x00h\x00\x00\x00\xE9\x00\x00\x00", Encoding::Utf32Le, 12),
            (b"\x00\x00\x00h\x00\x00\x00\xE9", Encoding::Utf32Be, 8),
            (b"h\xC3\xA9", Encoding::Utf8, 3),
        ];

        for (bytes, encoding, end) in inputs {
            let mut out: Vec<u8> = Vec::new();
            let r = bytes_to_utf8(bytes, ConvFlag::Strict, &mut out);
            assert_eq!(r, (encoding, Outcome::success(end)));
            assert_eq!(out, "h\u{E9}".as_bytes());
        }
    }

    // Undetected input is decoded as UTF-8.
    #[test]
    fn pipeline_undetected() {
        let mut out: Vec<u8> = Vec::new();
        let r = bytes_to_utf8(b"ab\x00\x00", ConvFlag::Strict, &mut out);
        assert_eq!(r, (Encoding::Utf8, Outcome::success(4)));
        assert_eq!(out, b"ab\x00\x00");

        let mut out: Vec<u8> = Vec::new();
        let r = bytes_to_utf8(b"", ConvFlag::Strict, &mut out);
        assert_eq!(r, (Encoding::Utf8, Outcome::success(0)));
        assert!(out.is_empty());
    }

    // Failures are reported as byte offsets into the input, counting the
    // byte-order mark.
    #[test]
    fn pipeline_failures() {
        // Unpaired high surrogate after the mark and one unit.
        let mut out: Vec<u8> = Vec::new();
        let r = bytes_to_utf8(b"\xFF\xFEa\x00\x00\xD8b\x00", ConvFlag::Strict, &mut out);
        assert_eq!(r, (Encoding::Utf16Le, Outcome::failure(4, ConvErrc::UnpairedHighSurrogate)));
        assert_eq!(out, b"a");

        // Lenient policy repairs it.
        let mut out: Vec<u8> = Vec::new();
        let r = bytes_to_utf8(b"\xFF\xFEa\x00\x00\xD8b\x00", ConvFlag::Lenient, &mut out);
        assert_eq!(r, (Encoding::Utf16Le, Outcome::success(8)));
        assert_eq!(out, "a\u{FFFD}b".as_bytes());

        // Partial trailing unit.
        let mut out: Vec<u8> = Vec::new();
        let r = bytes_to_utf8(b"\xFE\xFF\x00a\x00", ConvFlag::Strict, &mut out);
        assert_eq!(r, (Encoding::Utf16Be, Outcome::failure(4, ConvErrc::SourceExhausted)));
        assert_eq!(out, b"a");

        // Out-of-range UTF-32 is flagged, but the scan completes.
        let mut out: Vec<u8> = Vec::new();
        let r = bytes_to_utf8(b"\x00\x00\x00a\x00\x11\x00\x00", ConvFlag::Strict, &mut out);
        assert_eq!(r, (Encoding::Utf32Be, Outcome { position: 8, errc: ConvErrc::SourceIllegal }));
        assert_eq!(out, "a\u{FFFD}".as_bytes());

        // Malformed UTF-8 after a mark.
        let mut out: Vec<u8> = Vec::new();
        let r = bytes_to_utf8(b"\xEF\xBB\xBFab\xC3", ConvFlag::Lenient, &mut out);
        assert_eq!(r, (Encoding::Utf8, Outcome::failure(5, ConvErrc::SourceExhausted)));
        assert_eq!(out, b"ab");
    }
}
