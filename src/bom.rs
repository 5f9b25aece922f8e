//! # Encoding Detection
//!
//! Detection of the encoding of a byte stream, based on its byte-order
//! mark (BOM) or, if there is none, on the pattern of null bytes at its
//! start. Text mostly consists of ASCII, so in `UTF-16` and `UTF-32` every
//! other, or three out of four, bytes are zero. Which ones are zero
//! reveals the byte order.
//!
//! This module also implements BOM skipping on streams whose code-unit
//! width is already known.

use crate::error::EncodingErrc;
use crate::unit::{Unit, Width};

/// ## Encoding Kind
///
/// The encodings this engine can detect.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "dev", derive(arbitrary::Arbitrary))]
pub enum Encoding {
    /// The encoding could not be determined.
    #[default]
    Undetected,
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    /// ## Name of the Encoding
    ///
    /// Yield the stable, lower-case name of the encoding, as used in
    /// diagnostics (e.g., `utf16le`).
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Undetected => "undetected",
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Utf16Be => "utf16be",
            Encoding::Utf32Le => "utf32le",
            Encoding::Utf32Be => "utf32be",
        }
    }
}

impl core::fmt::Display for Encoding {
    fn fmt(
        &self,
        fmt: &mut core::fmt::Formatter<'_>,
    ) -> Result<(), core::fmt::Error> {
        fmt.write_str(self.as_str())
    }
}

/// ## Detection Result
///
/// The detected encoding, and the position (in bytes) right after the
/// byte-order mark, if any. Heuristic detection never advances the
/// position.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Detection {
    pub position: usize,
    pub encoding: Encoding,
}

/// ## BOM-Skipping Result
///
/// The position (in code units) right after the byte-order mark, if any,
/// and the result code. On failure, the position is left at the start of
/// the stream.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SkipBom {
    pub position: usize,
    pub errc: EncodingErrc,
}

impl SkipBom {
    fn success(position: usize) -> Self {
        Self {
            position: position,
            errc: EncodingErrc::Success,
        }
    }

    fn failure(errc: EncodingErrc) -> Self {
        Self {
            position: 0,
            errc: errc,
        }
    }

    /// Check whether the stream matched the expected width.
    pub fn is_success(&self) -> bool {
        self.errc.is_success()
    }
}

// Byte-order marks, longest first. The UTF-32LE mark starts with the
// UTF-16LE mark, so the order matters.
const BOMS: [(&[u8], Encoding); 5] = [
    (&[0xFF, 0xFE, 0x00, 0x00], Encoding::Utf32Le),
    (&[0x00, 0x00, 0xFE, 0xFF], Encoding::Utf32Be),
    (&[0xFF, 0xFE], Encoding::Utf16Le),
    (&[0xFE, 0xFF], Encoding::Utf16Be),
    (&[0xEF, 0xBB, 0xBF], Encoding::Utf8),
];

/// ## Detect Encoding from BOM
///
/// Detect the encoding of `bytes` solely based on its byte-order mark.
/// If a mark is present, the position is right after it. Otherwise, the
/// result is `Encoding::Undetected` at position 0.
pub fn detect_encoding_from_bom(bytes: &[u8]) -> Detection {
    for (bom, encoding) in BOMS {
        if bytes.starts_with(bom) {
            return Detection {
                position: bom.len(),
                encoding: encoding,
            };
        }
    }

    Detection::default()
}

/// ## Detect Encoding
///
/// Detect the encoding of `bytes`. A byte-order mark always wins.
/// Otherwise:
///
/// - Streams of 0 or 1 bytes are `Encoding::Undetected`.
/// - Streams of 2 or 3 bytes are assumed to be `Encoding::Utf8`.
/// - Longer streams are classified by which of their first four bytes
///   are zero: `00 00 00 xx` is `UTF-32BE`, `00 xx 00 xx` is `UTF-16BE`,
///   `xx 00 00 00` is `UTF-32LE`, `xx 00 xx 00` is `UTF-16LE`, and no
///   zero at all is `UTF-8`. Any other pattern is `Encoding::Undetected`.
///
/// Heuristic matches never advance the position. This never fails.
///
/// ```
/// use osi_unicode::{detect_encoding, Encoding};
///
/// let r = detect_encoding(b"\xEF\xBB\xBF{}");
/// assert_eq!((r.encoding, r.position), (Encoding::Utf8, 3));
///
/// let r = detect_encoding(b"{\x00}\x00");
/// assert_eq!((r.encoding, r.position), (Encoding::Utf16Le, 0));
/// ```
pub fn detect_encoding(bytes: &[u8]) -> Detection {
    let r = detect_encoding_from_bom(bytes);
    if r.encoding != Encoding::Undetected {
        return r;
    }

    let encoding = match bytes {
        [] | [_] => Encoding::Undetected,
        [_, _] | [_, _, _] => Encoding::Utf8,
        [b0, b1, b2, b3, ..] => {
            let pattern = (*b0 != 0) as u8
                | ((*b1 != 0) as u8) << 1
                | ((*b2 != 0) as u8) << 2
                | ((*b3 != 0) as u8) << 3;

            match pattern {
                0x08 => Encoding::Utf32Be,
                0x0A => Encoding::Utf16Be,
                0x01 => Encoding::Utf32Le,
                0x05 => Encoding::Utf16Le,
                0x0F => Encoding::Utf8,
                _ => Encoding::Undetected,
            }
        },
    };

    Detection {
        position: 0,
        encoding: encoding,
    }
}

/// ## Detect Encoding of JSON Text
///
/// Detect the encoding of `bytes` assuming it is JSON text, whose first
/// two characters are always ASCII. A byte-order mark wins. Otherwise,
/// the positions of the null bytes among the first four bytes determine
/// the encoding. Anything without a matching pattern, including streams
/// shorter than 4 bytes, is `UTF-8`. This never yields
/// `Encoding::Undetected`.
pub fn detect_json_encoding(bytes: &[u8]) -> Detection {
    let r = detect_encoding_from_bom(bytes);
    if r.encoding != Encoding::Undetected {
        return r;
    }

    let encoding = match bytes {
        [0, 0, 0, _, ..] => Encoding::Utf32Be,
        [0, _, 0, _, ..] => Encoding::Utf16Be,
        [_, 0, 0, 0, ..] => Encoding::Utf32Le,
        [_, 0, _, 0, ..] => Encoding::Utf16Le,
        _ => Encoding::Utf8,
    };

    Detection {
        position: 0,
        encoding: encoding,
    }
}

/// ## Skip Byte-Order Mark
///
/// Skip a byte-order mark at the start of `src`, whose code-unit width is
/// given by `U`. A mark that contradicts the width fails with the
/// matching `EncodingErrc`, leaving the position at 0.
///
/// - `UTF-8`: the encoding is detected via `detect_encoding()`. `UTF-8`
///   and undetected streams succeed after any mark. `UTF-16` and `UTF-32`
///   streams fail.
/// - `UTF-16`: a leading U+FEFF is skipped. A leading U+FFFE, which is a
///   mark in the opposite byte order, fails.
/// - `UTF-32`: as for `UTF-16`, with the marks `0x0000FEFF` and
///   `0xFFFE0000`.
pub fn skip_bom<U: Unit>(src: &[U]) -> SkipBom {
    match U::WIDTH {
        Width::U8 => {
            // Detection never looks past the first 4 bytes.
            let mut head = [0u8; 4];
            let n = src.len().min(head.len());
            for (to, from) in head.iter_mut().zip(&src[..n]) {
                *to = from.widen() as u8;
            }

            let r = detect_encoding(&head[..n]);
            match r.encoding {
                Encoding::Utf8 | Encoding::Undetected => SkipBom::success(r.position),
                Encoding::Utf16Le | Encoding::Utf16Be => {
                    SkipBom::failure(EncodingErrc::ExpectedU8FoundU16)
                },
                Encoding::Utf32Le | Encoding::Utf32Be => {
                    SkipBom::failure(EncodingErrc::ExpectedU8FoundU32)
                },
            }
        },
        Width::U16 => match src.first().map(|v| v.widen()) {
            Some(0xFEFF) => SkipBom::success(1),
            Some(0xFFFE) => SkipBom::failure(EncodingErrc::ExpectedU16FoundFffe),
            _ => SkipBom::success(0),
        },
        Width::U32 => match src.first().map(|v| v.widen()) {
            Some(0x0000FEFF) => SkipBom::success(1),
            Some(0xFFFE0000) => SkipBom::failure(EncodingErrc::ExpectedU32FoundFffe),
            _ => SkipBom::success(0),
        },
    }
}
