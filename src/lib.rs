//! # Unicode Transcoding and Validation
//!
//! This crate implements the Unicode engine underneath the Osiris data
//! formats. It detects the encoding of a byte stream, validates streams of
//! `UTF-8`, `UTF-16`, or `UTF-32` code units, converts between any pair of
//! these encodings, and walks streams one encoded character at a time.
//!
//! All operations are generic over the code-unit type (`u8`, `u16`, or
//! `u32`, see [`unit::Unit`]) and are resolved statically for each width.
//! None of them allocate, except for the caller-provided output sinks and
//! the byte-stream pipeline in [`endian`], which buffers reassembled units.
//!
//! ## Error Policy
//!
//! Every operation is total. Malformed input is reported as a value (see
//! [`validate::Outcome`] and [`error`]) carrying the position of the first
//! code unit that could not be processed. Conversions can either stop at
//! malformed input ([`convert::ConvFlag::Strict`]) or replace it with
//! U+FFFD and continue ([`convert::ConvFlag::Lenient`]).
//!
//! The decoding rules follow the reference conversion algorithm of the
//! Unicode Consortium [^convert_utf], rejecting overlong `UTF-8`, encoded
//! surrogates, and anything beyond U+10FFFF [^unicode_scalar].
//!
//! [^convert_utf]: <https://www.unicode.org/versions/latest/ch03.pdf>
//! [^unicode_scalar]: <https://www.unicode.org/glossary/#unicode_scalar_value>

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;
extern crate core;

mod codec;

pub mod bom;
pub mod convert;
pub mod endian;
pub mod error;
pub mod sequence;
pub mod table;
pub mod unit;
pub mod validate;

pub use bom::{detect_encoding, skip_bom, Detection, Encoding, SkipBom};
pub use convert::{convert, ConvFlag};
pub use error::{ConvErrc, ConvError, EncodingErrc, ErrorCode};
pub use sequence::{sequence_at, u32_length, u8_length, Generator, Sequence};
pub use unit::{Sink, Unit, Width};
pub use validate::{validate, Outcome};
