//! # Error Codes
//!
//! This module defines the two error domains of the engine. Conversion
//! errors (`ConvErrc`) are produced by validation, conversion, and sequence
//! generation. Encoding errors (`EncodingErrc`) are only produced by BOM
//! skipping, when the caller asserted a code-unit width that the stream
//! contradicts.
//!
//! Both domains are plain enums with a zero-valued success variant. They
//! can be folded into an `ErrorCode`, which pairs the numeric code with
//! its `Category`, so callers can handle errors of either domain through
//! a single type.

/// ## Conversion Error Codes
///
/// Result codes of validation, conversion, and sequence generation. The
/// numeric values are stable and match the positions in the category
/// message table.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(i32)]
pub enum ConvErrc {
    /// No error occurred.
    #[default]
    Success = 0,
    /// `UTF-8` lead byte announces a sequence longer than 4 bytes.
    OverLongUtf8Sequence = 1,
    /// `UTF-8` trailing byte does not match `10xxxxxx`.
    ExpectedContinuationByte = 2,
    /// `UTF-16` high surrogate is not followed by a low surrogate.
    UnpairedHighSurrogate = 3,
    /// Surrogate value encountered in `UTF-32`.
    IllegalSurrogateValue = 4,
    /// Partial character at the end of the input.
    SourceExhausted = 5,
    /// Input is illegal or malformed.
    SourceIllegal = 6,
}

/// ## Encoding Error Codes
///
/// Result codes of BOM skipping. They signal that the byte-order mark at
/// the start of a stream contradicts the code-unit width the caller
/// expected.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(i32)]
pub enum EncodingErrc {
    /// No error occurred.
    #[default]
    Success = 0,
    /// `UTF-8` was expected, but the stream is marked as `UTF-16`.
    ExpectedU8FoundU16 = 1,
    /// `UTF-8` was expected, but the stream is marked as `UTF-32`.
    ExpectedU8FoundU32 = 2,
    /// `UTF-16` was expected, but the stream starts with U+FFFE.
    ExpectedU16FoundFffe = 3,
    /// `UTF-32` was expected, but the stream starts with U+FFFE.
    ExpectedU32FoundFffe = 4,
}

/// ## Error Category
///
/// A category names an error domain and maps the numeric codes of that
/// domain to human-readable messages. Categories are singletons with
/// static lifetime, see `CONV_CATEGORY` and `ENCODING_CATEGORY`.
pub trait Category: Sync {
    /// ## Name of the Category
    fn name(&self) -> &'static str;

    /// ## Message for a Code
    ///
    /// Return the message for the given numeric code. Unknown codes, as
    /// well as the success code, yield an empty string.
    fn message(&self, code: i32) -> &'static str;
}

/// Category of `ConvErrc`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConvCategory;

/// Category of `EncodingErrc`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EncodingCategory;

/// Singleton instance of `ConvCategory`.
pub static CONV_CATEGORY: ConvCategory = ConvCategory;

/// Singleton instance of `EncodingCategory`.
pub static ENCODING_CATEGORY: EncodingCategory = EncodingCategory;

impl Category for ConvCategory {
    fn name(&self) -> &'static str {
        "unicode conversion error"
    }

    fn message(&self, code: i32) -> &'static str {
        ConvErrc::from_code(code).map(ConvErrc::message).unwrap_or("")
    }
}

impl Category for EncodingCategory {
    fn name(&self) -> &'static str {
        "unicode encoding error"
    }

    fn message(&self, code: i32) -> &'static str {
        EncodingErrc::from_code(code).map(EncodingErrc::message).unwrap_or("")
    }
}

impl ConvErrc {
    /// ## Create from Numeric Code
    ///
    /// Map a numeric code back to its enum value, or yield `None` if the
    /// code is not part of this domain.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::OverLongUtf8Sequence),
            2 => Some(Self::ExpectedContinuationByte),
            3 => Some(Self::UnpairedHighSurrogate),
            4 => Some(Self::IllegalSurrogateValue),
            5 => Some(Self::SourceExhausted),
            6 => Some(Self::SourceIllegal),
            _ => None,
        }
    }

    /// Yield the numeric code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Check whether this is the success code.
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// ## Human-readable Message
    ///
    /// Yield a static description of the error. The success code has an
    /// empty message.
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "",
            Self::OverLongUtf8Sequence => "Over long utf8 sequence",
            Self::ExpectedContinuationByte => "Expected continuation byte",
            Self::UnpairedHighSurrogate => "Unpaired high surrogate UTF-16",
            Self::IllegalSurrogateValue => "UTF-16 surrogate values are illegal in UTF-32",
            Self::SourceExhausted => "Partial character in source, but hit end",
            Self::SourceIllegal => "Source sequence is illegal/malformed",
        }
    }
}

impl EncodingErrc {
    /// ## Create from Numeric Code
    ///
    /// Map a numeric code back to its enum value, or yield `None` if the
    /// code is not part of this domain.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::ExpectedU8FoundU16),
            2 => Some(Self::ExpectedU8FoundU32),
            3 => Some(Self::ExpectedU16FoundFffe),
            4 => Some(Self::ExpectedU32FoundFffe),
            _ => None,
        }
    }

    /// Yield the numeric code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Check whether this is the success code.
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Yield a static description of the error.
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "",
            Self::ExpectedU8FoundU16 => "Expected UTF-8, found UTF-16",
            Self::ExpectedU8FoundU32 => "Expected UTF-8, found UTF-32",
            Self::ExpectedU16FoundFffe => "Expected UTF-16, found non character",
            Self::ExpectedU32FoundFffe => "Expected UTF-32, found non character",
        }
    }
}

impl core::fmt::Display for ConvErrc {
    fn fmt(
        &self,
        fmt: &mut core::fmt::Formatter<'_>,
    ) -> Result<(), core::fmt::Error> {
        fmt.write_str(self.message())
    }
}

impl core::fmt::Display for EncodingErrc {
    fn fmt(
        &self,
        fmt: &mut core::fmt::Formatter<'_>,
    ) -> Result<(), core::fmt::Error> {
        fmt.write_str(self.message())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConvErrc {
}

#[cfg(feature = "std")]
impl std::error::Error for EncodingErrc {
}

/// ## Categorized Error Code
///
/// An `ErrorCode` pairs a numeric code with the category it belongs to.
/// Both `ConvErrc` and `EncodingErrc` convert into it, so callers can pass
/// errors of either domain through one type and still compare them
/// against the typed enums.
///
/// Two codes are equal if their numeric values match and they belong to
/// the same category (compared by category name).
#[derive(Clone, Copy)]
pub struct ErrorCode {
    code: i32,
    category: &'static dyn Category,
}

impl ErrorCode {
    /// ## Create New Error Code
    ///
    /// Create a new error code from its raw parts. Usually, the `From`
    /// implementations of the typed enums are used instead.
    pub fn new(code: i32, category: &'static dyn Category) -> Self {
        Self {
            code: code,
            category: category,
        }
    }

    /// Yield the numeric code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Yield the category of this code.
    pub fn category(&self) -> &'static dyn Category {
        self.category
    }

    /// Yield the message of this code, as provided by its category.
    pub fn message(&self) -> &'static str {
        self.category.message(self.code)
    }

    /// Check whether this is the success code of its category.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

impl From<ConvErrc> for ErrorCode {
    fn from(v: ConvErrc) -> Self {
        Self::new(v.code(), &CONV_CATEGORY)
    }
}

impl From<EncodingErrc> for ErrorCode {
    fn from(v: EncodingErrc) -> Self {
        Self::new(v.code(), &ENCODING_CATEGORY)
    }
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.category.name() == other.category.name()
    }
}

impl Eq for ErrorCode {
}

impl PartialEq<ConvErrc> for ErrorCode {
    fn eq(&self, other: &ConvErrc) -> bool {
        *self == ErrorCode::from(*other)
    }
}

impl PartialEq<EncodingErrc> for ErrorCode {
    fn eq(&self, other: &EncodingErrc) -> bool {
        *self == ErrorCode::from(*other)
    }
}

impl core::fmt::Debug for ErrorCode {
    fn fmt(
        &self,
        fmt: &mut core::fmt::Formatter<'_>,
    ) -> Result<(), core::fmt::Error> {
        write!(fmt, "ErrorCode({}, {:?})", self.code, self.category.name())
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(
        &self,
        fmt: &mut core::fmt::Formatter<'_>,
    ) -> Result<(), core::fmt::Error> {
        write!(fmt, "{}: {}", self.category.name(), self.message())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ErrorCode {
}

/// ## Positioned Conversion Error
///
/// A conversion error together with the offset (in code units of the
/// source) of the first code unit that could not be processed. This is the
/// error type of `Outcome::into_result()`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConvError {
    /// Offset of the offending code unit in the source.
    pub position: usize,
    /// Reason of the failure.
    pub errc: ConvErrc,
}

impl core::fmt::Display for ConvError {
    fn fmt(
        &self,
        fmt: &mut core::fmt::Formatter<'_>,
    ) -> Result<(), core::fmt::Error> {
        write!(fmt, "{} at offset {}", self.errc, self.position)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.errc)
    }
}

#[cfg(test)]
mod tests {
    use std::format;
    use super::*;

    // Verify that numeric codes are stable and round-trip through
    // `from_code()`, and that unknown codes are rejected.
    #[test]
    fn errc_codes() {
        for v in 0..7 {
            assert_eq!(ConvErrc::from_code(v).map(ConvErrc::code), Some(v));
        }
        for v in 0..5 {
            assert_eq!(EncodingErrc::from_code(v).map(EncodingErrc::code), Some(v));
        }

        assert_eq!(ConvErrc::from_code(7), None);
        assert_eq!(ConvErrc::from_code(-1), None);
        assert_eq!(EncodingErrc::from_code(5), None);

        assert_eq!(ConvErrc::SourceExhausted.code(), 5);
        assert_eq!(EncodingErrc::ExpectedU32FoundFffe.code(), 4);
        assert!(ConvErrc::default().is_success());
        assert!(EncodingErrc::default().is_success());
    }

    // Check the category messages, including the empty message of the
    // success code and of unknown codes.
    #[test]
    fn category_messages() {
        assert_eq!(CONV_CATEGORY.name(), "unicode conversion error");
        assert_eq!(ENCODING_CATEGORY.name(), "unicode encoding error");

        assert_eq!(CONV_CATEGORY.message(0), "");
        assert_eq!(CONV_CATEGORY.message(2), "Expected continuation byte");
        assert_eq!(CONV_CATEGORY.message(99), "");
        assert_eq!(ENCODING_CATEGORY.message(1), "Expected UTF-8, found UTF-16");
        assert_eq!(ENCODING_CATEGORY.message(-3), "");

        assert_eq!(
            format!("{}", ConvErrc::SourceIllegal),
            "Source sequence is illegal/malformed",
        );
        assert_eq!(
            format!("{}", EncodingErrc::ExpectedU16FoundFffe),
            "Expected UTF-16, found non character",
        );
    }

    // Codes of different categories never compare equal, even if their
    // numeric values match. Codes compare equal to the typed enum they
    // were created from.
    #[test]
    fn error_code_compare() {
        let conv = ErrorCode::from(ConvErrc::OverLongUtf8Sequence);
        let enc = ErrorCode::from(EncodingErrc::ExpectedU8FoundU16);

        assert_eq!(conv.code(), enc.code());
        assert_ne!(conv, enc);
        assert_eq!(conv, ConvErrc::OverLongUtf8Sequence);
        assert_ne!(conv, ConvErrc::SourceIllegal);
        assert_eq!(enc, EncodingErrc::ExpectedU8FoundU16);
        assert_ne!(enc, ConvErrc::OverLongUtf8Sequence);

        assert!(ErrorCode::from(ConvErrc::Success).is_success());
        assert!(!conv.is_success());

        assert_eq!(
            format!("{}", conv),
            "unicode conversion error: Over long utf8 sequence",
        );
        assert_eq!(
            format!("{:?}", enc),
            "ErrorCode(1, \"unicode encoding error\")",
        );
    }

    // A positioned error renders its reason followed by the offset.
    #[test]
    fn conv_error_display() {
        let e = ConvError {
            position: 7,
            errc: ConvErrc::UnpairedHighSurrogate,
        };

        assert_eq!(
            format!("{}", e),
            "Unpaired high surrogate UTF-16 at offset 7",
        );
    }
}
