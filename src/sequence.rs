//! # Sequence Iteration
//!
//! Walking a stream one encoded character at a time. A `Sequence` is a
//! view of the code units encoding a single character. A `Generator`
//! yields the sequences of a stream in order, classifying each with the
//! same rules as the validator.
//!
//! The module also provides the derived length operations, which compute
//! the number of characters of a stream, or the size of its `UTF-8`
//! re-encoding, without producing any output.

use crate::codec::{self, Step};
use crate::convert::ConvFlag;
use crate::error::ConvErrc;
use crate::table;
use crate::unit::{Unit, Width};

/// ## Encoded Character
///
/// A view of the code units that encode a single character, together with
/// their position in the source stream. Sequences produced under lenient
/// policy can be *malformed*, in which case they span a single unit and
/// decode to U+FFFD.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sequence<'a, U> {
    units: &'a [U],
    position: usize,
    malformed: bool,
}

impl<'a, U: Unit> Sequence<'a, U> {
    fn new(units: &'a [U], position: usize, malformed: bool) -> Self {
        Self {
            units: units,
            position: position,
            malformed: malformed,
        }
    }

    // Empty sequence at the end of `src`.
    fn end(src: &'a [U]) -> Self {
        Self::new(&src[src.len()..], src.len(), false)
    }

    /// Yield the offset of the first unit of this sequence in the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Yield the number of code units of this sequence.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check whether this is the empty sequence.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Yield the code units of this sequence.
    pub fn units(&self) -> &'a [U] {
        self.units
    }

    /// Check whether this sequence was produced from malformed input.
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// ## Decode the Sequence
    ///
    /// Yield the codepoint encoded by this sequence. Empty and malformed
    /// sequences yield U+FFFD, and so does a `UTF-32` unit that is a
    /// surrogate or lies beyond U+10FFFF.
    pub fn codepoint(&self) -> u32 {
        if self.malformed || self.units.is_empty() {
            return table::REPLACEMENT_CHAR;
        }

        match codec::decode(self.units, ConvFlag::Strict) {
            Step::Scalar { ch, .. } => ch,
            _ => table::REPLACEMENT_CHAR,
        }
    }

    /// Yield the codepoint encoded by this sequence as `char`.
    pub fn to_char(&self) -> char {
        char::from_u32(self.codepoint()).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Ready,
    Done,
    Failed(ConvErrc),
}

/// ## Sequence Generator
///
/// A cursor over the sequences of a stream. The generator is positioned on
/// its first sequence when created. `get()` yields the current sequence,
/// `advance()` moves to the next one, and `done()` tells whether the end
/// of the stream was reached or an error stopped the walk.
///
/// Under `ConvFlag::Strict`, the first malformed sequence stops the
/// generator and its error code is reported by `status()` from then on.
/// Under `ConvFlag::Lenient`, every unit that cannot start a well-formed
/// sequence yields a malformed one-unit sequence and the walk continues.
/// `UTF-32` generators yield one sequence per unit and never fail.
///
/// The generator is also an `Iterator` over its sequences.
///
/// ```
/// use osi_unicode::{ConvFlag, Generator};
///
/// let text = "a\u{E9}\u{1F600}";
/// let cps: Vec<u32> = Generator::new(text.as_bytes(), ConvFlag::Strict)
///     .map(|v| v.codepoint())
///     .collect();
/// assert_eq!(cps, [0x61, 0xE9, 0x1F600]);
/// ```
#[derive(Clone, Debug)]
pub struct Generator<'a, U> {
    src: &'a [U],
    position: usize,
    length: usize,
    malformed: bool,
    flag: ConvFlag,
    state: State,
}

impl<'a, U: Unit> Generator<'a, U> {
    /// ## Create New Generator
    ///
    /// Create a generator over `src`, positioned on its first sequence.
    pub fn new(src: &'a [U], flag: ConvFlag) -> Self {
        let mut g = Self {
            src: src,
            position: 0,
            length: 0,
            malformed: false,
            flag: flag,
            state: State::Ready,
        };
        g.classify();
        g
    }

    // Classify the sequence at the current position.
    fn classify(&mut self) {
        self.length = 0;
        self.malformed = false;

        if self.position >= self.src.len() {
            self.state = State::Done;
            return;
        }

        if U::WIDTH == Width::U32 {
            self.length = 1;
            return;
        }

        match codec::decode(&self.src[self.position..], self.flag) {
            Step::Scalar { len, .. } => {
                self.length = len;
            },
            Step::Replaced { len } | Step::Flagged { len } => {
                self.length = len;
                self.malformed = true;
            },
            Step::Failed(e) => match self.flag {
                ConvFlag::Strict => {
                    self.state = State::Failed(e);
                },
                ConvFlag::Lenient => {
                    self.length = 1;
                    self.malformed = true;
                },
            },
        }
    }

    /// Check whether the end of the stream was reached, or an error
    /// stopped the generator.
    pub fn done(&self) -> bool {
        self.state != State::Ready
    }

    /// Yield the sticky error code, or `ConvErrc::Success` if no error
    /// occurred.
    pub fn status(&self) -> ConvErrc {
        match self.state {
            State::Failed(e) => e,
            State::Ready | State::Done => ConvErrc::Success,
        }
    }

    /// Yield the offset of the current sequence in the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// ## Current Sequence
    ///
    /// Yield the current sequence. Once the generator is done, this yields
    /// an empty sequence at the current position.
    pub fn get(&self) -> Sequence<'a, U> {
        let end = self.position + self.length;
        Sequence::new(&self.src[self.position..end], self.position, self.malformed)
    }

    /// ## Advance to the Next Sequence
    ///
    /// Move past the current sequence. This has no effect once the
    /// generator is done.
    pub fn advance(&mut self) {
        if self.done() {
            return;
        }

        self.position += self.length;
        self.classify();
    }
}

impl<'a, U: Unit> Iterator for Generator<'a, U> {
    type Item = Sequence<'a, U>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done() {
            return None;
        }

        let v = self.get();
        self.advance();
        Some(v)
    }
}

/// ## Sequence at Index
///
/// Yield the `index`-th sequence of `src`, counted from zero. For `UTF-8`
/// and `UTF-16`, the stream is walked with a strict generator. If it ends
/// or fails before reaching `index`, the empty sequence at the end of
/// `src` is returned. For `UTF-32`, this is a constant-time lookup.
pub fn sequence_at<U: Unit>(src: &[U], index: usize) -> Sequence<'_, U> {
    if U::WIDTH == Width::U32 {
        return if index < src.len() {
            Sequence::new(&src[index..index + 1], index, false)
        } else {
            Sequence::end(src)
        };
    }

    let mut g = Generator::new(src, ConvFlag::Strict);
    for _ in 0..index {
        if g.done() {
            break;
        }
        g.advance();
    }

    if g.done() {
        Sequence::end(src)
    } else {
        g.get()
    }
}

/// ## Length of the UTF-8 Encoding
///
/// Yield the number of bytes needed to re-encode `src` as `UTF-8`,
/// without encoding it.
///
/// - `UTF-8`: the length of the input.
/// - `UTF-16`: the sum over all strictly decoded characters, stopping at
///   the first malformed sequence.
/// - `UTF-32`: the sum over all units, where surrogates and values beyond
///   U+10FFFF count as the 3 bytes of U+FFFD.
pub fn u8_length<U: Unit>(src: &[U]) -> usize {
    match U::WIDTH {
        Width::U8 => src.len(),
        Width::U16 => Generator::new(src, ConvFlag::Strict)
            .map(|v| table::utf8_len(v.codepoint()))
            .sum(),
        Width::U32 => src.iter().map(|v| table::utf8_len(v.widen())).sum(),
    }
}

/// ## Number of Codepoints
///
/// Yield the number of sequences a strict generator produces on `src`
/// before it stops. For `UTF-32`, this is the length of the input.
pub fn u32_length<U: Unit>(src: &[U]) -> usize {
    match U::WIDTH {
        Width::U8 | Width::U16 => Generator::new(src, ConvFlag::Strict).count(),
        Width::U32 => src.len(),
    }
}
