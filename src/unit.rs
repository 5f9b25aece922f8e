//! # Code Units
//!
//! The engine operates on streams of fixed-width code units: `u8` for
//! `UTF-8`, `u16` for `UTF-16`, and `u32` for `UTF-32`. The width is a
//! static property of the stream. All entry points are generic over
//! [`Unit`], which is sealed and implemented for exactly these three types,
//! and dispatch on [`Unit::WIDTH`] at compile time.
//!
//! Output is appended to a [`Sink`], a narrow trait that only knows how to
//! append a single unit. This lets callers pass any growable buffer without
//! the engine depending on a specific container.

use crate::endian::ByteOrder;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// ## Code-Unit Width
///
/// The three widths supported by the engine, each naming its encoding form.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Width {
    /// 8-bit code units (`UTF-8`).
    U8,
    /// 16-bit code units (`UTF-16`).
    U16,
    /// 32-bit code units (`UTF-32`).
    U32,
}

impl Width {
    /// Yield the size of a single code unit of this width in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Width::U8 => 1,
            Width::U16 => 2,
            Width::U32 => 4,
        }
    }
}

/// ## Code Unit
///
/// A fixed-width code unit. This trait is sealed. It exposes the width as
/// an associated constant and converts units from and to `u32`, which is
/// the representation all decoding logic works on.
pub trait Unit: Copy + core::fmt::Debug + Default + Eq + core::hash::Hash + Ord + sealed::Sealed + 'static {
    /// Width of this code unit.
    const WIDTH: Width;

    /// Widen the unit to a `u32` without changing its value.
    fn widen(self) -> u32;

    /// ## Narrow a Value to a Unit
    ///
    /// Truncate `v` to the width of this unit. The engine only ever calls
    /// this with values that fit.
    fn narrow(v: u32) -> Self;

    /// ## Assemble a Unit from Bytes
    ///
    /// Assemble a unit from exactly `Self::WIDTH.bytes()` bytes in the
    /// given byte order. Missing bytes are treated as zero and excess bytes
    /// are ignored.
    fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self;
}

impl Unit for u8 {
    const WIDTH: Width = Width::U8;

    fn widen(self) -> u32 {
        self as u32
    }

    fn narrow(v: u32) -> Self {
        v as u8
    }

    fn from_bytes(bytes: &[u8], _order: ByteOrder) -> Self {
        bytes.first().copied().unwrap_or(0)
    }
}

impl Unit for u16 {
    const WIDTH: Width = Width::U16;

    fn widen(self) -> u32 {
        self as u32
    }

    fn narrow(v: u32) -> Self {
        v as u16
    }

    fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self {
        let mut raw = [0u8; 2];
        for (to, from) in raw.iter_mut().zip(bytes) {
            *to = *from;
        }
        match order {
            ByteOrder::Little => u16::from_le_bytes(raw),
            ByteOrder::Big => u16::from_be_bytes(raw),
        }
    }
}

impl Unit for u32 {
    const WIDTH: Width = Width::U32;

    fn widen(self) -> u32 {
        self
    }

    fn narrow(v: u32) -> Self {
        v
    }

    fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self {
        let mut raw = [0u8; 4];
        for (to, from) in raw.iter_mut().zip(bytes) {
            *to = *from;
        }
        match order {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        }
    }
}

/// ## Output Sink
///
/// A sink receives the code units produced by a conversion, one at a time.
/// Implementations must support amortized constant-time appends. A sink is
/// only ever mutated by the single operation it was passed to.
pub trait Sink<U> {
    /// Append a single code unit.
    fn push_unit(&mut self, unit: U);
}

impl<U> Sink<U> for alloc::vec::Vec<U> {
    fn push_unit(&mut self, unit: U) {
        self.push(unit);
    }
}

impl<U, S> Sink<U> for &mut S
where
    S: Sink<U> + ?Sized,
{
    fn push_unit(&mut self, unit: U) {
        (**self).push_unit(unit);
    }
}
