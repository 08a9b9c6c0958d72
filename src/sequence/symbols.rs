//! Symbol access for packed and unpacked sequences.
//!
//! The aligners only ever ask "what is symbol i", so both storage layouts sit
//! behind [`SymbolSequence`]. Packed sequences use the ncbi2na layout: four
//! 2-bit symbols per byte, most significant bits first, with an optional
//! number of leading symbols of the first byte skipped (`remainder`).

use std::fmt;

/// Read-only random access to a sequence of small integer symbols.
pub trait SymbolSequence {
    fn len(&self) -> usize;

    /// Symbol at `index`; `index` must be below `len()`.
    fn symbol(&self, index: usize) -> u8;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: SymbolSequence + ?Sized> SymbolSequence for &T {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn symbol(&self, index: usize) -> u8 {
        (**self).symbol(index)
    }
}

/// Direction in which a sequence is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    /// Logical index `i` reads physical position `len - 1 - i`.
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Packed buffer holds fewer than `remainder + len` symbols.
    PackedTooShort {
        len: usize,
        remainder: u8,
        available: usize,
    },
    /// Starting remainder outside `0..=3`.
    InvalidRemainder(u8),
    /// Window `[start, start + len)` does not fit in a sequence of `seq_len`.
    WindowOutOfBounds {
        start: usize,
        len: usize,
        seq_len: usize,
    },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::PackedTooShort {
                len,
                remainder,
                available,
            } => write!(
                f,
                "packed buffer holds {} symbols, need {} (remainder {})",
                available,
                *remainder as usize + len,
                remainder
            ),
            SequenceError::InvalidRemainder(r) => {
                write!(f, "packed remainder must be in 0..=3, got {}", r)
            }
            SequenceError::WindowOutOfBounds {
                start,
                len,
                seq_len,
            } => write!(
                f,
                "window {}..{} out of bounds for sequence of length {}",
                start,
                start + len,
                seq_len
            ),
        }
    }
}

impl std::error::Error for SequenceError {}

/// One symbol per byte.
#[derive(Debug, Clone, Copy)]
pub struct UnpackedSequence<'a> {
    data: &'a [u8],
}

impl<'a> UnpackedSequence<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl SymbolSequence for UnpackedSequence<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn symbol(&self, index: usize) -> u8 {
        self.data[index]
    }
}

/// Four 2-bit symbols per byte, most significant bits first.
#[derive(Debug, Clone, Copy)]
pub struct PackedSequence<'a> {
    data: &'a [u8],
    len: usize,
    remainder: u8,
}

impl<'a> PackedSequence<'a> {
    /// View `len` symbols of `data` starting `remainder` symbols into the
    /// first byte.
    pub fn new(data: &'a [u8], len: usize, remainder: u8) -> Result<Self, SequenceError> {
        if remainder > 3 {
            return Err(SequenceError::InvalidRemainder(remainder));
        }
        let available = data.len() * 4;
        if remainder as usize + len > available {
            return Err(SequenceError::PackedTooShort {
                len,
                remainder,
                available,
            });
        }
        Ok(Self {
            data,
            len,
            remainder,
        })
    }

    /// Caller guarantees `remainder <= 3` and `remainder + len <= 4 * data.len()`.
    pub(crate) fn from_parts(data: &'a [u8], len: usize, remainder: u8) -> Self {
        debug_assert!(remainder <= 3 && remainder as usize + len <= data.len() * 4);
        Self {
            data,
            len,
            remainder,
        }
    }

    #[inline]
    pub fn remainder(&self) -> u8 {
        self.remainder
    }
}

impl SymbolSequence for PackedSequence<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn symbol(&self, index: usize) -> u8 {
        let pos = self.remainder as usize + index;
        let shift = 6 - 2 * (pos & 3);
        (self.data[pos >> 2] >> shift) & 0x03
    }
}

/// A sequence read in a fixed [`Direction`].
#[derive(Debug, Clone, Copy)]
pub struct Oriented<S> {
    seq: S,
    direction: Direction,
}

impl<S: SymbolSequence> Oriented<S> {
    pub fn new(seq: S, direction: Direction) -> Self {
        Self { seq, direction }
    }
}

impl<S: SymbolSequence> SymbolSequence for Oriented<S> {
    #[inline]
    fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    fn symbol(&self, index: usize) -> u8 {
        match self.direction {
            Direction::Forward => self.seq.symbol(index),
            Direction::Reverse => self.seq.symbol(self.seq.len() - 1 - index),
        }
    }
}

/// The window `[start, start + len)` of another sequence.
#[derive(Debug, Clone, Copy)]
pub struct SubSequence<S> {
    seq: S,
    start: usize,
    len: usize,
}

impl<S: SymbolSequence> SubSequence<S> {
    pub fn new(seq: S, start: usize, len: usize) -> Result<Self, SequenceError> {
        let seq_len = seq.len();
        if start.checked_add(len).map_or(true, |end| end > seq_len) {
            return Err(SequenceError::WindowOutOfBounds {
                start,
                len,
                seq_len,
            });
        }
        Ok(Self { seq, start, len })
    }
}

impl<S: SymbolSequence> SymbolSequence for SubSequence<S> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn symbol(&self, index: usize) -> u8 {
        self.seq.symbol(self.start + index)
    }
}

/// Number of equal symbols starting at `seq1[start1]` and `seq2[start2]`,
/// stopping at the first mismatch or the end of either sequence.
#[inline]
pub fn count_matches<A, B>(seq1: &A, seq2: &B, start1: usize, start2: usize) -> usize
where
    A: SymbolSequence + ?Sized,
    B: SymbolSequence + ?Sized,
{
    let len1 = seq1.len();
    let len2 = seq2.len();
    let mut i = start1;
    let mut j = start2;
    while i < len1 && j < len2 && seq1.symbol(i) == seq2.symbol(j) {
        i += 1;
        j += 1;
    }
    i - start1
}
