//! Nucleotide encodings consumed by the aligners
//!
//! Reference: ncbi-blast/c++/src/algo/blast/core/blast_encoding.c
//!
//! - BLASTNA (one code per byte): A=0, C=1, G=2, T=3, ambiguity codes 4..=15.
//!   Used for the unpacked side of an alignment.
//! - ncbi2na (2 bits per base): the first four BLASTNA codes, packed four
//!   bases per byte, most significant bits first.
//!
//! The first four codes are shared, so a BLASTNA sequence can be aligned
//! directly against a packed ncbi2na one. Ambiguous bases never compare
//! equal to a 2-bit code on the unpacked side.

use super::symbols::{PackedSequence, SequenceError, SymbolSequence};

/// Bases per packed byte.
pub const COMPRESSION_RATIO: usize = 4;

const BASE_MASK: u8 = 0x03;

/// Code for bases outside the IUPAC alphabet (`N`).
pub const BLASTNA_UNKNOWN: u8 = 14;

// ncbi-blast/c++/src/algo/blast/core/blast_encoding.c (IUPACNA_TO_BLASTNA)
const IUPACNA_TO_BLASTNA: [u8; 128] = [
    15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15,
    15,  0, 10,  1, 11, 15, 15,  2, 12, 15, 15,  7, 15,  6, 14, 15,
    15, 15,  4,  9,  3,  3, 13,  8, 15,  5, 15, 15, 15, 15, 15, 15,
    15,  0, 10,  1, 11, 15, 15,  2, 12, 15, 15,  7, 15,  6, 14, 15,
    15, 15,  4,  9,  3,  3, 13,  8, 15,  5, 15, 15, 15, 15, 15, 15,
];

const DECODE_TABLE: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// BLASTNA code of one IUPAC character (case-insensitive, `U` reads as `T`).
#[inline]
pub fn encode_blastna_base(base: u8) -> u8 {
    if base < 128 {
        IUPACNA_TO_BLASTNA[base as usize]
    } else {
        BLASTNA_UNKNOWN
    }
}

/// 2-bit code of one base, `None` for anything but A/C/G/T/U.
#[inline]
pub fn encode_base(base: u8) -> Option<u8> {
    let code = encode_blastna_base(base);
    if code <= BASE_MASK {
        Some(code)
    } else {
        None
    }
}

/// Encode IUPAC text to one BLASTNA code per byte.
pub fn encode_blastna(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| encode_blastna_base(b)).collect()
}

/// Encode IUPAC text to one 2-bit code per byte.
///
/// ncbi2na has no room for ambiguity codes; they are stored as their low
/// two BLASTNA bits, which is what NCBI BLAST does before randomizing.
pub fn encode_ncbi2na(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .map(|&b| encode_blastna_base(b) & BASE_MASK)
        .collect()
}

#[inline]
pub fn decode_base(code: u8) -> u8 {
    DECODE_TABLE[(code & BASE_MASK) as usize]
}

/// Owned ncbi2na buffer, four bases per byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBuffer {
    data: Vec<u8>,
    len: usize,
}

impl PackedBuffer {
    /// Pack IUPAC text.
    pub fn from_iupac(seq: &[u8]) -> Self {
        let mut data = vec![0u8; seq.len().div_ceil(COMPRESSION_RATIO)];
        for (i, &base) in seq.iter().enumerate() {
            let code = encode_blastna_base(base) & BASE_MASK;
            data[i / COMPRESSION_RATIO] |= code << (6 - 2 * (i % COMPRESSION_RATIO));
        }
        Self {
            data,
            len: seq.len(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// View of the whole buffer.
    pub fn as_sequence(&self) -> PackedSequence<'_> {
        PackedSequence::from_parts(&self.data, self.len, 0)
    }

    /// View of bases `[start, start + len)`. The view starts at the byte
    /// holding `start` and skips `start % 4` bases of it.
    pub fn window(&self, start: usize, len: usize) -> Result<PackedSequence<'_>, SequenceError> {
        if start.checked_add(len).map_or(true, |end| end > self.len) {
            return Err(SequenceError::WindowOutOfBounds {
                start,
                len,
                seq_len: self.len,
            });
        }
        let byte = start / COMPRESSION_RATIO;
        let remainder = (start % COMPRESSION_RATIO) as u8;
        PackedSequence::new(&self.data[byte..], len, remainder)
    }

    /// Decode back to ACGT text.
    pub fn unpack(&self) -> Vec<u8> {
        let seq = self.as_sequence();
        (0..self.len)
            .map(|i| decode_base(seq.symbol(i)))
            .collect()
    }
}
