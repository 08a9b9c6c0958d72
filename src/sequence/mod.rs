//! Sequence representation and access
//!
//! - `symbols` - the [`SymbolSequence`] trait and its packed/unpacked views
//! - `encoding` - BLASTNA and ncbi2na encoders that produce those buffers

pub mod encoding;
pub mod symbols;

pub use encoding::{encode_blastna, encode_ncbi2na, PackedBuffer};
pub use symbols::{
    count_matches, Direction, Oriented, PackedSequence, SequenceError, SubSequence,
    SymbolSequence, UnpackedSequence,
};
