//! Sequence loading and encoding for the align command.

use anyhow::{Context, Result};
use bio::io::fasta;
use std::path::Path;

use super::args::AlignArgs;
use crate::sequence::{encode_blastna, PackedBuffer};

/// A FASTA record reduced to its id and blastna codes.
#[derive(Debug, Clone)]
pub struct EncodedQuery {
    pub id: String,
    pub codes: Vec<u8>,
}

/// Subject storage: one blastna code per byte, or ncbi2na packed.
#[derive(Debug, Clone)]
pub enum SubjectCodes {
    Unpacked(Vec<u8>),
    Packed(PackedBuffer),
}

#[derive(Debug, Clone)]
pub struct EncodedSubject {
    pub id: String,
    pub codes: SubjectCodes,
}

impl EncodedSubject {
    pub fn len(&self) -> usize {
        match &self.codes {
            SubjectCodes::Unpacked(codes) => codes.len(),
            SubjectCodes::Packed(buffer) => buffer.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn read_fasta(path: &Path) -> Result<Vec<fasta::Record>> {
    let reader = fasta::Reader::from_file(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse FASTA from {}", path.display()))
}

/// Read query & subject files and encode them for alignment.
pub fn read_sequences(args: &AlignArgs) -> Result<(Vec<EncodedQuery>, Vec<EncodedSubject>)> {
    if args.verbose {
        eprintln!("[INFO] Reading query & subject...");
    }
    let queries: Vec<EncodedQuery> = read_fasta(&args.query)?
        .iter()
        .map(|r| EncodedQuery {
            id: r.id().to_string(),
            codes: encode_blastna(r.seq()),
        })
        .collect();

    let subjects: Vec<EncodedSubject> = read_fasta(&args.subject)?
        .iter()
        .map(|r| EncodedSubject {
            id: r.id().to_string(),
            codes: if args.packed {
                SubjectCodes::Packed(PackedBuffer::from_iupac(r.seq()))
            } else {
                SubjectCodes::Unpacked(encode_blastna(r.seq()))
            },
        })
        .collect();

    if args.verbose {
        eprintln!(
            "[INFO] {} queries, {} subjects ({})",
            queries.len(),
            subjects.len(),
            if args.packed { "packed" } else { "unpacked" }
        );
    }
    Ok((queries, subjects))
}
