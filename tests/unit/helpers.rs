//! Test utilities and helpers for unit tests
//!
//! - Random sequence generators (seeded, reproducible)
//! - Wrappers that run an aligner and return its script

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use xgreedy::config::{GreedyParams, ScoringSpec};
use xgreedy::core::{EditScript, GreedyAligner, GreedyAlignment};
use xgreedy::sequence::{encode_blastna, Direction, UnpackedSequence};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random ACGT sequence (IUPAC letters).
pub fn random_sequence(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
}

/// Copy of `seq` with substitutions, insertions and deletions, each at
/// roughly `rate / 3` per base.
pub fn mutate(rng: &mut StdRng, seq: &[u8], rate: f64) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len() + seq.len() / 8);
    for &base in seq {
        let r: f64 = rng.gen();
        if r < rate / 3.0 {
            let other = loop {
                let b = b"ACGT"[rng.gen_range(0..4)];
                if b != base {
                    break b;
                }
            };
            out.push(other);
        } else if r < 2.0 * rate / 3.0 {
            out.push(b"ACGT"[rng.gen_range(0..4)]);
            out.push(base);
        } else if r < rate {
            continue;
        } else {
            out.push(base);
        }
    }
    out
}

pub fn megablast(xdrop: i32) -> GreedyParams {
    GreedyParams::new(ScoringSpec::new(1, -2, 0, 0), xdrop)
}

pub fn affine(reward: i32, penalty: i32, gap_open: i32, gap_extend: i32, xdrop: i32) -> GreedyParams {
    GreedyParams::new(ScoringSpec::new(reward, penalty, gap_open, gap_extend), xdrop)
}

/// Align IUPAC sequences with `align` and return the result and script.
pub fn align_iupac(
    aligner: &mut GreedyAligner,
    a: &[u8],
    b: &[u8],
    direction: Direction,
    params: &GreedyParams,
) -> (GreedyAlignment, EditScript) {
    let a = encode_blastna(a);
    let b = encode_blastna(b);
    let mut script = EditScript::new();
    let result = aligner
        .align(
            UnpackedSequence::new(&a),
            UnpackedSequence::new(&b),
            direction,
            params,
            Some(&mut script),
        )
        .unwrap();
    (result, script)
}

/// Assert the script consumes exactly the reported extents.
pub fn assert_script_matches_ends(result: &GreedyAlignment, script: &EditScript) {
    assert_eq!(
        script.seq1_len(),
        result.seq1_end,
        "script {} vs ends ({}, {})",
        script,
        result.seq1_end,
        result.seq2_end
    );
    assert_eq!(
        script.seq2_len(),
        result.seq2_end,
        "script {} vs ends ({}, {})",
        script,
        result.seq1_end,
        result.seq2_end
    );
}

pub fn assert_monotone(history: &[i32]) {
    assert!(!history.is_empty());
    for pair in history.windows(2) {
        assert!(pair[0] <= pair[1], "history decreased: {:?}", history);
    }
}
