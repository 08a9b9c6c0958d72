//! Unit tests for the uniform-cost greedy search

use crate::helpers::{
    align_iupac, assert_monotone, assert_script_matches_ends, megablast, mutate, random_sequence, rng,
};
use xgreedy::config::{AlignerConfig, ConfigError, GreedyParams, ScoringSpec};
use xgreedy::core::{AlignError, EditOp, EditScript, GreedyAligner};
use xgreedy::sequence::{encode_blastna, Direction, UnpackedSequence};

#[test]
fn test_identical_length_10() {
    let mut aligner = GreedyAligner::new();
    let (result, script) = align_iupac(&mut aligner, b"GATTACAGAT", b"GATTACAGAT", Direction::Forward, &megablast(25));
    assert_eq!(result.distance, 0);
    assert_eq!((result.seq1_end, result.seq2_end), (10, 10));
    assert_eq!(script.num_runs(), 1);
    assert_eq!(script.runs()[0].op, EditOp::Substitution);
    assert_eq!(script.runs()[0].len, 10);
}

#[test]
fn test_one_mismatch_large_xdrop() {
    let params = GreedyParams::new(ScoringSpec::new(1, -1, 0, 0), 100);
    let mut aligner = GreedyAligner::new();
    let (result, script) = align_iupac(&mut aligner, b"AAAAA", b"AAACA", Direction::Forward, &params);
    assert_eq!(result.distance, 1);
    assert_eq!(script.to_string(), "5M");
}

#[test]
fn test_script_consumes_reported_extents() {
    let mut r = rng(11);
    let mut aligner = GreedyAligner::new();
    for _ in 0..30 {
        let a = random_sequence(&mut r, 150);
        let b = mutate(&mut r, &a, 0.06);
        for direction in [Direction::Forward, Direction::Reverse] {
            let (result, script) = align_iupac(&mut aligner, &a, &b, direction, &megablast(40));
            assert_script_matches_ends(&result, &script);
            assert_monotone(aligner.score_history());
            assert_eq!(*aligner.score_history().last().unwrap(), result.score);
        }
    }
}

#[test]
fn test_xdrop_stops_on_unrelated_sequences() {
    let mut r = rng(3);
    let a = random_sequence(&mut r, 200);
    let b = random_sequence(&mut r, 200);
    let mut aligner = GreedyAligner::new();
    let (result, _) = align_iupac(&mut aligner, &a, &b, Direction::Forward, &megablast(10));
    assert!(result.converged);
    assert!(aligner.score_history().len() - 1 < a.len());
    // Normalized full-length score for identical sequences: 200 * 2
    assert!(result.score < 400);
}

#[test]
fn test_reverse_is_forward_on_reversed_input() {
    let mut r = rng(5);
    let mut aligner = GreedyAligner::new();
    for _ in 0..10 {
        let a = random_sequence(&mut r, 80);
        let b = mutate(&mut r, &a, 0.08);
        let (rev_result, rev_script) = align_iupac(&mut aligner, &a, &b, Direction::Reverse, &megablast(30));

        let a_rev: Vec<u8> = a.iter().rev().copied().collect();
        let b_rev: Vec<u8> = b.iter().rev().copied().collect();
        let (fwd_result, mut fwd_script) =
            align_iupac(&mut aligner, &a_rev, &b_rev, Direction::Forward, &megablast(30));
        fwd_script.reverse();

        assert_eq!(rev_result, fwd_result);
        assert_eq!(rev_script, fwd_script);
    }
}

#[test]
fn test_script_is_appended() {
    let a = encode_blastna(b"ACGTACGT");
    let mut aligner = GreedyAligner::new();
    let mut script: EditScript = "3I".parse().unwrap();
    aligner
        .align(
            UnpackedSequence::new(&a),
            UnpackedSequence::new(&a),
            Direction::Forward,
            &megablast(25),
            Some(&mut script),
        )
        .unwrap();
    assert_eq!(script.to_string(), "3I8M");
}

#[test]
fn test_arena_blocks_stable_across_calls() {
    let mut r = rng(21);
    let a = random_sequence(&mut r, 300);
    let b = mutate(&mut r, &a, 0.05);
    let mut aligner = GreedyAligner::with_config(AlignerConfig {
        block_capacity: 1024,
        max_blocks: None,
    });
    align_iupac(&mut aligner, &a, &b, Direction::Forward, &megablast(30));
    let blocks = aligner.arena_blocks();
    for _ in 0..5 {
        align_iupac(&mut aligner, &a, &b, Direction::Forward, &megablast(30));
        assert_eq!(aligner.arena_blocks(), blocks);
    }
}

#[test]
fn test_block_capacity_checked_before_search() {
    let a = encode_blastna(&[b'A'; 100]);
    let mut aligner = GreedyAligner::with_config(AlignerConfig {
        block_capacity: 16,
        max_blocks: None,
    });
    let err = aligner
        .align(
            UnpackedSequence::new(&a),
            UnpackedSequence::new(&a),
            Direction::Forward,
            &megablast(25),
            None,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        AlignError::Config(ConfigError::BlockCapacityTooSmall { .. })
    ));
}

#[test]
fn test_without_script_same_endpoint() {
    let mut r = rng(8);
    let a = random_sequence(&mut r, 120);
    let b = mutate(&mut r, &a, 0.07);
    let ea = encode_blastna(&a);
    let eb = encode_blastna(&b);
    let mut aligner = GreedyAligner::new();
    let (with_script, _) = align_iupac(&mut aligner, &a, &b, Direction::Forward, &megablast(30));
    let without = aligner
        .align(
            UnpackedSequence::new(&ea),
            UnpackedSequence::new(&eb),
            Direction::Forward,
            &megablast(30),
            None,
        )
        .unwrap();
    assert_eq!(with_script, without);
}

#[test]
fn test_arena_exhaustion_returns_best_endpoint() {
    let mut r = rng(41);
    let a = random_sequence(&mut r, 300);
    let b = mutate(&mut r, &a, 0.15);
    let ea = encode_blastna(&a);
    let eb = encode_blastna(&b);
    let mut aligner = GreedyAligner::with_config(AlignerConfig {
        block_capacity: 700,
        max_blocks: Some(1),
    });
    let mut script: EditScript = "2I".parse().unwrap();
    let err = aligner
        .align(
            UnpackedSequence::new(&ea),
            UnpackedSequence::new(&eb),
            Direction::Forward,
            &megablast(10_000),
            Some(&mut script),
        )
        .unwrap_err();
    match err {
        AlignError::Arena { partial, .. } => {
            assert!(!partial.converged);
            assert!(partial.seq1_end > 0);
            assert!(partial.distance > 0);
        }
        other => panic!("expected arena exhaustion, got {:?}", other),
    }
    assert_eq!(script.to_string(), "2I");
}

#[test]
fn test_reset_keeps_arena_and_clears_history() {
    let mut r = rng(43);
    let a = random_sequence(&mut r, 200);
    let b = mutate(&mut r, &a, 0.05);
    let mut aligner = GreedyAligner::with_config(AlignerConfig {
        block_capacity: 1024,
        max_blocks: None,
    });
    align_iupac(&mut aligner, &a, &b, Direction::Forward, &megablast(30));
    let blocks = aligner.arena_blocks();
    assert!(blocks > 0);
    assert!(!aligner.score_history().is_empty());

    aligner.reset();
    assert_eq!(aligner.arena_blocks(), blocks);
    assert!(aligner.score_history().is_empty());

    let (result, script) = align_iupac(&mut aligner, &a, &b, Direction::Forward, &megablast(30));
    assert_script_matches_ends(&result, &script);
    assert_eq!(aligner.arena_blocks(), blocks);
}

#[test]
fn test_score_overflow_is_rejected() {
    let a = encode_blastna(&[b'A'; 5000]);
    let mut b = a.clone();
    b[2500] = encode_blastna(b"C")[0];
    let params = GreedyParams::new(ScoringSpec::new(1_000_000, -1_000_000, 0, 0), 10);
    let mut aligner = GreedyAligner::new();
    let err = aligner
        .align(
            UnpackedSequence::new(&a),
            UnpackedSequence::new(&b),
            Direction::Forward,
            &params,
            None,
        )
        .unwrap_err();
    assert_eq!(err, AlignError::Config(ConfigError::CostOverflow));
}
