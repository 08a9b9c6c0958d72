//! Unit tests for the affine-gap greedy search

use crate::helpers::{
    affine, align_iupac, assert_monotone, assert_script_matches_ends, mutate, random_sequence, rng,
};
use xgreedy::config::{AlignerConfig, ConfigError, ScoringSpec};
use xgreedy::core::costs::NormalizedCosts;
use xgreedy::core::{AlignError, EditOp, EditScript, GreedyAligner};
use xgreedy::sequence::{encode_blastna, Direction, UnpackedSequence};

#[test]
fn test_single_insertion_example() {
    let mut aligner = GreedyAligner::new();
    let (result, script) = align_iupac(
        &mut aligner,
        b"AAAA",
        b"AAAGA",
        Direction::Forward,
        &affine(10, -10, 5, 1, 100),
    );
    assert_eq!((result.seq1_end, result.seq2_end), (4, 5));
    let ops: Vec<(EditOp, usize)> = script.runs().iter().map(|r| (r.op, r.len)).collect();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0].0, EditOp::Substitution);
    assert_eq!(ops[1], (EditOp::Insertion, 1));
    assert_eq!(ops[2].0, EditOp::Substitution);
}

#[test]
fn test_script_consumes_reported_extents() {
    let mut r = rng(17);
    let mut aligner = GreedyAligner::new();
    let param_sets = [
        affine(2, -3, 5, 2, 30),
        affine(1, -2, 5, 2, 30),
        affine(10, -10, 5, 1, 100),
        affine(1, -1, 2, 1, 20),
    ];
    for params in &param_sets {
        for _ in 0..15 {
            let a = random_sequence(&mut r, 120);
            let b = mutate(&mut r, &a, 0.08);
            for direction in [Direction::Forward, Direction::Reverse] {
                let (result, script) = align_iupac(&mut aligner, &a, &b, direction, params);
                assert_script_matches_ends(&result, &script);
                assert_monotone(aligner.score_history());
            }
        }
    }
}

#[test]
fn test_zero_gap_costs_byte_identical_to_uniform() {
    let mut r = rng(29);
    let params = affine(1, -2, 0, 0, 25);
    let mut aligner = GreedyAligner::new();
    for _ in 0..20 {
        let raw = random_sequence(&mut r, 100);
        let a = encode_blastna(&raw);
        let b = encode_blastna(&mutate(&mut r, &raw, 0.1));

        let mut affine_script = EditScript::new();
        let from_affine = aligner
            .align_affine(
                UnpackedSequence::new(&a),
                UnpackedSequence::new(&b),
                Direction::Forward,
                &params,
                Some(&mut affine_script),
            )
            .unwrap();
        let affine_history = aligner.score_history().to_vec();

        let mut uniform_script = EditScript::new();
        let from_uniform = aligner
            .align_uniform(
                UnpackedSequence::new(&a),
                UnpackedSequence::new(&b),
                Direction::Forward,
                &params,
                Some(&mut uniform_script),
            )
            .unwrap();

        assert_eq!(from_affine, from_uniform);
        assert_eq!(affine_script, uniform_script);
        assert_eq!(affine_history, aligner.score_history());
    }
}

#[test]
fn test_normalized_match_cost_is_even() {
    for reward in 1..=6 {
        for penalty in [-1, -2, -3, -5] {
            let spec = ScoringSpec::new(reward, penalty, 3, 1);
            let costs = NormalizedCosts::new(&spec, 20).unwrap();
            assert_eq!(costs.match_cost % 2, 0);
            assert_eq!(costs.scale, if reward % 2 == 0 { 1 } else { 2 });
            let affine = costs.affine().unwrap();
            assert!(affine.gap_extend > 0);
            assert!(affine.max_penalty >= affine.op_cost);
            assert!(affine.max_penalty >= affine.gap_open_extend);
        }
    }
}

#[test]
fn test_script_scores_at_least_reported_score() {
    // Every charged gap open is a real one unless two gaps of the same kind
    // touch, which only lowers the rescored cost
    let mut r = rng(41);
    let params = affine(2, -3, 5, 2, 40);
    let mut aligner = GreedyAligner::new();
    for _ in 0..15 {
        let a = random_sequence(&mut r, 100);
        let b = mutate(&mut r, &a, 0.06);
        let (result, script) = align_iupac(&mut aligner, &a, &b, Direction::Forward, &params);
        let ea = encode_blastna(&a);
        let eb = encode_blastna(&b);
        let stats = xgreedy::core::AlignmentStats::compute(
            &script,
            &UnpackedSequence::new(&ea),
            &UnpackedSequence::new(&eb),
            0,
            0,
        );
        assert_eq!(result.scale, 1);
        assert!(
            stats.raw_score(&params.scoring) >= result.score as i64,
            "script {} rescored below {}",
            script,
            result.score
        );
    }
}

#[test]
fn test_arena_exhaustion_returns_best_endpoint() {
    let mut r = rng(47);
    let a = random_sequence(&mut r, 300);
    let b = mutate(&mut r, &a, 0.15);
    let ea = encode_blastna(&a);
    let eb = encode_blastna(&b);
    let mut aligner = GreedyAligner::with_config(AlignerConfig {
        block_capacity: 700,
        max_blocks: Some(1),
    });
    let mut script: EditScript = "2D".parse().unwrap();
    let err = aligner
        .align(
            UnpackedSequence::new(&ea),
            UnpackedSequence::new(&eb),
            Direction::Forward,
            &affine(1, -2, 5, 2, 10_000),
            Some(&mut script),
        )
        .unwrap_err();
    match err {
        AlignError::Arena { partial, .. } => {
            assert!(!partial.converged);
            assert!(partial.seq1_end > 0);
        }
        other => panic!("expected arena exhaustion, got {:?}", other),
    }
    assert_eq!(script.to_string(), "2D");
}

#[test]
fn test_score_overflow_is_rejected() {
    let a = encode_blastna(&[b'A'; 5000]);
    let mut b = a.clone();
    b[2500] = encode_blastna(b"C")[0];
    let mut aligner = GreedyAligner::new();
    let err = aligner
        .align(
            UnpackedSequence::new(&a),
            UnpackedSequence::new(&b),
            Direction::Forward,
            &affine(1_000_000, -1_000_000, 1_000_000, 1_000_000, 10),
            None,
        )
        .unwrap_err();
    assert_eq!(err, AlignError::Config(ConfigError::CostOverflow));
}
