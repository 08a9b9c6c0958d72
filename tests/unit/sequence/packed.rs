//! Unit tests for packed sequence access

use crate::helpers::{affine, megablast, mutate, random_sequence, rng};
use xgreedy::config::GreedyParams;
use xgreedy::core::{EditScript, GreedyAligner, GreedyAlignment};
use xgreedy::sequence::{
    encode_blastna, Direction, PackedBuffer, SequenceError, SymbolSequence, UnpackedSequence,
};

fn run<A: SymbolSequence, B: SymbolSequence>(
    a: A,
    b: B,
    direction: Direction,
    params: &GreedyParams,
) -> (GreedyAlignment, EditScript) {
    let mut aligner = GreedyAligner::new();
    let mut script = EditScript::new();
    let result = aligner.align(a, b, direction, params, Some(&mut script)).unwrap();
    (result, script)
}

#[test]
fn test_packed_and_unpacked_agree() {
    let mut r = rng(7);
    for params in [megablast(25), affine(2, -3, 5, 2, 30)] {
        for _ in 0..10 {
            let a = random_sequence(&mut r, 140);
            let b = mutate(&mut r, &a, 0.06);
            let ea = encode_blastna(&a);
            let eb = encode_blastna(&b);
            let packed = PackedBuffer::from_iupac(&b);

            for direction in [Direction::Forward, Direction::Reverse] {
                let unpacked = run(
                    UnpackedSequence::new(&ea),
                    UnpackedSequence::new(&eb),
                    direction,
                    &params,
                );
                let from_packed = run(
                    UnpackedSequence::new(&ea),
                    packed.as_sequence(),
                    direction,
                    &params,
                );
                assert_eq!(unpacked, from_packed);
            }
        }
    }
}

#[test]
fn test_window_with_remainder_matches_subslice() {
    let mut r = rng(13);
    let seq = random_sequence(&mut r, 61);
    let packed = PackedBuffer::from_iupac(&seq);
    let codes = encode_blastna(&seq);
    for start in 0..8 {
        let len = 40 + start % 3;
        let window = packed.window(start, len).unwrap();
        assert_eq!(window.remainder() as usize, start % 4);
        assert_eq!(window.len(), len);
        for i in 0..len {
            assert_eq!(window.symbol(i), codes[start + i]);
        }
    }
}

#[test]
fn test_window_alignment_equals_unpacked_window() {
    let mut r = rng(19);
    let subject = random_sequence(&mut r, 203);
    let query = mutate(&mut r, &subject[5..180], 0.05);
    let packed = PackedBuffer::from_iupac(&subject);
    let eq = encode_blastna(&query);
    let es = encode_blastna(&subject[5..180]);

    let from_window = run(
        UnpackedSequence::new(&eq),
        packed.window(5, 175).unwrap(),
        Direction::Forward,
        &megablast(30),
    );
    let from_slice = run(
        UnpackedSequence::new(&eq),
        UnpackedSequence::new(&es),
        Direction::Forward,
        &megablast(30),
    );
    assert_eq!(from_window, from_slice);
}

#[test]
fn test_window_out_of_bounds() {
    let packed = PackedBuffer::from_iupac(b"ACGTACGT");
    assert!(matches!(
        packed.window(6, 3),
        Err(SequenceError::WindowOutOfBounds { .. })
    ));
}
