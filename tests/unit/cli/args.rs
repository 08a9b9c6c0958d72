//! Unit tests for align/args.rs

use clap::{Args, Command, FromArgMatches};
use std::path::PathBuf;
use xgreedy::algorithm::align::AlignArgs;
use xgreedy::core::constants::{DEFAULT_BLOCK_CAPACITY, X_DROP_GREEDY};

fn parse_args(args: &[&str]) -> AlignArgs {
    let mut all_args = vec!["xgreedy".to_string(), "align".to_string()];
    all_args.extend(args.iter().map(|s| s.to_string()));

    let cmd = Command::new("xgreedy").subcommand(AlignArgs::augment_args(Command::new("align")));

    let matches = cmd.get_matches_from(all_args);
    let sub_matches = matches.subcommand_matches("align").unwrap();

    AlignArgs::from_arg_matches(sub_matches).unwrap()
}

#[test]
fn test_default_values() {
    let args = parse_args(&["-q", "query.fasta", "-s", "subject.fasta"]);

    assert_eq!(args.query, PathBuf::from("query.fasta"));
    assert_eq!(args.subject, PathBuf::from("subject.fasta"));
    assert_eq!(args.reward, 1);
    assert_eq!(args.penalty, -2);
    assert_eq!(args.gap_open, 0);
    assert_eq!(args.gap_extend, 0);
    assert_eq!(args.xdrop, X_DROP_GREEDY);
    assert_eq!(args.max_dist, None);
    assert_eq!((args.seed_q, args.seed_s), (0, 0));
    assert!(!args.packed);
    assert!(!args.adaptive);
    assert_eq!(args.block_capacity, DEFAULT_BLOCK_CAPACITY);
    assert_eq!(args.num_threads, 0);
    assert_eq!(args.out, None);
    assert!(!args.verbose);
}

#[test]
fn test_scoring_options() {
    let args = parse_args(&[
        "-q", "q.fa", "-s", "s.fa",
        "--reward", "2",
        "--penalty", "-3",
        "--gap-open", "5",
        "--gap-extend", "2",
        "--xdrop", "40",
        "--max-dist", "500",
    ]);
    let params = args.params();
    assert_eq!(params.scoring.reward, 2);
    assert_eq!(params.scoring.penalty, -3);
    assert_eq!(params.scoring.gap_open, 5);
    assert_eq!(params.scoring.gap_extend, 2);
    assert_eq!(params.xdrop, 40);
    assert_eq!(params.max_dist, Some(500));
    assert!(params.validate().is_ok());
}

#[test]
fn test_seed_and_flags() {
    let args = parse_args(&[
        "-q", "q.fa", "-s", "s.fa",
        "--seed-q", "12",
        "--seed-s", "30",
        "--packed",
        "--adaptive",
        "-n", "4",
        "-o", "out.tsv",
        "-v",
    ]);
    assert_eq!((args.seed_q, args.seed_s), (12, 30));
    assert!(args.packed && args.adaptive && args.verbose);
    assert_eq!(args.num_threads, 4);
    assert_eq!(args.out, Some(PathBuf::from("out.tsv")));
}

#[test]
fn test_block_capacity_grows_for_long_pairs() {
    let args = parse_args(&["-q", "q.fa", "-s", "s.fa", "--block-capacity", "64"]);
    assert_eq!(args.aligner_config(10).block_capacity, 64);
    assert_eq!(args.aligner_config(1000).block_capacity, 1003);
}

#[test]
fn test_seed_fits() {
    let args = parse_args(&["-q", "q.fa", "-s", "s.fa", "--seed-q", "10", "--seed-s", "4"]);
    assert!(args.seed_fits(10, 4));
    assert!(args.seed_fits(50, 50));
    assert!(!args.seed_fits(9, 50));
    assert!(!args.seed_fits(50, 3));
}
