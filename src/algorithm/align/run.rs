use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use super::args::AlignArgs;
use super::coordination::{read_sequences, EncodedQuery, EncodedSubject, SubjectCodes};
use crate::config::{GreedyParams, ScoringSpec};
use crate::core::{AlignError, AlignmentStats, GappedExtension, GreedyAligner};
use crate::report::{write_to_file, write_to_stdout, AlignmentRecord};
use crate::sequence::{SymbolSequence, UnpackedSequence};

pub fn run(args: AlignArgs) -> Result<()> {
    let num_threads = if args.num_threads == 0 {
        num_cpus::get()
    } else {
        args.num_threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .context("Failed to build thread pool")?;

    let scoring = args.scoring();
    let params = args.params();
    params.validate().context("Invalid scoring parameters")?;

    let (queries, subjects) = read_sequences(&args)?;
    if queries.is_empty() || subjects.is_empty() {
        if args.verbose {
            eprintln!("[INFO] Nothing to align");
        }
        return Ok(());
    }

    let longest_query = queries.iter().map(|q| q.codes.len()).max().unwrap_or(0);
    let longest_subject = subjects.iter().map(|s| s.len()).max().unwrap_or(0);
    let config = args.aligner_config(longest_query + longest_subject);

    if args.verbose {
        eprintln!(
            "[INFO] reward={} penalty={} gap_open={} gap_extend={} xdrop={} max_dist={:?} adaptive={}",
            scoring.reward,
            scoring.penalty,
            scoring.gap_open,
            scoring.gap_extend,
            params.xdrop,
            params.max_dist,
            args.adaptive
        );
        eprintln!(
            "[INFO] {} threads, arena block capacity {}",
            num_threads, config.block_capacity
        );
    }

    let bar = ProgressBar::new(queries.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .context("Invalid progress bar template")?,
    );

    let per_query: Vec<Vec<Option<AlignmentRecord>>> = queries
        .par_iter()
        .map_init(
            || GreedyAligner::with_config(config),
            |aligner, query| {
                let records = subjects
                    .iter()
                    .map(|subject| align_pair(aligner, query, subject, &args, &params, &scoring))
                    .collect::<Result<Vec<_>>>();
                bar.inc(1);
                records
            },
        )
        .collect::<Result<Vec<_>>>()?;
    bar.finish();

    let records: Vec<AlignmentRecord> = per_query.into_iter().flatten().flatten().collect();
    if args.verbose {
        eprintln!("[INFO] {} alignments", records.len());
    }

    match &args.out {
        Some(path) => write_to_file(&records, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => write_to_stdout(&records).context("Failed to write to stdout")?,
    }
    Ok(())
}

fn align_pair(
    aligner: &mut GreedyAligner,
    query: &EncodedQuery,
    subject: &EncodedSubject,
    args: &AlignArgs,
    params: &GreedyParams,
    scoring: &ScoringSpec,
) -> Result<Option<AlignmentRecord>> {
    if !args.seed_fits(query.codes.len(), subject.len()) {
        if args.verbose {
            eprintln!(
                "[INFO] Skipping {} against {}: seed ({}, {}) outside lengths ({}, {})",
                query.id,
                subject.id,
                args.seed_q,
                args.seed_s,
                query.codes.len(),
                subject.len()
            );
        }
        return Ok(None);
    }

    let query_seq = UnpackedSequence::new(&query.codes);
    let (extension, stats) = match &subject.codes {
        SubjectCodes::Unpacked(codes) => {
            extend(aligner, query_seq, UnpackedSequence::new(codes), args, params)
        }
        SubjectCodes::Packed(buffer) => extend(aligner, query_seq, buffer.as_sequence(), args, params),
    }
    .with_context(|| format!("Failed to align {} against {}", query.id, subject.id))?;

    Ok(Some(AlignmentRecord {
        query_id: query.id.clone(),
        subject_id: subject.id.clone(),
        q_start: extension.q_start,
        q_end: extension.q_end,
        s_start: extension.s_start,
        s_end: extension.s_end,
        score: stats.raw_score(scoring),
        distance: extension.distance,
        stats,
        cigar: extension.script.to_string(),
    }))
}

fn extend<A, B>(
    aligner: &mut GreedyAligner,
    query: A,
    subject: B,
    args: &AlignArgs,
    params: &GreedyParams,
) -> Result<(GappedExtension, AlignmentStats), AlignError>
where
    A: SymbolSequence + Copy,
    B: SymbolSequence + Copy,
{
    let extension = if args.adaptive {
        aligner.extend_from_seed_adaptive(query, subject, args.seed_q, args.seed_s, params)?
    } else {
        aligner.extend_from_seed(query, subject, args.seed_q, args.seed_s, params)?
    };
    let stats = AlignmentStats::compute(
        &extension.script,
        &query,
        &subject,
        extension.q_start,
        extension.s_start,
    );
    Ok((extension, stats))
}
