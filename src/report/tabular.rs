//! Tab-separated alignment report.
//!
//! Columns: `qid sid qstart qend sstart send score distance matches
//! mismatches gapopens pident cigar`. Coordinates are 1-based and
//! inclusive, the score is in raw scoring units.

use std::io::{self, Write};
use std::path::Path;

use crate::core::AlignmentStats;

pub const HEADER: &str =
    "qid\tsid\tqstart\tqend\tsstart\tsend\tscore\tdistance\tmatches\tmismatches\tgapopens\tpident\tcigar";

/// One aligned query/subject pair. Coordinates are 0-based, half-open.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    pub query_id: String,
    pub subject_id: String,
    pub q_start: usize,
    pub q_end: usize,
    pub s_start: usize,
    pub s_end: usize,
    pub score: i64,
    pub distance: usize,
    pub stats: AlignmentStats,
    pub cigar: String,
}

pub fn write_record<W: Write>(writer: &mut W, record: &AlignmentRecord) -> io::Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.3}\t{}",
        record.query_id,
        record.subject_id,
        record.q_start + 1,
        record.q_end,
        record.s_start + 1,
        record.s_end,
        record.score,
        record.distance,
        record.stats.matches,
        record.stats.mismatches,
        record.stats.gap_opens,
        record.stats.identity(),
        record.cigar
    )
}

pub fn write_tabular<W: Write>(
    records: &[AlignmentRecord],
    writer: &mut W,
    include_header: bool,
) -> io::Result<()> {
    if include_header {
        writeln!(writer, "#{}", HEADER)?;
    }
    for record in records {
        write_record(writer, record)?;
    }
    writer.flush()
}

pub fn write_to_file(records: &[AlignmentRecord], path: &Path) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write_tabular(records, &mut writer, true)
}

pub fn write_to_stdout(records: &[AlignmentRecord]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_tabular(records, &mut writer, true)
}
