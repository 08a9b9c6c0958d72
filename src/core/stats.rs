//! Column statistics of an aligned pair.

use super::edit_script::{EditOp, EditScript};
use crate::config::ScoringSpec;
use crate::sequence::SymbolSequence;

/// Counts taken from an edit script and the sequences it aligns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub gap_opens: usize,
    /// Gapped columns (insertions plus deletions)
    pub gap_letters: usize,
    pub columns: usize,
}

impl AlignmentStats {
    /// Walk `script` over `seq1[start1..]` and `seq2[start2..]`, both read
    /// forward. Substitution columns past the end of either sequence count
    /// as mismatches.
    pub fn compute<A, B>(script: &EditScript, seq1: &A, seq2: &B, start1: usize, start2: usize) -> Self
    where
        A: SymbolSequence + ?Sized,
        B: SymbolSequence + ?Sized,
    {
        let mut stats = Self::default();
        let mut i = start1;
        let mut j = start2;

        for run in script.runs() {
            match run.op {
                EditOp::Substitution => {
                    for _ in 0..run.len {
                        if i < seq1.len() && j < seq2.len() && seq1.symbol(i) == seq2.symbol(j) {
                            stats.matches += 1;
                        } else {
                            stats.mismatches += 1;
                        }
                        i += 1;
                        j += 1;
                    }
                }
                EditOp::Insertion => {
                    stats.gap_opens += 1;
                    stats.gap_letters += run.len;
                    j += run.len;
                }
                EditOp::Deletion => {
                    stats.gap_opens += 1;
                    stats.gap_letters += run.len;
                    i += run.len;
                }
            }
            stats.columns += run.len;
        }
        stats
    }

    /// Percent identity over all columns.
    pub fn identity(&self) -> f64 {
        if self.columns == 0 {
            0.0
        } else {
            100.0 * self.matches as f64 / self.columns as f64
        }
    }

    /// Raw score under `scoring`. Every gap of length `n` costs
    /// `gap_open + n * gap_extend`.
    pub fn raw_score(&self, scoring: &ScoringSpec) -> i64 {
        self.matches as i64 * scoring.reward as i64 + self.mismatches as i64 * scoring.penalty as i64
            - self.gap_opens as i64 * scoring.gap_open as i64
            - self.gap_letters as i64 * scoring.gap_extend as i64
    }
}
