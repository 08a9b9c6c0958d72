//! Drivers built on the greedy aligners: adaptive distance caps and
//! two-sided extension from a seed.
//!
//! Reference: ncbi-blast/c++/src/algo/blast/core/blast_gapalign.c
//! (BLAST_GreedyGappedAlignment)

use super::constants::{GREEDY_MAX_COST, GREEDY_MAX_COST_FRACTION};
use super::edit_script::EditScript;
use super::error::AlignError;
use super::greedy_align::{GreedyAligner, GreedyAlignment};
use crate::config::GreedyParams;
use crate::sequence::{Direction, SubSequence, SymbolSequence};

/// A gapped alignment grown in both directions from a seed.
///
/// Coordinates are 0-based, half-open. `score` is in normalized units
/// (see [`GreedyAlignment::scale`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GappedExtension {
    pub q_start: usize,
    pub q_end: usize,
    pub s_start: usize,
    pub s_end: usize,
    pub score: i32,
    pub scale: i32,
    /// Total distance of both halves
    pub distance: usize,
    /// Both halves joined, forward genomic order
    pub script: EditScript,
}

impl GreedyAligner {
    /// Align with a distance cap that grows until the search converges.
    ///
    /// The first cap is `min(GREEDY_MAX_COST, max(len1, len2) / 2 + 1)`;
    /// it doubles after every attempt that ran out of distance, up to
    /// `len1 + len2`. Only the final attempt writes to `script`.
    pub fn align_adaptive<A, B>(
        &mut self,
        seq1: A,
        seq2: B,
        direction: Direction,
        params: &GreedyParams,
        script: Option<&mut EditScript>,
    ) -> Result<GreedyAlignment, AlignError>
    where
        A: SymbolSequence,
        B: SymbolSequence,
    {
        let len1 = seq1.len();
        let len2 = seq2.len();
        let limit = (len1 + len2).max(1);
        let mut max_dist =
            GREEDY_MAX_COST.min(len1.max(len2) / GREEDY_MAX_COST_FRACTION + 1);

        loop {
            let trial = params.with_max_dist(max_dist);
            let result = self.align(&seq1, &seq2, direction, &trial, None)?;
            if result.converged || max_dist >= limit {
                return match script {
                    Some(script) => self.align(seq1, seq2, direction, &trial, Some(script)),
                    None => Ok(result),
                };
            }
            max_dist = max_dist.saturating_mul(2).min(limit);
        }
    }

    /// Extend a seed at `query[q_seed]` / `subject[s_seed]` in both
    /// directions. The left half covers `query[..q_seed]` read backwards,
    /// the right half starts at the seed symbol itself.
    pub fn extend_from_seed<A, B>(
        &mut self,
        query: A,
        subject: B,
        q_seed: usize,
        s_seed: usize,
        params: &GreedyParams,
    ) -> Result<GappedExtension, AlignError>
    where
        A: SymbolSequence,
        B: SymbolSequence,
    {
        self.extend_both_sides(query, subject, q_seed, s_seed, params, false)
    }

    /// [`GreedyAligner::extend_from_seed`] with adaptive distance caps on
    /// each side.
    pub fn extend_from_seed_adaptive<A, B>(
        &mut self,
        query: A,
        subject: B,
        q_seed: usize,
        s_seed: usize,
        params: &GreedyParams,
    ) -> Result<GappedExtension, AlignError>
    where
        A: SymbolSequence,
        B: SymbolSequence,
    {
        self.extend_both_sides(query, subject, q_seed, s_seed, params, true)
    }

    fn extend_both_sides<A, B>(
        &mut self,
        query: A,
        subject: B,
        q_seed: usize,
        s_seed: usize,
        params: &GreedyParams,
        adaptive: bool,
    ) -> Result<GappedExtension, AlignError>
    where
        A: SymbolSequence,
        B: SymbolSequence,
    {
        let q_len = query.len();
        let s_len = subject.len();
        let q_left = SubSequence::new(&query, 0, q_seed)?;
        let s_left = SubSequence::new(&subject, 0, s_seed)?;
        let q_right = SubSequence::new(&query, q_seed, q_len - q_seed)?;
        let s_right = SubSequence::new(&subject, s_seed, s_len - s_seed)?;

        let mut script = EditScript::new();
        let (left, right) = if adaptive {
            let left = self.align_adaptive(q_left, s_left, Direction::Reverse, params, Some(&mut script))?;
            let right = self.align_adaptive(q_right, s_right, Direction::Forward, params, Some(&mut script))?;
            (left, right)
        } else {
            let left = self.align(q_left, s_left, Direction::Reverse, params, Some(&mut script))?;
            let right = self.align(q_right, s_right, Direction::Forward, params, Some(&mut script))?;
            (left, right)
        };

        Ok(GappedExtension {
            q_start: q_seed - left.seq1_end,
            q_end: q_seed + right.seq1_end,
            s_start: s_seed - left.seq2_end,
            s_end: s_seed + right.seq2_end,
            score: left.score + right.score,
            scale: right.scale,
            distance: left.distance + right.distance,
            script,
        })
    }
}
