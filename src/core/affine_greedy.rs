//! Affine-gap greedy alignment
//!
//! Reference: ncbi-blast/c++/src/algo/blast/core/greedy_align.c
//! (BLAST_AffineGreedyAlign)
//!
//! Distances are measured in cost units: a mismatch costs `op_cost`, opening
//! a gap `gap_open + gap_extend` and extending it `gap_extend`, where
//! `gap_extend` includes half a match so that the score of a cell follows
//! from its distance and extent alone. Each diagonal tracks three reaches,
//! one per kind of last operation, and contributions come from up to
//! `max_penalty` distances back.

use super::constants::{INVALID_DIAG, INVALID_OFFSET};
use super::costs::{ceil_div, check_score_range, AffineCosts};
use super::distance_table::{DistanceTable, Retention};
use super::edit_script::{EditOp, EditScript};
use super::error::AlignError;
use super::greedy_align::{BestPoint, GreedyAligner, GreedyAlignment};
use crate::config::{ConfigError, GreedyParams};
use crate::sequence::{count_matches, Direction, Oriented, SymbolSequence};

/// Reaches of one diagonal at one distance, by last operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyOffset {
    /// Path ending in an insertion (seq2 symbol against a gap)
    pub insertion: i32,
    /// Path ending in a match or mismatch, after sliding
    pub substitution: i32,
    /// Path ending in a deletion (seq1 symbol against a gap)
    pub deletion: i32,
}

impl GreedyOffset {
    pub const UNREACHED: Self = Self {
        insertion: INVALID_OFFSET,
        substitution: INVALID_OFFSET,
        deletion: INVALID_OFFSET,
    };
}

impl Default for GreedyOffset {
    fn default() -> Self {
        Self::UNREACHED
    }
}

/// Traceback state: the kind of the operation that produced the current cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraceState {
    Substitution,
    Insertion,
    Deletion,
}

/// Usable source reaches for cell `(d, k)`. Each is the stored reach of the
/// source cell, or `INVALID_OFFSET` when out of bounds or when taking the
/// step would run past the end of a sequence.
#[derive(Debug, Clone, Copy)]
struct Sources {
    insertion_open: i32,
    insertion_extend: i32,
    deletion_open: i32,
    deletion_extend: i32,
    substitution: i32,
}

impl Sources {
    fn at(
        table: &DistanceTable<GreedyOffset>,
        costs: &AffineCosts,
        d: usize,
        k: i32,
        len1: i32,
        len2: i32,
    ) -> Self {
        let open = d.checked_sub(costs.gap_open_extend as usize);
        let extend = d.checked_sub(costs.gap_extend as usize);
        let mismatch = d.checked_sub(costs.op_cost as usize);

        let read = |dist: Option<usize>, diag: i32, pick: fn(&GreedyOffset) -> i32| -> i32 {
            dist.map_or(INVALID_OFFSET, |dd| pick(&table.get_bounded(dd, diag)))
        };
        // Insertions step seq2 from diagonal k + 1, deletions step seq1 from k - 1
        let seq2_open = |s2: i32| s2 >= 0 && s2 < len2;
        let seq1_open = |s2: i32| s2 >= 0 && s2 + k - 1 < len1;
        let keep = |v: i32, ok: bool| if ok { v } else { INVALID_OFFSET };

        let insertion_open = read(open, k + 1, |o| o.substitution);
        let insertion_extend = read(extend, k + 1, |o| o.insertion);
        let deletion_open = read(open, k - 1, |o| o.substitution);
        let deletion_extend = read(extend, k - 1, |o| o.deletion);
        let substitution = read(mismatch, k, |o| o.substitution);

        Self {
            insertion_open: keep(insertion_open, seq2_open(insertion_open)),
            insertion_extend: keep(insertion_extend, seq2_open(insertion_extend)),
            deletion_open: keep(deletion_open, seq1_open(deletion_open)),
            deletion_extend: keep(deletion_extend, seq1_open(deletion_extend)),
            substitution: keep(
                substitution,
                substitution >= 0 && substitution < len2 && substitution + k < len1,
            ),
        }
    }

    /// Insertion reach of the cell (seq2 advances by one).
    #[inline]
    fn insertion(&self) -> i32 {
        let src = self.insertion_open.max(self.insertion_extend);
        if src < 0 {
            INVALID_OFFSET
        } else {
            src + 1
        }
    }

    /// Deletion reach of the cell (seq2 stays put).
    #[inline]
    fn deletion(&self) -> i32 {
        self.deletion_open.max(self.deletion_extend)
    }

    /// Substitution reach before sliding.
    #[inline]
    fn substitution(&self) -> i32 {
        if self.substitution < 0 {
            INVALID_OFFSET
        } else {
            self.substitution + 1
        }
    }
}

impl GreedyAligner {
    /// Greedy alignment with affine gap costs.
    ///
    /// With both gap costs zero this is exactly [`GreedyAligner::align_uniform`].
    /// The distance cap in `params` counts gap extensions: the search runs to
    /// `max_dist * gap_extend` cost units.
    pub fn align_affine<A, B>(
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
        let (costs, max_dist) = self.prepare(params, seq1.len(), seq2.len())?;
        let seq1 = Oriented::new(seq1, direction);
        let seq2 = Oriented::new(seq2, direction);

        if costs.gap_open == 0 && costs.gap_extend == 0 {
            return self.run_uniform(&seq1, &seq2, &costs, max_dist, direction, script);
        }
        if seq1.is_empty() || seq2.is_empty() {
            self.history.clear();
            self.history.push(0);
            return Ok(GreedyAlignment::empty(costs.scale));
        }

        let affine = costs.affine()?;
        let scaled_max_dist = max_dist
            .checked_mul(affine.gap_extend as usize)
            .ok_or(ConfigError::CostOverflow)?;
        let retention = if script.is_some() {
            Retention::All
        } else {
            Retention::Window(affine.max_penalty as usize + 1)
        };

        let (result, best) =
            self.search_affine(&seq1, &seq2, &affine, costs.scale, scaled_max_dist, retention)?;

        if let Some(script) = script {
            self.affine_traceback(best, &affine, seq1.len() as i32, seq2.len() as i32)?;
            self.emit_script(direction, script);
        }
        Ok(result)
    }

    fn search_affine<A, B>(
        &mut self,
        seq1: &A,
        seq2: &B,
        costs: &AffineCosts,
        scale: i32,
        scaled_max_dist: usize,
        retention: Retention,
    ) -> Result<(GreedyAlignment, BestPoint), AlignError>
    where
        A: SymbolSequence,
        B: SymbolSequence,
    {
        let len1 = seq1.len() as i32;
        let len2 = seq2.len() as i32;
        let half_match = costs.half_match;
        let score_common_factor = costs.common_factor;
        let xdrop = costs.xdrop;
        let xdrop_offset =
            (xdrop.saturating_add(half_match) / score_common_factor + 1) as usize;
        let max_penalty = costs.max_penalty as usize;
        check_score_range(
            seq1.len() + seq2.len(),
            half_match,
            scaled_max_dist,
            score_common_factor,
        )?;

        self.history.clear();
        self.affine_offsets.begin(retention);

        let initial = count_matches(seq1, seq2, 0, 0) as i32;
        let initial_score = initial * 2 * half_match;
        self.history.push(initial_score);
        let mut result = GreedyAlignment {
            seq1_end: initial as usize,
            seq2_end: initial as usize,
            distance: 0,
            score: initial_score,
            scale,
            converged: true,
        };
        let mut best = BestPoint {
            distance: 0,
            diag: 0,
            seq2: initial,
        };
        if initial == len1 || initial == len2 {
            return Ok((result, best));
        }

        let arena_failure = |source, partial: GreedyAlignment| AlignError::Arena {
            source,
            partial: GreedyAlignment {
                converged: false,
                ..partial
            },
        };

        self.affine_offsets
            .push_row(0, 0, 0)
            .map_err(|e| arena_failure(e, result))?;
        self.affine_offsets.set(
            0,
            0,
            GreedyOffset {
                substitution: initial,
                ..GreedyOffset::UNREACHED
            },
        );
        self.affine_offsets.close_row(0, 0, 0);

        let mut diag_lower = -1i32;
        let mut diag_upper = 1i32;
        let mut end1_diag: Option<i32> = None;
        let mut end2_diag: Option<i32> = None;
        // Non-empty distances among the last `max_penalty`
        let mut num_nonempty_dist = 1usize;
        let mut converged = false;
        let mut d = 1usize;

        while d <= scaled_max_dist {
            let prior = if d >= xdrop_offset {
                self.history[d - xdrop_offset]
            } else {
                0
            };
            let xdrop_score = ceil_div(
                prior + score_common_factor * d as i32 - xdrop,
                half_match,
            );

            let (band_lower, band_upper) = (diag_lower, diag_upper);
            self.affine_offsets
                .push_row(d, band_lower, band_upper)
                .map_err(|e| arena_failure(e, result))?;

            let mut frontier: Option<(i32, i32, i32)> = None;

            for k in band_lower..=band_upper {
                let sources = Sources::at(&self.affine_offsets, costs, d, k, len1, len2);
                let mut entry = GreedyOffset {
                    insertion: sources.insertion(),
                    substitution: INVALID_OFFSET,
                    deletion: sources.deletion(),
                };
                let seq2_index = entry
                    .insertion
                    .max(entry.deletion)
                    .max(sources.substitution());
                let seq1_index = seq2_index + k;

                if seq2_index < 0 || seq1_index + seq2_index < xdrop_score {
                    if k == diag_lower {
                        diag_lower += 1;
                    }
                    self.affine_offsets.set(d, k, entry);
                    continue;
                }
                diag_upper = k;

                let slide = count_matches(seq1, seq2, seq1_index as usize, seq2_index as usize) as i32;
                let seq1_index = seq1_index + slide;
                let seq2_index = seq2_index + slide;
                entry.substitution = seq2_index;
                self.affine_offsets.set(d, k, entry);

                let extent = seq1_index + seq2_index;
                if frontier.map_or(true, |(best_extent, _, _)| extent > best_extent) {
                    frontier = Some((extent, k, seq2_index));
                }

                // Stay inside the sequences from here on
                if seq1_index == len1 {
                    diag_upper = k;
                    end1_diag = Some(k - 1);
                }
                if seq2_index == len2 {
                    diag_lower = k;
                    end2_diag = Some(k + 1);
                }
            }

            let prev_best = self.history[d - 1];
            match frontier {
                Some((extent, k, seq2_index))
                    if extent * half_match - d as i32 * score_common_factor > prev_best =>
                {
                    let score = extent * half_match - d as i32 * score_common_factor;
                    self.history.push(score);
                    best = BestPoint {
                        distance: d,
                        diag: k,
                        seq2: seq2_index,
                    };
                    result.seq1_end = (seq2_index + k) as usize;
                    result.seq2_end = seq2_index as usize;
                    result.distance = d;
                    result.score = score;
                }
                _ => self.history.push(prev_best),
            }

            self.affine_offsets.close_row(d, diag_lower, diag_upper);
            if diag_lower <= diag_upper {
                num_nonempty_dist += 1;
            }
            if d >= max_penalty {
                let (old_lower, old_upper) = self.affine_offsets.bounds(d - max_penalty);
                if old_lower <= old_upper {
                    num_nonempty_dist -= 1;
                }
            }
            if num_nonempty_dist == 0 {
                converged = true;
                break;
            }

            // Any diagonal that could receive a contribution at d + 1
            d += 1;
            let lower_at = |step: i32| {
                d.checked_sub(step as usize)
                    .map_or(INVALID_DIAG, |dd| self.affine_offsets.bounds(dd).0)
            };
            let upper_at = |step: i32| {
                d.checked_sub(step as usize)
                    .map_or(-INVALID_DIAG, |dd| self.affine_offsets.bounds(dd).1)
            };

            diag_lower = lower_at(costs.gap_open_extend).min(lower_at(costs.gap_extend)) - 1;
            diag_lower = diag_lower.min(lower_at(costs.op_cost));
            if let Some(end2) = end2_diag {
                diag_lower = diag_lower.max(end2);
            }

            diag_upper = upper_at(costs.gap_open_extend).max(upper_at(costs.gap_extend)) + 1;
            diag_upper = diag_upper.max(upper_at(costs.op_cost));
            if let Some(end1) = end1_diag {
                diag_upper = diag_upper.min(end1);
            }
        }

        result.converged = converged;
        Ok((result, best))
    }

    /// Rebuild the edit script of `best` into `self.scratch`, end first.
    ///
    /// From a substitution cell the substitution source wins ties; otherwise
    /// a deletion beats an insertion only when it reaches strictly further.
    /// Inside a gap, extending is preferred over opening.
    fn affine_traceback(
        &mut self,
        best: BestPoint,
        costs: &AffineCosts,
        len1: i32,
        len2: i32,
    ) -> Result<(), AlignError> {
        self.scratch.clear();
        let mut d = best.distance;
        let mut k = best.diag;
        let mut seq2_index = best.seq2;
        let mut state = TraceState::Substitution;
        let lost = |d: usize, k: i32| AlignError::Traceback {
            distance: d,
            diagonal: k,
        };

        loop {
            match state {
                TraceState::Substitution => {
                    if d == 0 {
                        if k != 0 || seq2_index < 0 {
                            return Err(lost(d, k));
                        }
                        self.scratch
                            .append_run(EditOp::Substitution, seq2_index as usize);
                        break;
                    }

                    let sources = Sources::at(&self.affine_offsets, costs, d, k, len1, len2);
                    let insertion = sources.insertion();
                    let deletion = sources.deletion();
                    let substitution = sources.substitution();
                    let start = insertion.max(deletion).max(substitution);
                    if start < 0 || start > seq2_index {
                        return Err(lost(d, k));
                    }
                    self.scratch
                        .append_run(EditOp::Substitution, (seq2_index - start) as usize);
                    seq2_index = start;

                    if substitution >= insertion.max(deletion) {
                        self.scratch.append_run(EditOp::Substitution, 1);
                        seq2_index -= 1;
                        d -= costs.op_cost as usize;
                    } else if deletion > insertion {
                        state = TraceState::Deletion;
                    } else {
                        state = TraceState::Insertion;
                    }
                }
                TraceState::Insertion => {
                    self.scratch.append_run(EditOp::Insertion, 1);
                    let sources = Sources::at(&self.affine_offsets, costs, d, k, len1, len2);
                    let source = seq2_index - 1;
                    if sources.insertion_extend >= 0 && sources.insertion_extend == source {
                        d -= costs.gap_extend as usize;
                    } else if sources.insertion_open >= 0 && sources.insertion_open == source {
                        d -= costs.gap_open_extend as usize;
                        state = TraceState::Substitution;
                    } else {
                        return Err(lost(d, k));
                    }
                    k += 1;
                    seq2_index = source;
                }
                TraceState::Deletion => {
                    self.scratch.append_run(EditOp::Deletion, 1);
                    let sources = Sources::at(&self.affine_offsets, costs, d, k, len1, len2);
                    if sources.deletion_extend >= 0 && sources.deletion_extend == seq2_index {
                        d -= costs.gap_extend as usize;
                    } else if sources.deletion_open >= 0 && sources.deletion_open == seq2_index {
                        d -= costs.gap_open_extend as usize;
                        state = TraceState::Substitution;
                    } else {
                        return Err(lost(d, k));
                    }
                    k -= 1;
                }
            }
        }
        Ok(())
    }
}
