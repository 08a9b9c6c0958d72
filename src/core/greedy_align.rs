//! Greedy alignment for high-identity nucleotide sequences
//!
//! Reference: ncbi-blast/c++/src/algo/blast/core/greedy_align.c
//!
//! Implements the greedy algorithm of Zhang et al. (2000): instead of filling
//! a DP matrix, the search walks edit distances `d = 0, 1, 2, ...` and for
//! each diagonal `k = seq1_offset - seq2_offset` of a growing band records
//! the furthest seq2 offset reachable with `d` edits. Each new reach slides
//! down its diagonal through matching symbols before the next distance.
//!
//! - **Uniform costs** (`align_uniform`): one reach per diagonal; a mismatch,
//!   insertion or deletion each cost one unit of distance.
//! - **Affine gaps** (`align_affine`, in `affine_greedy`): three reaches per
//!   diagonal and distances measured in gap/mismatch cost units.
//!
//! X-drop pruning drops diagonals whose best possible score has fallen more
//! than `xdrop` below the best score seen `xdrop_offset` distances earlier.
//! With an edit script requested, every per-distance row stays in the arena
//! and a backward walk from the best endpoint rebuilds the alignment.

use super::affine_greedy::GreedyOffset;
use super::constants::{INVALID_OFFSET, MAX_SEQUENCE_LEN};
use super::costs::{ceil_div, check_score_range, NormalizedCosts};
use super::distance_table::{DistanceTable, Retention};
use super::edit_script::{EditOp, EditScript};
use super::error::AlignError;
use crate::config::{AlignerConfig, ConfigError, GreedyParams};
use crate::sequence::{count_matches, Direction, Oriented, SymbolSequence};

/// Endpoint of a one-directional greedy alignment.
///
/// `seq1_end` / `seq2_end` count the symbols consumed from the origin in the
/// search direction. `score` is in normalized units: divide by `scale` for
/// raw score units (exact for the affine search).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyAlignment {
    pub seq1_end: usize,
    pub seq2_end: usize,
    /// Distance of the best endpoint (edits for uniform costs, cost units
    /// divided by the common factor for affine costs).
    pub distance: usize,
    pub score: i32,
    pub scale: i32,
    /// False when the distance cap stopped the search before the band closed.
    pub converged: bool,
}

impl GreedyAlignment {
    pub(crate) fn empty(scale: i32) -> Self {
        Self {
            seq1_end: 0,
            seq2_end: 0,
            distance: 0,
            score: 0,
            scale,
            converged: true,
        }
    }

    fn origin(initial: i32, score: i32, scale: i32) -> Self {
        Self {
            seq1_end: initial as usize,
            seq2_end: initial as usize,
            distance: 0,
            score,
            scale,
            converged: true,
        }
    }
}

/// Best cell of a search, the start of traceback.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BestPoint {
    pub distance: usize,
    pub diag: i32,
    pub seq2: i32,
}

/// Candidate reaches for `(d, k)` from distance `d - 1`; unusable ones hold
/// `INVALID_OFFSET`.
#[derive(Debug, Clone, Copy)]
struct Predecessors {
    /// From diagonal `k`, one symbol of each sequence
    substitution: i32,
    /// From diagonal `k - 1`, one symbol of seq1
    deletion: i32,
    /// From diagonal `k + 1`, one symbol of seq2
    insertion: i32,
}

impl Predecessors {
    fn at(table: &DistanceTable<i32>, d: usize, k: i32, len1: i32, len2: i32) -> Self {
        let prev = d - 1;

        let mut substitution = INVALID_OFFSET;
        let s2 = table.get(prev, k);
        if s2 >= 0 && s2 < len2 && s2 + k < len1 {
            substitution = s2 + 1;
        }

        let mut deletion = INVALID_OFFSET;
        let s2 = table.get(prev, k - 1);
        if s2 >= 0 && s2 + k - 1 < len1 {
            deletion = s2;
        }

        let mut insertion = INVALID_OFFSET;
        let s2 = table.get(prev, k + 1);
        if s2 >= 0 && s2 < len2 {
            insertion = s2 + 1;
        }

        Self {
            substitution,
            deletion,
            insertion,
        }
    }

    #[inline]
    fn best(&self) -> i32 {
        self.substitution.max(self.deletion).max(self.insertion)
    }
}

/// Reusable greedy aligner.
///
/// Owns the arena-backed reach tables and the score history; both are
/// recycled on every call, so one aligner per worker thread avoids
/// per-call allocation once the arena has grown.
pub struct GreedyAligner {
    config: AlignerConfig,
    pub(crate) offsets: DistanceTable<i32>,
    pub(crate) affine_offsets: DistanceTable<GreedyOffset>,
    pub(crate) history: Vec<i32>,
    pub(crate) scratch: EditScript,
}

impl Default for GreedyAligner {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedyAligner {
    pub fn new() -> Self {
        Self::with_config(AlignerConfig::default())
    }

    pub fn with_config(config: AlignerConfig) -> Self {
        Self {
            config,
            offsets: DistanceTable::new(config.block_capacity, config.max_blocks, INVALID_OFFSET),
            affine_offsets: DistanceTable::new(
                config.block_capacity,
                config.max_blocks,
                GreedyOffset::UNREACHED,
            ),
            history: Vec::new(),
            scratch: EditScript::new(),
        }
    }

    /// Best score at each distance of the last search (non-decreasing).
    #[inline]
    pub fn score_history(&self) -> &[i32] {
        &self.history
    }

    /// Arena blocks currently owned by the aligner.
    pub fn arena_blocks(&self) -> usize {
        self.offsets.block_count() + self.affine_offsets.block_count()
    }

    /// Forget the last search. Arena memory is kept.
    pub fn reset(&mut self) {
        self.offsets.begin(Retention::All);
        self.affine_offsets.begin(Retention::All);
        self.history.clear();
        self.scratch.clear();
    }

    /// Align with the variant the gap costs call for.
    pub fn align<A, B>(
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
        if params.scoring.is_gapless() {
            self.align_uniform(seq1, seq2, direction, params, script)
        } else {
            self.align_affine(seq1, seq2, direction, params, script)
        }
    }

    /// Greedy alignment with uniform costs: every mismatch, insertion and
    /// deletion costs one unit of distance. Gap costs in `params` are
    /// ignored.
    ///
    /// Both sequences are read from index 0 in `direction`. When `script` is
    /// given, the alignment is appended to it in forward genomic order.
    pub fn align_uniform<A, B>(
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
        self.run_uniform(&seq1, &seq2, &costs, max_dist, direction, script)
    }

    /// Validate parameters and work out the normalized costs and distance cap.
    pub(crate) fn prepare(
        &self,
        params: &GreedyParams,
        len1: usize,
        len2: usize,
    ) -> Result<(NormalizedCosts, usize), AlignError> {
        params.validate()?;
        for len in [len1, len2] {
            if len > MAX_SEQUENCE_LEN {
                return Err(ConfigError::SequenceTooLong {
                    len,
                    max: MAX_SEQUENCE_LEN,
                }
                .into());
            }
        }
        let costs = NormalizedCosts::new(&params.scoring, params.xdrop)?;
        let max_dist = params.max_dist.unwrap_or(len1).max(1);

        // Diagonals outside -len2..=len1 are pruned on sight, so no row is
        // wider than this.
        let required = max_dist.saturating_mul(2).min(len1 + len2) + 3;
        if required > self.config.block_capacity {
            return Err(ConfigError::BlockCapacityTooSmall {
                required,
                capacity: self.config.block_capacity,
            }
            .into());
        }
        Ok((costs, max_dist))
    }

    pub(crate) fn run_uniform<A, B>(
        &mut self,
        seq1: &A,
        seq2: &B,
        costs: &NormalizedCosts,
        max_dist: usize,
        direction: Direction,
        script: Option<&mut EditScript>,
    ) -> Result<GreedyAlignment, AlignError>
    where
        A: SymbolSequence,
        B: SymbolSequence,
    {
        if seq1.is_empty() || seq2.is_empty() {
            self.history.clear();
            self.history.push(0);
            return Ok(GreedyAlignment::empty(costs.scale));
        }

        let retention = if script.is_some() {
            Retention::All
        } else {
            Retention::Window(2)
        };
        let (result, best) = self.search_uniform(seq1, seq2, costs, max_dist, retention)?;

        if let Some(script) = script {
            self.uniform_traceback(best, seq1.len() as i32, seq2.len() as i32)?;
            self.emit_script(direction, script);
        }
        Ok(result)
    }

    fn search_uniform<A, B>(
        &mut self,
        seq1: &A,
        seq2: &B,
        costs: &NormalizedCosts,
        max_dist: usize,
        retention: Retention,
    ) -> Result<(GreedyAlignment, BestPoint), AlignError>
    where
        A: SymbolSequence,
        B: SymbolSequence,
    {
        let len1 = seq1.len() as i32;
        let len2 = seq2.len() as i32;
        let match_cost = costs.match_cost;
        let half_match = costs.half_match();
        let op_cost = match_cost
            .checked_add(costs.mismatch_cost)
            .ok_or(ConfigError::CostOverflow)?;
        check_score_range(seq1.len() + seq2.len(), half_match, max_dist, op_cost)?;
        let xdrop = costs.xdrop;
        let xdrop_offset = (xdrop.saturating_add(half_match) / op_cost + 1) as usize;

        self.history.clear();
        self.offsets.begin(retention);

        let initial = count_matches(seq1, seq2, 0, 0) as i32;
        self.history.push(initial * match_cost);
        let mut result = GreedyAlignment::origin(initial, initial * match_cost, costs.scale);
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

        self.offsets
            .push_row(0, 0, 0)
            .map_err(|e| arena_failure(e, result))?;
        self.offsets.set(0, 0, initial);
        self.offsets.close_row(0, 0, 0);

        let mut diag_lower = -1i32;
        let mut diag_upper = 1i32;
        let mut end1_reached = false;
        let mut end2_reached = false;
        let mut converged = false;

        for d in 1..=max_dist {
            let prior = if d >= xdrop_offset {
                self.history[d - xdrop_offset]
            } else {
                0
            };
            let xdrop_score = ceil_div(prior + op_cost * d as i32 - xdrop, half_match);

            let (band_lower, band_upper) = (diag_lower, diag_upper);
            self.offsets
                .push_row(d, band_lower, band_upper)
                .map_err(|e| arena_failure(e, result))?;

            // (extent, diagonal, seq2) of the furthest cell at this distance
            let mut frontier: Option<(i32, i32, i32)> = None;

            for k in band_lower..=band_upper {
                let seq2_index = Predecessors::at(&self.offsets, d, k, len1, len2).best();
                let seq1_index = seq2_index + k;

                if seq2_index < 0 || seq1_index + seq2_index < xdrop_score {
                    if k == diag_lower {
                        diag_lower += 1;
                    }
                    continue;
                }
                diag_upper = k;

                let slide = count_matches(seq1, seq2, seq1_index as usize, seq2_index as usize) as i32;
                let seq1_index = seq1_index + slide;
                let seq2_index = seq2_index + slide;
                self.offsets.set(d, k, seq2_index);

                let extent = seq1_index + seq2_index;
                if frontier.map_or(true, |(best_extent, _, _)| extent > best_extent) {
                    frontier = Some((extent, k, seq2_index));
                }

                if seq2_index == len2 {
                    diag_lower = k + 1;
                    end2_reached = true;
                }
                if seq1_index == len1 {
                    diag_upper = k - 1;
                    end1_reached = true;
                }
            }
            self.offsets.close_row(d, diag_lower, diag_upper);

            // Ties move the endpoint forward
            let prev_best = self.history[d - 1];
            match frontier {
                Some((extent, k, seq2_index))
                    if extent * half_match - d as i32 * op_cost >= prev_best =>
                {
                    let score = extent * half_match - d as i32 * op_cost;
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

            if diag_lower > diag_upper {
                converged = true;
                break;
            }
            if !end2_reached {
                diag_lower -= 1;
            }
            if !end1_reached {
                diag_upper += 1;
            }
        }

        result.converged = converged;
        Ok((result, best))
    }

    /// Rebuild the edit script of `best` into `self.scratch`, end first.
    fn uniform_traceback(&mut self, best: BestPoint, len1: i32, len2: i32) -> Result<(), AlignError> {
        self.scratch.clear();
        let mut d = best.distance;
        let mut k = best.diag;
        let mut seq2_index = best.seq2;

        while d > 0 {
            let preds = Predecessors::at(&self.offsets, d, k, len1, len2);
            let start = preds.best();
            if start < 0 || start > seq2_index {
                return Err(AlignError::Traceback {
                    distance: d,
                    diagonal: k,
                });
            }
            self.scratch
                .append_run(EditOp::Substitution, (seq2_index - start) as usize);

            if preds.substitution == start {
                self.scratch.append_run(EditOp::Substitution, 1);
                seq2_index = start - 1;
            } else if preds.deletion == start {
                self.scratch.append_run(EditOp::Deletion, 1);
                seq2_index = start;
                k -= 1;
            } else {
                self.scratch.append_run(EditOp::Insertion, 1);
                seq2_index = start - 1;
                k += 1;
            }
            d -= 1;
        }

        if k != 0 || seq2_index < 0 {
            return Err(AlignError::Traceback {
                distance: 0,
                diagonal: k,
            });
        }
        self.scratch
            .append_run(EditOp::Substitution, seq2_index as usize);
        Ok(())
    }

    /// Append the scratch script to `script` in forward genomic order.
    ///
    /// Traceback runs from the end of the search back to its origin. Read
    /// forward, that is the reverse of genomic order; read in reverse, the
    /// end of the search is the genomic start and no flip is needed.
    pub(crate) fn emit_script(&mut self, direction: Direction, script: &mut EditScript) {
        if direction == Direction::Forward {
            self.scratch.reverse();
        }
        script.concat(&self.scratch);
    }
}
