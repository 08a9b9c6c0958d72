use super::error::ConfigError;
use crate::core::constants::{DEFAULT_BLOCK_CAPACITY, X_DROP_GREEDY};

/// Scoring specification for nucleotide alignments.
///
/// `penalty` is stored negative (e.g. -2) and gap costs positive; a gap of
/// length n costs `gap_open + n * gap_extend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringSpec {
    pub reward: i32,
    pub penalty: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl Default for ScoringSpec {
    /// Megablast defaults
    fn default() -> Self {
        Self {
            reward: 1,
            penalty: -2,
            gap_open: 0,
            gap_extend: 0,
        }
    }
}

impl ScoringSpec {
    pub fn new(reward: i32, penalty: i32, gap_open: i32, gap_extend: i32) -> Self {
        Self {
            reward,
            penalty,
            gap_open,
            gap_extend,
        }
    }

    /// True when gaps carry no explicit cost, i.e. the uniform search applies.
    #[inline]
    pub fn is_gapless(&self) -> bool {
        self.gap_open == 0 && self.gap_extend == 0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reward <= 0 {
            return Err(ConfigError::NonPositiveReward(self.reward));
        }
        if self.penalty >= 0 {
            return Err(ConfigError::NonNegativePenalty(self.penalty));
        }
        if self.gap_open < 0 {
            return Err(ConfigError::NegativeGapOpen(self.gap_open));
        }
        if self.gap_extend < 0 {
            return Err(ConfigError::NegativeGapExtend(self.gap_extend));
        }
        Ok(())
    }
}

/// Per-call search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyParams {
    pub scoring: ScoringSpec,
    /// X-drop threshold in raw score units.
    pub xdrop: i32,
    /// Distance cap; `None` uses the length of seq1.
    pub max_dist: Option<usize>,
}

impl Default for GreedyParams {
    fn default() -> Self {
        Self {
            scoring: ScoringSpec::default(),
            xdrop: X_DROP_GREEDY,
            max_dist: None,
        }
    }
}

impl GreedyParams {
    pub fn new(scoring: ScoringSpec, xdrop: i32) -> Self {
        Self {
            scoring,
            xdrop,
            max_dist: None,
        }
    }

    pub fn with_max_dist(mut self, max_dist: usize) -> Self {
        self.max_dist = Some(max_dist);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        if self.xdrop < 0 {
            return Err(ConfigError::NegativeXDrop(self.xdrop));
        }
        if self.max_dist == Some(0) {
            return Err(ConfigError::ZeroMaxDist);
        }
        Ok(())
    }
}

/// Settings of a reusable aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignerConfig {
    /// Elements per arena block; bounds the widest diagonal band.
    pub block_capacity: usize,
    /// Optional cap on the number of arena blocks per table.
    pub max_blocks: Option<usize>,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            block_capacity: DEFAULT_BLOCK_CAPACITY,
            max_blocks: None,
        }
    }
}
