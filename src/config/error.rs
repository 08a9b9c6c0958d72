use std::fmt;

/// Invalid scoring or aligner configuration, detected before any search work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NonPositiveReward(i32),
    NonNegativePenalty(i32),
    NegativeGapOpen(i32),
    NegativeGapExtend(i32),
    NegativeXDrop(i32),
    ZeroMaxDist,
    /// A normalized cost, or a score the search could reach, does not fit
    /// in `i32`.
    CostOverflow,
    SequenceTooLong { len: usize, max: usize },
    /// The widest diagonal band does not fit in one arena block.
    BlockCapacityTooSmall { required: usize, capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveReward(v) => write!(f, "reward must be positive, got {}", v),
            ConfigError::NonNegativePenalty(v) => {
                write!(f, "penalty must be negative, got {}", v)
            }
            ConfigError::NegativeGapOpen(v) => {
                write!(f, "gap open cost must be non-negative, got {}", v)
            }
            ConfigError::NegativeGapExtend(v) => {
                write!(f, "gap extend cost must be non-negative, got {}", v)
            }
            ConfigError::NegativeXDrop(v) => write!(f, "X-drop must be non-negative, got {}", v),
            ConfigError::ZeroMaxDist => write!(f, "maximum distance must be at least 1"),
            ConfigError::CostOverflow => {
                write!(f, "scores overflow i32 for these costs and sequence lengths")
            }
            ConfigError::SequenceTooLong { len, max } => {
                write!(f, "sequence length {} exceeds the supported maximum {}", len, max)
            }
            ConfigError::BlockCapacityTooSmall { required, capacity } => write!(
                f,
                "arena block capacity {} is too small, need {} elements per row",
                capacity, required
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
