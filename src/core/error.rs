use std::fmt;

use super::arena::ArenaError;
use super::greedy_align::GreedyAlignment;
use crate::config::ConfigError;
use crate::sequence::SequenceError;

/// Failure of a greedy alignment call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    Config(ConfigError),
    Sequence(SequenceError),
    /// The arena could not supply a row. `partial` is the best endpoint found
    /// before the failure; no edit script was written.
    Arena {
        source: ArenaError,
        partial: GreedyAlignment,
    },
    /// Traceback found no predecessor for a stored reach.
    Traceback { distance: usize, diagonal: i32 },
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignError::Config(e) => write!(f, "invalid configuration: {}", e),
            AlignError::Sequence(e) => write!(f, "invalid sequence: {}", e),
            AlignError::Arena { source, partial } => write!(
                f,
                "{} (best endpoint so far: seq1 {}, seq2 {})",
                source, partial.seq1_end, partial.seq2_end
            ),
            AlignError::Traceback { distance, diagonal } => write!(
                f,
                "traceback lost the path at distance {} diagonal {}",
                distance, diagonal
            ),
        }
    }
}

impl std::error::Error for AlignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AlignError::Config(e) => Some(e),
            AlignError::Sequence(e) => Some(e),
            AlignError::Arena { source, .. } => Some(source),
            AlignError::Traceback { .. } => None,
        }
    }
}

impl From<ConfigError> for AlignError {
    fn from(e: ConfigError) -> Self {
        AlignError::Config(e)
    }
}

impl From<SequenceError> for AlignError {
    fn from(e: SequenceError) -> Self {
        AlignError::Sequence(e)
    }
}
