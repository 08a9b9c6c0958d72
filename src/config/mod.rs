//! Scoring and aligner configuration

mod error;
mod scoring;

pub use error::ConfigError;
pub use scoring::{AlignerConfig, GreedyParams, ScoringSpec};
