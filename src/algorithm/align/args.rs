use clap::Args;
use std::path::PathBuf;

use crate::config::{AlignerConfig, GreedyParams, ScoringSpec};
use crate::core::constants::{DEFAULT_BLOCK_CAPACITY, X_DROP_GREEDY};

#[derive(Args, Debug)]
pub struct AlignArgs {
    #[arg(short, long)]
    pub query: PathBuf,
    #[arg(short, long)]
    pub subject: PathBuf,
    // Scoring parameters - defaults are the megablast ones
    #[arg(long, default_value_t = 1)]
    pub reward: i32,
    #[arg(long, default_value_t = -2, allow_hyphen_values = true)]
    pub penalty: i32,
    #[arg(long, default_value_t = 0)]
    pub gap_open: i32,
    #[arg(long, default_value_t = 0)]
    pub gap_extend: i32,
    /// X-drop threshold in raw score units
    #[arg(long, default_value_t = X_DROP_GREEDY)]
    pub xdrop: i32,
    /// Distance cap per side (default: length of the query side)
    #[arg(long)]
    pub max_dist: Option<usize>,
    /// Seed position in each query (0-based)
    #[arg(long, default_value_t = 0)]
    pub seed_q: usize,
    /// Seed position in each subject (0-based)
    #[arg(long, default_value_t = 0)]
    pub seed_s: usize,
    /// Store subjects 2-bit packed (ambiguous bases lose their identity)
    #[arg(long, default_value_t = false)]
    pub packed: bool,
    /// Grow the distance cap until the search converges
    #[arg(long, default_value_t = false)]
    pub adaptive: bool,
    /// Arena block size in elements per table
    #[arg(long, default_value_t = DEFAULT_BLOCK_CAPACITY)]
    pub block_capacity: usize,
    #[arg(short = 'n', long, default_value_t = 0)]
    pub num_threads: usize,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

impl AlignArgs {
    pub fn scoring(&self) -> ScoringSpec {
        ScoringSpec::new(self.reward, self.penalty, self.gap_open, self.gap_extend)
    }

    pub fn params(&self) -> GreedyParams {
        let params = GreedyParams::new(self.scoring(), self.xdrop);
        match self.max_dist {
            Some(max_dist) => params.with_max_dist(max_dist),
            None => params,
        }
    }

    /// Whether the seed positions lie inside (or at the end of) both sequences.
    pub fn seed_fits(&self, query_len: usize, subject_len: usize) -> bool {
        self.seed_q <= query_len && self.seed_s <= subject_len
    }

    /// Aligner configuration wide enough for the longest pair.
    pub fn aligner_config(&self, longest_pair: usize) -> AlignerConfig {
        AlignerConfig {
            block_capacity: self.block_capacity.max(longest_pair + 3),
            ..AlignerConfig::default()
        }
    }
}
