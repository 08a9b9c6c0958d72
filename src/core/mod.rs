//! Greedy alignment core
//!
//! Reference: ncbi-blast/c++/src/algo/blast/core/greedy_align.c
//!
//! # Structure
//!
//! - **Memory** (`arena`, `distance_table`)
//!   - Block arena that survives between calls
//!   - Per-distance rows of diagonal reaches
//!
//! - **Alignment** (`greedy_align`, `affine_greedy`, `costs`)
//!   - Uniform-cost and affine-gap greedy searches
//!   - Cost normalization
//!
//! - **Results** (`edit_script`, `stats`, `extend`)
//!   - Run-length edit scripts
//!   - Column statistics
//!   - Adaptive and seed-centered drivers

pub mod affine_greedy;
pub mod arena;
pub mod constants;
pub mod costs;
pub mod distance_table;
pub mod edit_script;
pub mod error;
pub mod extend;
pub mod greedy_align;
pub mod stats;

pub use affine_greedy::GreedyOffset;
pub use edit_script::{EditOp, EditRun, EditScript, ParseEditScriptError};
pub use error::AlignError;
pub use extend::GappedExtension;
pub use greedy_align::{GreedyAligner, GreedyAlignment};
pub use stats::AlignmentStats;
