//! Constants shared by the greedy aligners.

/// Sentinel for a reach table entry that no path reaches.
pub const INVALID_OFFSET: i32 = -2;

/// Sentinel for an empty diagonal range: empty bounds are stored as
/// `(INVALID_DIAG, -INVALID_DIAG)`.
pub const INVALID_DIAG: i32 = 100_000_000;

/// Upper limit for the initial distance cap of the adaptive driver.
pub const GREEDY_MAX_COST: usize = 1000;

/// The adaptive driver starts from `max(len1, len2) / GREEDY_MAX_COST_FRACTION + 1`.
pub const GREEDY_MAX_COST_FRACTION: usize = 2;

/// Default X-drop for greedy gapped extension (megablast default, in raw score units).
pub const X_DROP_GREEDY: i32 = 25;

/// Default number of elements in one arena block.
pub const DEFAULT_BLOCK_CAPACITY: usize = 1 << 20;

/// Longest sequence the aligners accept; offsets are tracked as `i32`
/// and `seq1 + seq2` extents must not overflow.
pub const MAX_SEQUENCE_LEN: usize = (i32::MAX / 4) as usize;
