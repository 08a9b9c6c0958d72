//! Per-distance reach tables backed by an [`Arena`].
//!
//! Row `d` holds one entry per diagonal of the band searched at distance `d`
//! together with the final diagonal bounds left after pruning. Reads outside
//! the written band, or of a distance no longer retained, return the
//! `unreached` value.

use super::arena::{Arena, ArenaError, ArenaSpan};
use super::constants::INVALID_DIAG;

/// Empty diagonal bounds.
pub const EMPTY_BOUNDS: (i32, i32) = (INVALID_DIAG, -INVALID_DIAG);

/// How many rows a search keeps readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Every row, needed for traceback.
    All,
    /// Only the last `n` distances; slots are reused cyclically.
    Window(usize),
}

#[derive(Debug, Clone, Copy)]
struct Row {
    span: ArenaSpan,
    distance: usize,
    first_diag: i32,
    len: usize,
    lower: i32,
    upper: i32,
}

pub struct DistanceTable<T: Copy> {
    arena: Arena<T>,
    rows: Vec<Row>,
    retention: Retention,
    unreached: T,
}

impl<T: Copy> DistanceTable<T> {
    pub fn new(block_capacity: usize, max_blocks: Option<usize>, unreached: T) -> Self {
        Self {
            arena: Arena::with_block_capacity(block_capacity).with_block_limit(max_blocks),
            rows: Vec::new(),
            retention: Retention::All,
            unreached,
        }
    }

    /// Drop every row and rewind the arena for a new search.
    pub fn begin(&mut self, retention: Retention) {
        self.arena.reset();
        self.rows.clear();
        self.retention = match retention {
            Retention::Window(n) => Retention::Window(n.max(1)),
            Retention::All => Retention::All,
        };
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.arena.block_count()
    }

    /// Open row `d` covering diagonals `lo..=hi` (empty when `hi < lo`),
    /// every entry unreached. Rows must be opened in increasing distance.
    pub fn push_row(&mut self, d: usize, lo: i32, hi: i32) -> Result<(), ArenaError> {
        let len = if hi >= lo { (hi - lo + 1) as usize } else { 0 };
        match self.retention {
            Retention::All => {
                debug_assert_eq!(self.rows.len(), d);
                let span = self.arena.alloc(len, self.unreached)?;
                self.rows.push(Row {
                    span,
                    distance: d,
                    first_diag: lo,
                    len,
                    lower: EMPTY_BOUNDS.0,
                    upper: EMPTY_BOUNDS.1,
                });
            }
            Retention::Window(n) => {
                let slot = d % n;
                let span = match self.rows.get(slot) {
                    Some(row) if row.span.len() >= len => {
                        let span = row.span;
                        self.arena.slice_mut(span)[..len].fill(self.unreached);
                        span
                    }
                    _ => self.arena.alloc(len, self.unreached)?,
                };
                let row = Row {
                    span,
                    distance: d,
                    first_diag: lo,
                    len,
                    lower: EMPTY_BOUNDS.0,
                    upper: EMPTY_BOUNDS.1,
                };
                if slot < self.rows.len() {
                    self.rows[slot] = row;
                } else {
                    self.rows.push(row);
                }
            }
        }
        Ok(())
    }

    fn row(&self, d: usize) -> Option<&Row> {
        let row = match self.retention {
            Retention::All => self.rows.get(d)?,
            Retention::Window(n) => self.rows.get(d % n)?,
        };
        (row.distance == d).then_some(row)
    }

    fn row_mut(&mut self, d: usize) -> Option<&mut Row> {
        let idx = match self.retention {
            Retention::All => d,
            Retention::Window(n) => d % n,
        };
        self.rows.get_mut(idx).filter(|row| row.distance == d)
    }

    /// Entry `(d, k)` if it lies in the band written for `d`.
    #[inline]
    pub fn get(&self, d: usize, k: i32) -> T {
        match self.row(d) {
            Some(row) if k >= row.first_diag && ((k - row.first_diag) as usize) < row.len => {
                self.arena.slice(row.span)[(k - row.first_diag) as usize]
            }
            _ => self.unreached,
        }
    }

    /// Entry `(d, k)` if `k` also lies inside the final bounds of `d`.
    #[inline]
    pub fn get_bounded(&self, d: usize, k: i32) -> T {
        match self.row(d) {
            Some(row) if k >= row.lower && k <= row.upper => self.get(d, k),
            _ => self.unreached,
        }
    }

    /// Write entry `(d, k)`; writes outside the band of `d` are ignored.
    #[inline]
    pub fn set(&mut self, d: usize, k: i32, value: T) {
        let Some(row) = self.row(d).copied() else {
            return;
        };
        if k >= row.first_diag && ((k - row.first_diag) as usize) < row.len {
            self.arena.slice_mut(row.span)[(k - row.first_diag) as usize] = value;
        }
    }

    /// Record the final diagonal bounds of row `d`.
    pub fn close_row(&mut self, d: usize, lower: i32, upper: i32) {
        if let Some(row) = self.row_mut(d) {
            if lower <= upper {
                row.lower = lower;
                row.upper = upper;
            } else {
                row.lower = EMPTY_BOUNDS.0;
                row.upper = EMPTY_BOUNDS.1;
            }
        }
    }

    /// Final bounds of row `d`; empty when `d` is not retained.
    pub fn bounds(&self, d: usize) -> (i32, i32) {
        self.row(d)
            .map_or(EMPTY_BOUNDS, |row| (row.lower, row.upper))
    }
}
