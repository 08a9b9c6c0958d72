//! Block arena for the per-distance reach tables.
//!
//! The aligner allocates one row per distance while it searches and throws
//! all of them away at once before the next call. Rows live in a chain of
//! fixed-capacity blocks; a row never straddles two blocks. Callers get an
//! index handle ([`ArenaSpan`]) instead of a reference so the tables can keep
//! handles to many rows while still writing into the arena.
//!
//! `reset` only rewinds the fill counters, so the blocks allocated by a long
//! alignment are reused by every later call on the same aligner.

use std::fmt;

/// Handle to `len` contiguous elements inside one arena block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaSpan {
    block: usize,
    start: usize,
    len: usize,
}

impl ArenaSpan {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Arena allocation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// A single request exceeds the block capacity. This is a configuration
    /// problem; retrying with the same arena can never succeed.
    RequestTooLarge { requested: usize, capacity: usize },
    /// The system allocator refused a new block.
    OutOfMemory { requested: usize },
    /// The configured block limit was reached.
    BlockLimit { limit: usize },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::RequestTooLarge { requested, capacity } => write!(
                f,
                "arena request of {} elements exceeds block capacity {}",
                requested, capacity
            ),
            ArenaError::OutOfMemory { requested } => {
                write!(f, "failed to allocate arena block of {} elements", requested)
            }
            ArenaError::BlockLimit { limit } => {
                write!(f, "arena block limit of {} reached", limit)
            }
        }
    }
}

impl std::error::Error for ArenaError {}

struct Block<T> {
    data: Vec<T>,
    used: usize,
}

/// Chain of fixed-capacity blocks handing out [`ArenaSpan`]s.
pub struct Arena<T: Copy> {
    blocks: Vec<Block<T>>,
    current: usize,
    block_capacity: usize,
    max_blocks: Option<usize>,
}

impl<T: Copy> Arena<T> {
    /// Create an empty arena. No memory is allocated until the first request.
    pub fn with_block_capacity(block_capacity: usize) -> Self {
        Self {
            blocks: Vec::new(),
            current: 0,
            block_capacity: block_capacity.max(1),
            max_blocks: None,
        }
    }

    /// Cap the number of blocks the arena may create.
    pub fn with_block_limit(mut self, max_blocks: Option<usize>) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Number of blocks created so far (they survive `reset`).
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Elements handed out since the last reset.
    pub fn allocated(&self) -> usize {
        self.blocks.iter().map(|b| b.used).sum()
    }

    /// Hand out `len` elements, all set to `fill`.
    ///
    /// A request that does not fit in the rest of the current block moves on
    /// to the next block of the chain, creating it when needed.
    pub fn alloc(&mut self, len: usize, fill: T) -> Result<ArenaSpan, ArenaError> {
        if len > self.block_capacity {
            return Err(ArenaError::RequestTooLarge {
                requested: len,
                capacity: self.block_capacity,
            });
        }

        if self.current < self.blocks.len()
            && self.blocks[self.current].used + len > self.block_capacity
        {
            self.current += 1;
        }
        if self.current == self.blocks.len() {
            self.grow(fill)?;
        }

        let block = &mut self.blocks[self.current];
        let start = block.used;
        block.data[start..start + len].fill(fill);
        block.used += len;

        Ok(ArenaSpan {
            block: self.current,
            start,
            len,
        })
    }

    fn grow(&mut self, fill: T) -> Result<(), ArenaError> {
        if let Some(limit) = self.max_blocks {
            if self.blocks.len() >= limit {
                return Err(ArenaError::BlockLimit { limit });
            }
        }

        let mut data = Vec::new();
        data.try_reserve_exact(self.block_capacity)
            .map_err(|_| ArenaError::OutOfMemory {
                requested: self.block_capacity,
            })?;
        data.resize(self.block_capacity, fill);
        self.blocks.push(Block { data, used: 0 });
        Ok(())
    }

    #[inline]
    pub fn slice(&self, span: ArenaSpan) -> &[T] {
        &self.blocks[span.block].data[span.start..span.start + span.len]
    }

    #[inline]
    pub fn slice_mut(&mut self, span: ArenaSpan) -> &mut [T] {
        &mut self.blocks[span.block].data[span.start..span.start + span.len]
    }

    /// Mark every block empty. Memory stays with the arena; spans handed out
    /// before the reset must not be used afterwards.
    pub fn reset(&mut self) {
        for block in &mut self.blocks {
            block.used = 0;
        }
        self.current = 0;
    }
}
