//! Cost normalization for the greedy searches.
//!
//! Scores are tracked in units of half a match, so the match reward must be
//! even. An odd reward doubles every cost and the X-drop (`scale == 2`);
//! reported scores stay in those doubled units.

use crate::config::{ConfigError, ScoringSpec};

/// GCD of two i32 values (absolute values).
pub(crate) fn gcd_i32(a: i32, b: i32) -> i32 {
    let mut a = a.abs();
    let mut b = b.abs();
    if b > a {
        std::mem::swap(&mut a, &mut b);
    }
    while b != 0 {
        let c = a % b;
        a = b;
        b = c;
    }
    a
}

/// Divide three integers by their GCD when it exceeds 1; returns the GCD.
/// A zero `b` is left out of the GCD.
pub fn gdb3(a: &mut i32, b: &mut i32, c: &mut i32) -> i32 {
    let g = if *b == 0 {
        gcd_i32(*a, *c)
    } else {
        gcd_i32(*a, gcd_i32(*b, *c))
    };
    if g > 1 {
        *a /= g;
        *b /= g;
        *c /= g;
    }
    g
}

/// Ceiling of `num / den` for a positive `den`.
#[inline]
pub(crate) fn ceil_div(num: i32, den: i32) -> i32 {
    let q = num / den;
    if num % den > 0 {
        q + 1
    } else {
        q
    }
}

/// Reject a search whose scores could leave `i32`. Scores never exceed
/// `extent * half_match`, and the penalty at distance `d` is `d * unit`.
pub(crate) fn check_score_range(
    extent: usize,
    half_match: i32,
    max_dist: usize,
    unit: i32,
) -> Result<(), ConfigError> {
    let reward = extent as i128 * half_match as i128;
    let penalty = max_dist as i128 * unit as i128;
    if reward + penalty > i32::MAX as i128 {
        Err(ConfigError::CostOverflow)
    } else {
        Ok(())
    }
}

/// Costs after making the match reward even. All values are positive
/// magnitudes except the gap costs, which may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedCosts {
    pub match_cost: i32,
    pub mismatch_cost: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
    pub xdrop: i32,
    /// 2 when the costs were doubled, else 1.
    pub scale: i32,
}

impl NormalizedCosts {
    pub fn new(scoring: &ScoringSpec, xdrop: i32) -> Result<Self, ConfigError> {
        let costs = Self {
            match_cost: scoring.reward,
            mismatch_cost: -scoring.penalty,
            gap_open: scoring.gap_open,
            gap_extend: scoring.gap_extend,
            xdrop,
            scale: 1,
        };
        if scoring.reward % 2 == 0 {
            return Ok(costs);
        }
        let double = |v: i32| v.checked_mul(2).ok_or(ConfigError::CostOverflow);
        Ok(Self {
            match_cost: double(costs.match_cost)?,
            mismatch_cost: double(costs.mismatch_cost)?,
            gap_open: double(costs.gap_open)?,
            gap_extend: double(costs.gap_extend)?,
            xdrop: double(costs.xdrop)?,
            scale: 2,
        })
    }

    #[inline]
    pub fn half_match(&self) -> i32 {
        self.match_cost / 2
    }

    /// Distance charged for a mismatch in the uniform search.
    #[inline]
    pub fn op_cost(&self) -> i32 {
        self.match_cost + self.mismatch_cost
    }

    /// Distance bookkeeping for the affine search.
    pub fn affine(&self) -> Result<AffineCosts, ConfigError> {
        let half_match = self.half_match();
        let mut op_cost = self
            .match_cost
            .checked_add(self.mismatch_cost)
            .ok_or(ConfigError::CostOverflow)?;
        let mut gap_open = self.gap_open;
        let mut gap_extend = self
            .gap_extend
            .checked_add(half_match)
            .ok_or(ConfigError::CostOverflow)?;
        let common_factor = gdb3(&mut op_cost, &mut gap_open, &mut gap_extend);
        let gap_open_extend = gap_open + gap_extend;
        Ok(AffineCosts {
            op_cost,
            gap_open,
            gap_extend,
            gap_open_extend,
            max_penalty: op_cost.max(gap_open_extend),
            common_factor,
            half_match,
            xdrop: self.xdrop,
        })
    }
}

/// Affine costs in distance units: every cost divided by `common_factor`,
/// and `gap_extend` already includes half a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffineCosts {
    pub op_cost: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
    pub gap_open_extend: i32,
    pub max_penalty: i32,
    pub common_factor: i32,
    pub half_match: i32,
    pub xdrop: i32,
}
