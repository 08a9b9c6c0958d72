//! Run-length edit scripts.
//!
//! Matches and mismatches are folded into `Substitution` runs; the exact
//! match/mismatch split is recovered from the sequences by
//! [`AlignmentStats`](super::stats::AlignmentStats).

use std::fmt;
use std::str::FromStr;

/// One alignment column kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Consumes one symbol of each sequence (match or mismatch)
    Substitution,
    /// Consumes one symbol of seq2 only
    Insertion,
    /// Consumes one symbol of seq1 only
    Deletion,
}

impl EditOp {
    pub fn cigar_char(self) -> char {
        match self {
            EditOp::Substitution => 'M',
            EditOp::Insertion => 'I',
            EditOp::Deletion => 'D',
        }
    }

    pub fn from_cigar_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(EditOp::Substitution),
            'I' => Some(EditOp::Insertion),
            'D' => Some(EditOp::Deletion),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRun {
    pub op: EditOp,
    pub len: usize,
}

/// Ordered list of `(operation, run length)` pairs. Adjacent runs always
/// carry different operations and every run length is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    runs: Vec<EditRun>,
}

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `len` columns of `op`, merging with the last run when it has
    /// the same operation. `len == 0` leaves the script untouched.
    pub fn append_run(&mut self, op: EditOp, len: usize) {
        if len == 0 {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.op == op => last.len += len,
            _ => self.runs.push(EditRun { op, len }),
        }
    }

    /// Append every run of `other`, merging at the boundary.
    pub fn concat(&mut self, other: &EditScript) {
        for run in &other.runs {
            self.append_run(run.op, run.len);
        }
    }

    /// Reverse the order of the runs in place.
    pub fn reverse(&mut self) {
        self.runs.reverse();
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    #[inline]
    pub fn runs(&self) -> &[EditRun] {
        &self.runs
    }

    #[inline]
    pub fn num_runs(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Symbols of seq1 consumed (substitutions + deletions).
    pub fn seq1_len(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.op != EditOp::Insertion)
            .map(|r| r.len)
            .sum()
    }

    /// Symbols of seq2 consumed (substitutions + insertions).
    pub fn seq2_len(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.op != EditOp::Deletion)
            .map(|r| r.len)
            .sum()
    }

    /// Total number of alignment columns.
    pub fn columns(&self) -> usize {
        self.runs.iter().map(|r| r.len).sum()
    }
}

impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.runs.is_empty() {
            return write!(f, "*");
        }
        for run in &self.runs {
            write!(f, "{}{}", run.len, run.op.cigar_char())?;
        }
        Ok(())
    }
}

/// Error returned when parsing a CIGAR-like edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEditScriptError {
    pub text: String,
}

impl fmt::Display for ParseEditScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid edit script: {}", self.text)
    }
}

impl std::error::Error for ParseEditScriptError {}

impl FromStr for EditScript {
    type Err = ParseEditScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEditScriptError {
            text: s.to_string(),
        };
        let mut script = EditScript::new();
        if s == "*" {
            return Ok(script);
        }

        let mut len: Option<usize> = None;
        for c in s.chars() {
            if let Some(digit) = c.to_digit(10) {
                let current = len.unwrap_or(0);
                len = Some(
                    current
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit as usize))
                        .ok_or_else(err)?,
                );
            } else {
                let op = EditOp::from_cigar_char(c).ok_or_else(err)?;
                let n = len.take().ok_or_else(err)?;
                script.append_run(op, n);
            }
        }
        if len.is_some() || s.is_empty() {
            return Err(err());
        }
        Ok(script)
    }
}
