//! Position intervals and the document ordering between them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NearSpanError, Result};

/// Identifier of a document within the searched collection.
pub type DocId = u32;

/// A half-open `[start, end)` range of token positions within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionInterval {
    /// Start position (inclusive)
    pub start: u32,
    /// End position (exclusive)
    pub end: u32,
}

impl PositionInterval {
    /// Create a new interval.
    ///
    /// Callers must uphold `start < end`; use [`PositionInterval::try_new`]
    /// for untrusted input.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start < end, "empty interval [{start}, {end})");
        PositionInterval { start, end }
    }

    /// Create a new interval, rejecting empty or inverted ranges.
    pub fn try_new(start: u32, end: u32) -> Result<Self> {
        if start >= end {
            return Err(NearSpanError::invalid_query(format!(
                "interval [{start}, {end}) must have start < end"
            )));
        }
        Ok(PositionInterval { start, end })
    }

    /// The interval covering the single token at `position`.
    ///
    /// `position` must be below `u32::MAX`; use [`PositionInterval::try_at`]
    /// for untrusted input.
    pub fn at(position: u32) -> Self {
        PositionInterval::new(position, position + 1)
    }

    /// The interval covering the single token at `position`, rejecting the
    /// last representable position.
    pub fn try_at(position: u32) -> Result<Self> {
        let end = position.checked_add(1).ok_or_else(|| {
            NearSpanError::invalid_query(format!("position {position} has no following position"))
        })?;
        Ok(PositionInterval { start: position, end })
    }

    /// Get the length of this interval.
    pub fn length(&self) -> u32 {
        self.end - self.start
    }

    /// Whether this interval comes strictly before `other` in document order.
    ///
    /// Intervals sharing a start position are ordered by end position, so
    /// two identical intervals never precede each other.
    pub fn precedes(&self, other: &PositionInterval) -> bool {
        if self.start == other.start {
            self.end < other.end
        } else {
            self.start < other.start
        }
    }

    /// Check if this interval overlaps with another interval.
    pub fn overlaps(&self, other: &PositionInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this interval contains another interval.
    pub fn contains(&self, other: &PositionInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Number of uncovered positions between the end of this interval and
    /// the start of a following one. Overlapping intervals have no gap.
    pub fn gap_before(&self, next_start: u32) -> u32 {
        next_start.saturating_sub(self.end)
    }
}

impl fmt::Display for PositionInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
