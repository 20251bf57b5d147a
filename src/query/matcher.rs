//! Document-level matchers for query execution.

use std::fmt::Debug;

use crate::error::Result;
use crate::spans::{DocId, Match, NearSpansOrdered, PositionStream};

/// Trait for document matchers.
pub trait Matcher: Send + Debug {
    /// Get the current document ID.
    fn doc_id(&self) -> u64;

    /// Move to the next matching document.
    fn next(&mut self) -> Result<bool>;

    /// Skip to the first document >= target.
    fn skip_to(&mut self, target: u64) -> Result<bool>;

    /// Get the cost of iterating through this matcher.
    fn cost(&self) -> u64;

    /// Check if this matcher is exhausted.
    fn is_exhausted(&self) -> bool;
}

/// A matcher that matches no documents.
#[derive(Debug)]
pub struct EmptyMatcher {
    exhausted: bool,
}

impl EmptyMatcher {
    /// Create a new empty matcher.
    pub fn new() -> Self {
        EmptyMatcher { exhausted: true }
    }
}

impl Default for EmptyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for EmptyMatcher {
    fn doc_id(&self) -> u64 {
        u64::MAX
    }

    fn next(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn skip_to(&mut self, _target: u64) -> Result<bool> {
        Ok(false)
    }

    fn cost(&self) -> u64 {
        0
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// A matcher over the documents containing an ordered near match.
///
/// The matcher is positioned on its first document when created and keeps
/// every match of the current document, so callers such as scorers and
/// highlighters can read them without touching the spans.
#[derive(Debug)]
pub struct SpanNearMatcher {
    spans: NearSpansOrdered,
    /// First match of the following document, read ahead.
    pending: Option<Match>,
    current_doc: u64,
    matches: Vec<Match>,
    exhausted: bool,
    cost: u64,
}

impl SpanNearMatcher {
    /// Create a new span near matcher, positioned on the first document.
    pub fn new(spans: NearSpansOrdered) -> Result<Self> {
        let cost = spans.cost();
        let mut matcher = SpanNearMatcher {
            spans,
            pending: None,
            current_doc: u64::MAX,
            matches: Vec::new(),
            exhausted: false,
            cost,
        };
        matcher.load_next_doc()?;
        Ok(matcher)
    }

    /// Matches of the current document, in start order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Number of matches in the current document.
    pub fn freq(&self) -> usize {
        self.matches.len()
    }

    /// Smallest slop among the current document's matches.
    pub fn min_slop(&self) -> Option<u32> {
        self.matches.iter().map(|found| found.slop).min()
    }

    fn load_next_doc(&mut self) -> Result<bool> {
        self.matches.clear();
        let first = match self.pending.take() {
            Some(found) => Some(found),
            None => self.spans.next_match()?,
        };
        let Some(first) = first else {
            self.exhausted = true;
            self.current_doc = u64::MAX;
            return Ok(false);
        };

        self.current_doc = first.doc as u64;
        self.matches.push(first);
        while let Some(found) = self.spans.next_match()? {
            if found.doc != first.doc {
                self.pending = Some(found);
                break;
            }
            self.matches.push(found);
        }
        Ok(true)
    }
}

impl Matcher for SpanNearMatcher {
    fn doc_id(&self) -> u64 {
        self.current_doc
    }

    fn next(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        self.load_next_doc()
    }

    fn skip_to(&mut self, target: u64) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        if self.current_doc >= target {
            return Ok(true);
        }
        let Ok(target) = DocId::try_from(target) else {
            self.exhausted = true;
            self.current_doc = u64::MAX;
            self.matches.clear();
            return Ok(false);
        };

        // No pending match means the spans ended while reading ahead.
        if self.pending.is_some_and(|found| found.doc < target) {
            self.pending = self.spans.skip_to_doc(target)?;
        }
        self.load_next_doc()
    }

    fn cost(&self) -> u64 {
        self.cost
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
