//! The per-document working set of one interval per near clause.
//!
//! [`Alignment`] owns the sub-matchers of a near query and repairs their
//! positions in three steps, each usable on its own:
//!
//! 1. [`Alignment::align_docs`] moves every matcher onto one shared document.
//! 2. [`Alignment::enforce_order`] advances trailing matchers until the
//!    current intervals are strictly increasing in clause order.
//! 3. [`Alignment::minimize_slop`] pulls every earlier matcher as far right
//!    as possible while it still precedes its successor, which yields the
//!    minimal-slop arrangement ending at the last matcher's interval.

use log::trace;

use crate::error::{NearSpanError, Result};
use crate::spans::interval::{DocId, PositionInterval};
use crate::spans::stream::PositionStream;
use crate::spans::sub_matcher::SubMatcher;

/// Where the alignment stands relative to the document being worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Every matcher is still inside the document.
    InDocument,
    /// At least one matcher moved on to a later document.
    LeftDocument,
    /// At least one matcher is permanently spent.
    Exhausted,
}

/// A shrunk ordered alignment, before it is checked against the slop bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shrink {
    /// Document of the alignment.
    pub doc: DocId,
    /// Start of the first clause's chosen interval.
    pub start: u32,
    /// Largest end among the chosen intervals.
    pub end: u32,
    /// Total gap between consecutive chosen intervals.
    pub slop: u32,
    /// Where the matchers ended up after the walk.
    pub exit: Placement,
}

/// One sub-matcher per near clause, in clause order.
#[derive(Debug)]
pub struct Alignment {
    matchers: Box<[SubMatcher]>,
}

impl Alignment {
    /// Create an alignment over at least two sub-matchers.
    pub fn new(matchers: Vec<SubMatcher>) -> Result<Self> {
        if matchers.len() < 2 {
            return Err(NearSpanError::invalid_query(format!(
                "a near query needs at least 2 clauses, got {}",
                matchers.len()
            )));
        }
        Ok(Alignment {
            matchers: matchers.into_boxed_slice(),
        })
    }

    /// Create an alignment wrapping each stream in a [`SubMatcher`].
    pub fn from_streams(streams: Vec<Box<dyn PositionStream>>) -> Result<Self> {
        Self::new(streams.into_iter().map(SubMatcher::new).collect())
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Always false: an alignment holds at least two matchers.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// The sub-matchers in clause order.
    pub fn matchers(&self) -> &[SubMatcher] {
        &self.matchers
    }

    /// Whether any matcher is permanently spent.
    pub fn is_exhausted(&self) -> bool {
        self.matchers.iter().any(SubMatcher::is_exhausted)
    }

    /// Smallest stream cost; a match needs every clause present.
    pub fn cost(&self) -> u64 {
        self.matchers
            .iter()
            .map(SubMatcher::cost)
            .min()
            .unwrap_or(0)
    }

    fn interval_of(&self, index: usize) -> Result<PositionInterval> {
        self.matchers[index]
            .interval()
            .ok_or_else(|| NearSpanError::internal(format!("sub-matcher {index} is not positioned")))
    }

    /// Advance every matcher onto its first interval.
    pub fn seed(&mut self) -> Result<bool> {
        for matcher in self.matchers.iter_mut() {
            if !matcher.advance()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Skip every matcher lagging behind `target` to its first document
    /// `>= target`. Unpositioned matchers are positioned by the skip.
    pub fn skip_all_to(&mut self, target: DocId) -> Result<bool> {
        for matcher in self.matchers.iter_mut() {
            if !matcher.skip_to(target)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Bring every matcher to the same document.
    ///
    /// Each round skips all matchers to the largest current document; the
    /// loop ends when a round leaves them in agreement or a matcher runs
    /// dry. Returns the shared document, or `None` when no further document
    /// contains every clause.
    pub fn align_docs(&mut self) -> Result<Option<DocId>> {
        loop {
            let Some(target) = self
                .matchers
                .iter()
                .map(SubMatcher::doc)
                .try_fold(0, |max: DocId, doc| doc.map(|doc| max.max(doc)))
            else {
                return Ok(None);
            };

            let mut agreed = true;
            for matcher in self.matchers.iter_mut() {
                if matcher.is_in(target) {
                    continue;
                }
                if !matcher.skip_to(target)? {
                    trace!("alignment ran dry while skipping to doc {target}");
                    return Ok(None);
                }
                agreed &= matcher.is_in(target);
            }

            if agreed {
                trace!("aligned {} clauses on doc {target}", self.matchers.len());
                return Ok(Some(target));
            }
        }
    }

    /// Advance trailing matchers until each current interval precedes the
    /// next one. Every matcher must currently be in `doc`; `InDocument`
    /// means the alignment is ordered.
    pub fn enforce_order(&mut self, doc: DocId) -> Result<Placement> {
        for index in 1..self.matchers.len() {
            let previous = self.interval_of(index - 1)?;
            while !previous.precedes(&self.interval_of(index)?) {
                let matcher = &mut self.matchers[index];
                if !matcher.advance()? {
                    return Ok(Placement::Exhausted);
                }
                if !matcher.is_in(doc) {
                    return Ok(Placement::LeftDocument);
                }
            }
        }
        Ok(Placement::InDocument)
    }

    /// Shrink an ordered alignment to the minimal slop ending at the last
    /// matcher's interval.
    ///
    /// Walks from the second-to-last matcher down to the first, advancing
    /// each one while its next interval stays in `doc` and still precedes
    /// the interval chosen for its successor. Every earlier matcher is
    /// walked even after one runs dry or leaves the document, so the first
    /// matcher always ends up past the reported match.
    pub fn minimize_slop(&mut self, doc: DocId) -> Result<Shrink> {
        let last_index = self.matchers.len() - 1;
        let last = self.interval_of(last_index)?;
        let mut bound = last;
        let mut end = last.end;
        let mut slop: u32 = 0;
        let mut exit = Placement::InDocument;

        for index in (0..last_index).rev() {
            let mut chosen = self.interval_of(index)?;
            let matcher = &mut self.matchers[index];
            loop {
                if !matcher.advance()? {
                    exit = Placement::Exhausted;
                    break;
                }
                if !matcher.is_in(doc) {
                    if exit == Placement::InDocument {
                        exit = Placement::LeftDocument;
                    }
                    break;
                }
                match matcher.interval() {
                    Some(next) if next.precedes(&bound) => chosen = next,
                    _ => break,
                }
            }

            slop = slop.saturating_add(chosen.gap_before(bound.start));
            end = end.max(chosen.end);
            bound = chosen;
        }

        Ok(Shrink {
            doc,
            start: bound.start,
            end,
            slop,
            exit,
        })
    }

    /// Advance the last matcher past its current interval.
    pub fn advance_last(&mut self, doc: DocId) -> Result<Placement> {
        let last = self.matchers.len() - 1;
        let matcher = &mut self.matchers[last];
        if !matcher.advance()? {
            return Ok(Placement::Exhausted);
        }
        if matcher.is_in(doc) {
            Ok(Placement::InDocument)
        } else {
            Ok(Placement::LeftDocument)
        }
    }
}
