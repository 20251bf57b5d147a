//! Ordered near matching across a whole collection.

use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spans::alignment::{Alignment, Placement};
use crate::spans::interval::{DocId, PositionInterval};
use crate::spans::stream::PositionStream;

/// An ordered occurrence of every clause within the allowed slop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    /// Document containing the occurrence.
    pub doc: DocId,
    /// Start of the first clause's interval.
    pub start: u32,
    /// Largest end among the matched intervals.
    pub end: u32,
    /// Total gap between consecutive matched intervals.
    pub slop: u32,
}

impl Match {
    /// The positions covered by this match.
    pub fn interval(&self) -> PositionInterval {
        PositionInterval::new(self.start, self.end)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "doc {} [{}, {}) slop {}",
            self.doc, self.start, self.end, self.slop
        )
    }
}

/// Where a [`NearSpansOrdered`] is in its matching cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanState {
    /// No matcher has been advanced yet.
    Unpositioned,
    /// Looking for the next document containing every clause.
    SeekingDoc,
    /// Repairing clause order inside the document.
    EnforcingOrder(DocId),
    /// Clauses are ordered; the alignment is ready to be shrunk.
    Ordered(DocId),
    /// A shrink stayed inside the document; the last clause moves on next.
    Resuming(DocId),
    /// A matcher is spent, or an error was returned.
    Done,
}

/// Lazily produces the ordered near matches of a set of position streams.
///
/// Matches come in ascending document order and, within a document, in
/// ascending start order. Each reported match carries the minimal slop of
/// any ordered placement ending at the last clause's interval. The iterator
/// is forward-only: build a fresh one to scan again.
#[derive(Debug)]
pub struct NearSpansOrdered {
    alignment: Alignment,
    allowed_slop: u32,
    state: SpanState,
    current: Option<Match>,
}

impl NearSpansOrdered {
    /// Create a matcher over at least two clause streams, in clause order.
    pub fn new(streams: Vec<Box<dyn PositionStream>>, allowed_slop: u32) -> Result<Self> {
        let alignment = Alignment::from_streams(streams)?;
        debug!(
            "ordered near matching over {} clauses, allowed slop {allowed_slop}",
            alignment.len()
        );
        Ok(NearSpansOrdered {
            alignment,
            allowed_slop,
            state: SpanState::Unpositioned,
            current: None,
        })
    }

    /// Maximum slop a reported match may have.
    pub fn allowed_slop(&self) -> u32 {
        self.allowed_slop
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.alignment.len()
    }

    /// Always false: a near query has at least two clauses.
    pub fn is_empty(&self) -> bool {
        self.alignment.is_empty()
    }

    /// Current position in the matching cycle.
    pub fn state(&self) -> SpanState {
        self.state
    }

    /// The most recently reported match.
    pub fn current(&self) -> Option<Match> {
        self.current
    }

    /// Find the next match, or `None` once any clause is spent.
    ///
    /// A stream error finishes the iterator and is returned unchanged.
    pub fn next_match(&mut self) -> Result<Option<Match>> {
        let found = self.advance();
        if found.is_err() {
            self.state = SpanState::Done;
        }
        self.current = found.as_ref().ok().copied().flatten();
        found
    }

    fn advance(&mut self) -> Result<Option<Match>> {
        loop {
            let next_state = match self.state {
                SpanState::Unpositioned => {
                    if self.alignment.seed()? {
                        SpanState::SeekingDoc
                    } else {
                        SpanState::Done
                    }
                }
                SpanState::SeekingDoc => match self.alignment.align_docs()? {
                    Some(doc) => SpanState::EnforcingOrder(doc),
                    None => SpanState::Done,
                },
                SpanState::EnforcingOrder(doc) => match self.alignment.enforce_order(doc)? {
                    Placement::InDocument => SpanState::Ordered(doc),
                    Placement::LeftDocument => SpanState::SeekingDoc,
                    Placement::Exhausted => SpanState::Done,
                },
                SpanState::Ordered(doc) => {
                    let shrink = self.alignment.minimize_slop(doc)?;
                    self.state = match shrink.exit {
                        Placement::InDocument => SpanState::Resuming(doc),
                        Placement::LeftDocument => SpanState::SeekingDoc,
                        Placement::Exhausted => SpanState::Done,
                    };
                    if shrink.slop <= self.allowed_slop {
                        let found = Match {
                            doc,
                            start: shrink.start,
                            end: shrink.end,
                            slop: shrink.slop,
                        };
                        trace!("near match {found}");
                        return Ok(Some(found));
                    }
                    trace!(
                        "rejected doc {doc} [{}, {}) with slop {} > {}",
                        shrink.start, shrink.end, shrink.slop, self.allowed_slop
                    );
                    continue;
                }
                SpanState::Resuming(doc) => match self.alignment.advance_last(doc)? {
                    Placement::InDocument => SpanState::EnforcingOrder(doc),
                    Placement::LeftDocument => SpanState::SeekingDoc,
                    Placement::Exhausted => SpanState::Done,
                },
                SpanState::Done => return Ok(None),
            };
            trace!("{:?} -> {next_state:?}", self.state);
            self.state = next_state;
        }
    }

    /// Skip to the first match in a document `>= target`.
    ///
    /// When the current match already lies at or beyond `target` nothing
    /// moves and the current match stays reported.
    pub fn skip_to_doc(&mut self, target: DocId) -> Result<Option<Match>> {
        if let Some(current) = self.current
            && current.doc >= target
        {
            return Ok(Some(current));
        }
        if self.state == SpanState::Done {
            self.current = None;
            return Ok(None);
        }

        let skipped = self.alignment.skip_all_to(target);
        match skipped {
            Ok(true) => {
                self.state = SpanState::SeekingDoc;
                self.next_match()
            }
            Ok(false) => {
                self.state = SpanState::Done;
                self.current = None;
                Ok(None)
            }
            Err(err) => {
                self.state = SpanState::Done;
                self.current = None;
                Err(err)
            }
        }
    }
}

impl Iterator for NearSpansOrdered {
    type Item = Result<Match>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_match().transpose()
    }
}

/// A near query is itself a stream of intervals, so it can be a clause of
/// an enclosing near query.
impl PositionStream for NearSpansOrdered {
    fn doc_id(&self) -> Option<DocId> {
        self.current.map(|found| found.doc)
    }

    fn interval(&self) -> Option<PositionInterval> {
        self.current.map(|found| found.interval())
    }

    fn next(&mut self) -> Result<bool> {
        Ok(self.next_match()?.is_some())
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        Ok(self.skip_to_doc(target)?.is_some())
    }

    fn cost(&self) -> u64 {
        self.alignment.cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NearSpanError;
    use crate::spans::stream::VecPositionStream;

    fn positions(docs: Vec<(DocId, Vec<u32>)>) -> Box<dyn PositionStream> {
        Box::new(VecPositionStream::from_positions(docs).unwrap())
    }

    fn collect(near: NearSpansOrdered) -> Vec<Match> {
        near.collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_requires_two_clauses() {
        let err = NearSpansOrdered::new(vec![positions(vec![(0, vec![0])])], 3).unwrap_err();
        assert!(matches!(err, NearSpanError::InvalidQuery(_)));
    }

    #[test]
    fn test_phrase_matches() {
        // "quick brown" in doc 1 and doc 4, only "quick" in doc 2.
        let quick = positions(vec![(1, vec![1, 7]), (2, vec![0]), (4, vec![3])]);
        let brown = positions(vec![(1, vec![2, 5]), (3, vec![0]), (4, vec![4])]);
        let near = NearSpansOrdered::new(vec![quick, brown], 0).unwrap();

        assert_eq!(
            collect(near),
            vec![
                Match { doc: 1, start: 1, end: 3, slop: 0 },
                Match { doc: 4, start: 3, end: 5, slop: 0 },
            ]
        );
    }

    #[test]
    fn test_state_transitions() {
        let a = positions(vec![(0, vec![0, 10])]);
        let b = positions(vec![(0, vec![1, 11])]);
        let mut near = NearSpansOrdered::new(vec![a, b], 0).unwrap();
        assert_eq!(near.state(), SpanState::Unpositioned);

        let first = near.next_match().unwrap().unwrap();
        assert_eq!((first.start, first.end), (0, 2));
        assert_eq!(near.state(), SpanState::Resuming(0));
        assert_eq!(near.current(), Some(first));

        let second = near.next_match().unwrap().unwrap();
        assert_eq!((second.start, second.end), (10, 12));
        assert_eq!(near.state(), SpanState::Done);

        assert_eq!(near.next_match().unwrap(), None);
        assert_eq!(near.current(), None);
    }

    #[test]
    fn test_skip_to_doc() {
        let a = positions(vec![(1, vec![0]), (5, vec![2]), (8, vec![0])]);
        let b = positions(vec![(1, vec![1]), (5, vec![3]), (8, vec![1])]);
        let mut near = NearSpansOrdered::new(vec![a, b], 0).unwrap();

        let found = near.skip_to_doc(4).unwrap().unwrap();
        assert_eq!(found.doc, 5);

        // Already there: the current match is kept.
        assert_eq!(near.skip_to_doc(5).unwrap(), Some(found));

        assert_eq!(near.skip_to_doc(8).unwrap().map(|m| m.doc), Some(8));
        assert_eq!(near.skip_to_doc(9).unwrap(), None);
        assert_eq!(near.state(), SpanState::Done);
    }

    #[test]
    fn test_nested_near_as_clause() {
        // ("new" "york") followed by "city" within one position.
        let new = positions(vec![(0, vec![0, 6])]);
        let york = positions(vec![(0, vec![1, 7])]);
        let city = positions(vec![(0, vec![3])]);

        let inner = NearSpansOrdered::new(vec![new, york], 0).unwrap();
        assert_eq!(inner.cost(), 1);
        let streams: Vec<Box<dyn PositionStream>> = vec![Box::new(inner), city];
        let outer = NearSpansOrdered::new(streams, 1).unwrap();

        assert_eq!(
            collect(outer),
            vec![Match { doc: 0, start: 0, end: 4, slop: 1 }]
        );
    }

    #[test]
    fn test_match_display() {
        let found = Match { doc: 3, start: 2, end: 6, slop: 1 };
        assert_eq!(found.to_string(), "doc 3 [2, 6) slop 1");
        assert_eq!(found.interval(), PositionInterval::new(2, 6));
    }
}
