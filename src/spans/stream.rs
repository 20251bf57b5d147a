//! Position stream contract and in-memory implementations.

use std::fmt::Debug;

use crate::error::{NearSpanError, Result};
use crate::spans::interval::{DocId, PositionInterval};

/// A forward-only source of position intervals for one sub-query.
///
/// A stream starts unpositioned; the first call to [`next`](Self::next) or
/// [`skip_to`](Self::skip_to) moves it onto its first interval. Intervals
/// are produced in non-decreasing `(doc, start)` order. Once either method
/// returns `Ok(false)` the stream is spent and keeps returning `Ok(false)`.
pub trait PositionStream: Send + Debug {
    /// Document of the current interval, `None` when unpositioned or spent.
    fn doc_id(&self) -> Option<DocId>;

    /// The current interval, `None` when unpositioned or spent.
    fn interval(&self) -> Option<PositionInterval>;

    /// Move to the next interval, crossing into the next document if needed.
    fn next(&mut self) -> Result<bool>;

    /// Move to the first interval of the first document `>= target`.
    ///
    /// Does nothing when the stream is already positioned at or beyond
    /// `target`.
    fn skip_to(&mut self, target: DocId) -> Result<bool>;

    /// Estimated number of documents this stream visits.
    fn cost(&self) -> u64;
}

/// A stream that never produces an interval.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyPositionStream;

impl EmptyPositionStream {
    /// Create a new empty stream.
    pub fn new() -> Self {
        EmptyPositionStream
    }
}

impl PositionStream for EmptyPositionStream {
    fn doc_id(&self) -> Option<DocId> {
        None
    }

    fn interval(&self) -> Option<PositionInterval> {
        None
    }

    fn next(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn skip_to(&mut self, _target: DocId) -> Result<bool> {
        Ok(false)
    }

    fn cost(&self) -> u64 {
        0
    }
}

/// Where a [`VecPositionStream`] currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Unpositioned,
    At { doc: usize, interval: usize },
    Exhausted,
}

/// A position stream backed by in-memory interval lists.
#[derive(Debug, Clone)]
pub struct VecPositionStream {
    docs: Vec<(DocId, Vec<PositionInterval>)>,
    cursor: Cursor,
}

impl VecPositionStream {
    /// Create a stream from per-document interval lists.
    ///
    /// Documents must be strictly increasing, every list non-empty, and the
    /// intervals of a document sorted by `(start, end)`.
    pub fn new(docs: Vec<(DocId, Vec<PositionInterval>)>) -> Result<Self> {
        let mut previous_doc: Option<DocId> = None;
        for (doc, intervals) in &docs {
            if let Some(prev) = previous_doc
                && prev >= *doc
            {
                return Err(NearSpanError::invalid_query(format!(
                    "documents must be strictly increasing, found {doc} after {prev}"
                )));
            }
            if intervals.is_empty() {
                return Err(NearSpanError::invalid_query(format!(
                    "document {doc} has no intervals"
                )));
            }
            for interval in intervals {
                PositionInterval::try_new(interval.start, interval.end)?;
            }
            if intervals
                .windows(2)
                .any(|pair| (pair[0].start, pair[0].end) > (pair[1].start, pair[1].end))
            {
                return Err(NearSpanError::invalid_query(format!(
                    "intervals of document {doc} are not sorted"
                )));
            }
            previous_doc = Some(*doc);
        }

        Ok(VecPositionStream {
            docs,
            cursor: Cursor::Unpositioned,
        })
    }

    /// Create a stream of single-token intervals from token positions.
    pub fn from_positions(docs: Vec<(DocId, Vec<u32>)>) -> Result<Self> {
        let docs = docs
            .into_iter()
            .map(|(doc, mut positions)| -> Result<(DocId, Vec<PositionInterval>)> {
                positions.sort_unstable();
                positions.dedup();
                let intervals = positions
                    .into_iter()
                    .map(PositionInterval::try_at)
                    .collect::<Result<Vec<_>>>()?;
                Ok((doc, intervals))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(docs)
    }

    /// Create a stream from `(start, end)` pairs, validating every pair.
    pub fn from_pairs(docs: Vec<(DocId, Vec<(u32, u32)>)>) -> Result<Self> {
        let docs = docs
            .into_iter()
            .map(|(doc, pairs)| -> Result<(DocId, Vec<PositionInterval>)> {
                let intervals = pairs
                    .into_iter()
                    .map(|(start, end)| PositionInterval::try_new(start, end))
                    .collect::<Result<Vec<_>>>()?;
                Ok((doc, intervals))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(docs)
    }

    fn position_at_doc(&mut self, doc: usize) -> bool {
        if doc < self.docs.len() {
            self.cursor = Cursor::At { doc, interval: 0 };
            true
        } else {
            self.cursor = Cursor::Exhausted;
            false
        }
    }
}

impl PositionStream for VecPositionStream {
    fn doc_id(&self) -> Option<DocId> {
        match self.cursor {
            Cursor::At { doc, .. } => Some(self.docs[doc].0),
            _ => None,
        }
    }

    fn interval(&self) -> Option<PositionInterval> {
        match self.cursor {
            Cursor::At { doc, interval } => Some(self.docs[doc].1[interval]),
            _ => None,
        }
    }

    fn next(&mut self) -> Result<bool> {
        let advanced = match self.cursor {
            Cursor::Unpositioned => self.position_at_doc(0),
            Cursor::At { doc, interval } if interval + 1 < self.docs[doc].1.len() => {
                self.cursor = Cursor::At {
                    doc,
                    interval: interval + 1,
                };
                true
            }
            Cursor::At { doc, .. } => self.position_at_doc(doc + 1),
            Cursor::Exhausted => false,
        };
        Ok(advanced)
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        let from = match self.cursor {
            Cursor::Exhausted => return Ok(false),
            Cursor::At { doc, .. } if self.docs[doc].0 >= target => return Ok(true),
            Cursor::At { doc, .. } => doc + 1,
            Cursor::Unpositioned => 0,
        };
        let offset = self.docs[from..].partition_point(|(doc, _)| *doc < target);
        Ok(self.position_at_doc(from + offset))
    }

    fn cost(&self) -> u64 {
        self.docs.len() as u64
    }
}
