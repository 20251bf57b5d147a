//! Cursor over the position stream of one near clause.

use crate::error::Result;
use crate::spans::interval::{DocId, PositionInterval};
use crate::spans::stream::PositionStream;

/// A stateful cursor wrapping one [`PositionStream`].
///
/// The matcher caches the stream's current document and interval and
/// becomes permanently exhausted the first time the stream runs dry.
#[derive(Debug)]
pub struct SubMatcher {
    stream: Box<dyn PositionStream>,
    current_doc: Option<DocId>,
    current_interval: Option<PositionInterval>,
    exhausted: bool,
}

impl SubMatcher {
    /// Wrap a stream. The matcher is unpositioned until first advanced.
    pub fn new(stream: Box<dyn PositionStream>) -> Self {
        SubMatcher {
            stream,
            current_doc: None,
            current_interval: None,
            exhausted: false,
        }
    }

    /// Move to the next interval, possibly in the next document.
    pub fn advance(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let more = self.stream.next()?;
        self.sync(more);
        Ok(more)
    }

    /// Move to the first interval of the first document `>= target`.
    pub fn skip_to(&mut self, target: DocId) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        if self.current_doc.is_some_and(|doc| doc >= target) {
            return Ok(true);
        }
        let more = self.stream.skip_to(target)?;
        self.sync(more);
        Ok(more)
    }

    fn sync(&mut self, more: bool) {
        if more {
            self.current_doc = self.stream.doc_id();
            self.current_interval = self.stream.interval();
        } else {
            self.current_doc = None;
            self.current_interval = None;
            self.exhausted = true;
        }
    }

    /// The current document, `None` before the first advance or once spent.
    pub fn doc(&self) -> Option<DocId> {
        self.current_doc
    }

    /// The current interval, `None` before the first advance or once spent.
    pub fn interval(&self) -> Option<PositionInterval> {
        self.current_interval
    }

    /// Whether the current interval lies in `doc`.
    pub fn is_in(&self, doc: DocId) -> bool {
        self.current_doc == Some(doc)
    }

    /// Whether the underlying stream is permanently spent.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Cost estimate of the wrapped stream.
    pub fn cost(&self) -> u64 {
        self.stream.cost()
    }
}
