//! Collector implementations for gathering near matches.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::config::NearQueryConfig;
use crate::error::Result;
use crate::spans::{DocId, Match, NearSpansOrdered};

/// Trait for collecting near matches.
pub trait Collector: Send + Debug {
    /// Collect one match. Matches arrive in `(doc, start)` order.
    fn collect(&mut self, found: Match) -> Result<()>;

    /// Get the total number of matches collected.
    fn total_matches(&self) -> u64;

    /// Check if this collector needs more matches.
    fn needs_more(&self) -> bool;

    /// Reset the collector for a new search.
    fn reset(&mut self);

    /// Drain matches from the spans until they end or the collector is full.
    fn collect_all(&mut self, spans: &mut NearSpansOrdered) -> Result<()> {
        while self.needs_more() {
            match spans.next_match()? {
                Some(found) => self.collect(found)?,
                None => break,
            }
        }
        Ok(())
    }
}

/// The matches of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMatches {
    /// The document ID.
    pub doc: DocId,
    /// Kept matches, in start order.
    pub matches: Vec<Match>,
    /// Number of matches seen in the document, kept or not.
    pub total_matches: usize,
    /// Smallest slop among the document's matches.
    pub min_slop: u32,
}

/// A collector keeping matches grouped per document.
#[derive(Debug)]
pub struct MatchCollector {
    /// Maximum number of documents to collect.
    max_docs: Option<usize>,
    /// Maximum number of matches kept per document.
    max_matches_per_doc: Option<usize>,
    docs: Vec<DocMatches>,
    total_matches: u64,
    /// Set once a match for one document too many arrives.
    full: bool,
}

impl MatchCollector {
    /// Create a collector without limits.
    pub fn new() -> Self {
        Self::from_config(&NearQueryConfig::default())
    }

    /// Create a collector honouring the limits of a configuration.
    pub fn from_config(config: &NearQueryConfig) -> Self {
        MatchCollector {
            max_docs: config.max_docs,
            max_matches_per_doc: config.max_matches_per_doc,
            docs: Vec::new(),
            total_matches: 0,
            full: false,
        }
    }

    /// Get the collected documents.
    pub fn results(&self) -> &[DocMatches] {
        &self.docs
    }

    /// Take the collected documents.
    pub fn into_results(self) -> Vec<DocMatches> {
        self.docs
    }

    /// Number of documents collected.
    pub fn total_docs(&self) -> usize {
        self.docs.len()
    }
}

impl Default for MatchCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for MatchCollector {
    fn collect(&mut self, found: Match) -> Result<()> {
        if self.full {
            return Ok(());
        }

        let same_doc = self.docs.last().is_some_and(|last| last.doc == found.doc);
        if !same_doc {
            if self.max_docs.is_some_and(|max| self.docs.len() >= max) {
                self.full = true;
                return Ok(());
            }
            self.docs.push(DocMatches {
                doc: found.doc,
                matches: Vec::new(),
                total_matches: 0,
                min_slop: found.slop,
            });
        }

        self.total_matches += 1;
        if let Some(entry) = self.docs.last_mut() {
            entry.total_matches += 1;
            entry.min_slop = entry.min_slop.min(found.slop);
            if self
                .max_matches_per_doc
                .is_none_or(|max| entry.matches.len() < max)
            {
                entry.matches.push(found);
            }
        }
        Ok(())
    }

    fn total_matches(&self) -> u64 {
        self.total_matches
    }

    fn needs_more(&self) -> bool {
        !self.full
    }

    fn reset(&mut self) {
        self.docs.clear();
        self.total_matches = 0;
        self.full = false;
    }
}

/// A collector that only counts matches and matching documents.
#[derive(Debug, Default)]
pub struct CountCollector {
    total_matches: u64,
    total_docs: u64,
    last_doc: Option<DocId>,
}

impl CountCollector {
    /// Create a new count collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct documents seen.
    pub fn total_docs(&self) -> u64 {
        self.total_docs
    }
}

impl Collector for CountCollector {
    fn collect(&mut self, found: Match) -> Result<()> {
        self.total_matches += 1;
        if self.last_doc != Some(found.doc) {
            self.total_docs += 1;
            self.last_doc = Some(found.doc);
        }
        Ok(())
    }

    fn total_matches(&self) -> u64 {
        self.total_matches
    }

    fn needs_more(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
