//! Span queries for positional and proximity-based searching.
//!
//! A span query turns into a [`PositionStream`] against a
//! [`PositionIndex`]. Term queries read a term's positions; near queries
//! combine their clauses with [`NearSpansOrdered`] and may themselves be
//! clauses of another near query.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::NearQueryConfig;
use crate::error::{NearSpanError, Result};
use crate::index::PositionIndex;
use crate::query::matcher::{EmptyMatcher, Matcher, SpanNearMatcher};
use crate::spans::{NearSpansOrdered, PositionStream};

/// Base trait for span queries.
pub trait SpanQuery: Send + Sync + std::fmt::Debug {
    /// Get the position stream of this query.
    fn spans(&self, index: &dyn PositionIndex) -> Result<Box<dyn PositionStream>>;

    /// Get the field name this span query operates on.
    fn field_name(&self) -> &str;

    /// Clone this span query.
    fn clone_box(&self) -> Box<dyn SpanQuery>;
}

impl Clone for Box<dyn SpanQuery> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A span query that matches a single term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanTermQuery {
    /// Field to search in
    field: String,
    /// Term to search for
    term: String,
    /// Boost factor
    boost: f32,
}

impl SpanTermQuery {
    /// Create a new span term query.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        SpanTermQuery {
            field: field.into(),
            term: term.into(),
            boost: 1.0,
        }
    }

    /// Set the boost factor.
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Get the boost factor.
    pub fn get_boost(&self) -> f32 {
        self.boost
    }
}

impl SpanQuery for SpanTermQuery {
    fn spans(&self, index: &dyn PositionIndex) -> Result<Box<dyn PositionStream>> {
        index.positions(&self.field, &self.term)
    }

    fn field_name(&self) -> &str {
        &self.field
    }

    fn clone_box(&self) -> Box<dyn SpanQuery> {
        Box::new(self.clone())
    }
}

/// A span query matching its clauses in order, within a slop.
#[derive(Debug, Clone)]
pub struct SpanNearQuery {
    /// Field to search in
    field: String,
    /// Clauses that must appear in this order
    clauses: Vec<Box<dyn SpanQuery>>,
    /// Maximum total gap between the clauses
    slop: u32,
    /// Boost factor
    boost: f32,
}

impl SpanNearQuery {
    /// Create a new span near query.
    pub fn new<F: Into<String>>(field: F, clauses: Vec<Box<dyn SpanQuery>>, slop: u32) -> Self {
        SpanNearQuery {
            field: field.into(),
            clauses,
            slop,
            boost: 1.0,
        }
    }

    /// Set the boost factor.
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Replace the slop with the one of a configuration.
    pub fn with_config(mut self, config: &NearQueryConfig) -> Self {
        self.slop = config.allowed_slop;
        self
    }

    /// Get the slop (maximum total gap).
    pub fn slop(&self) -> u32 {
        self.slop
    }

    /// Get the boost factor.
    pub fn get_boost(&self) -> f32 {
        self.boost
    }

    /// Get the clauses.
    pub fn clauses(&self) -> &[Box<dyn SpanQuery>] {
        &self.clauses
    }

    /// Check that the query can be evaluated.
    pub fn validate(&self) -> Result<()> {
        if self.clauses.len() < 2 {
            return Err(NearSpanError::invalid_query(format!(
                "span near query needs at least 2 clauses, got {}",
                self.clauses.len()
            )));
        }
        if let Some(clause) = self
            .clauses
            .iter()
            .find(|clause| clause.field_name() != self.field)
        {
            return Err(NearSpanError::invalid_query(format!(
                "clause on field '{}' in span near query on field '{}'",
                clause.field_name(),
                self.field
            )));
        }
        Ok(())
    }

    /// Build the ordered near matcher of this query.
    pub fn near_spans(&self, index: &dyn PositionIndex) -> Result<NearSpansOrdered> {
        self.validate()?;
        let streams = self
            .clauses
            .iter()
            .map(|clause| clause.spans(index))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "span near query on '{}' with {} clauses, slop {}",
            self.field,
            streams.len(),
            self.slop
        );
        NearSpansOrdered::new(streams, self.slop)
    }
}

impl SpanQuery for SpanNearQuery {
    fn spans(&self, index: &dyn PositionIndex) -> Result<Box<dyn PositionStream>> {
        Ok(Box::new(self.near_spans(index)?))
    }

    fn field_name(&self) -> &str {
        &self.field
    }

    fn clone_box(&self) -> Box<dyn SpanQuery> {
        Box::new(self.clone())
    }
}

/// Adapts a [`SpanNearQuery`] to document-level matching.
#[derive(Debug, Clone)]
pub struct SpanQueryWrapper {
    /// The underlying span query
    span_query: SpanNearQuery,
    /// Boost factor
    boost: f32,
}

impl SpanQueryWrapper {
    /// Create a new span query wrapper.
    pub fn new(span_query: SpanNearQuery) -> Self {
        SpanQueryWrapper {
            span_query,
            boost: 1.0,
        }
    }

    /// Set the boost factor.
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the boost factor.
    pub fn get_boost(&self) -> f32 {
        self.boost
    }

    /// Get the underlying span query.
    pub fn span_query(&self) -> &SpanNearQuery {
        &self.span_query
    }

    /// Create a document matcher over the index.
    pub fn matcher(&self, index: &dyn PositionIndex) -> Result<Box<dyn Matcher>> {
        let spans = self.span_query.near_spans(index)?;
        if spans.cost() == 0 {
            return Ok(Box::new(EmptyMatcher::new()));
        }
        Ok(Box::new(SpanNearMatcher::new(spans)?))
    }

    /// Upper bound on the number of documents the matcher visits.
    pub fn cost(&self, index: &dyn PositionIndex) -> Result<u64> {
        Ok(self.span_query.near_spans(index)?.cost())
    }

    /// Human-readable description of the query.
    pub fn description(&self) -> String {
        format!(
            "SpanNear({}, {} clauses, slop={})",
            self.span_query.field_name(),
            self.span_query.clauses().len(),
            self.span_query.slop()
        )
    }
}

/// Builder for creating span queries on one field.
#[derive(Debug)]
pub struct SpanQueryBuilder {
    field: String,
}

impl SpanQueryBuilder {
    /// Create a new span query builder.
    pub fn new<F: Into<String>>(field: F) -> Self {
        SpanQueryBuilder {
            field: field.into(),
        }
    }

    /// Create a span term query.
    pub fn term<T: Into<String>>(&self, term: T) -> SpanTermQuery {
        SpanTermQuery::new(&self.field, term)
    }

    /// Create a span near query.
    pub fn near(&self, clauses: Vec<Box<dyn SpanQuery>>, slop: u32) -> SpanNearQuery {
        SpanNearQuery::new(&self.field, clauses, slop)
    }

    /// Create an ordered proximity query over terms.
    pub fn proximity<T: Into<String>>(&self, terms: Vec<T>, slop: u32) -> SpanNearQuery {
        let clauses: Vec<Box<dyn SpanQuery>> = terms
            .into_iter()
            .map(|term| Box::new(self.term(term)) as Box<dyn SpanQuery>)
            .collect();

        self.near(clauses, slop)
    }

    /// Create a phrase query using span near with zero slop.
    pub fn phrase<T: Into<String>>(&self, terms: Vec<T>) -> SpanNearQuery {
        self.proximity(terms, 0)
    }
}
