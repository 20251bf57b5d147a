//! # nearspan
//!
//! Ordered proximity ("span near") matching for full-text search.
//!
//! ## Features
//!
//! - Lazy, pull-based matching over abstract position streams
//! - Minimal-slop reporting for every ordered occurrence
//! - Nestable near queries
//! - Document-level matcher and match collectors
//! - In-memory position index for tests and tools

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod spans;

pub mod prelude {
    pub use crate::config::NearQueryConfig;
    pub use crate::error::{NearSpanError, Result};
    pub use crate::index::{MemoryPositionIndex, PositionIndex};
    pub use crate::query::{
        Collector, MatchCollector, Matcher, SpanNearQuery, SpanQuery, SpanQueryBuilder,
        SpanTermQuery,
    };
    pub use crate::spans::{
        DocId, Match, NearSpansOrdered, PositionInterval, PositionStream, VecPositionStream,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
