//! Query objects built on top of ordered near matching.

pub mod collector;
pub mod matcher;
pub mod span;

pub use self::collector::{Collector, CountCollector, DocMatches, MatchCollector};
pub use self::matcher::{EmptyMatcher, Matcher, SpanNearMatcher};
pub use self::span::{
    SpanNearQuery, SpanQuery, SpanQueryBuilder, SpanQueryWrapper, SpanTermQuery,
};
