//! Resolution of query terms to position streams.
//!
//! The matching engine never reads postings itself; it asks a
//! [`PositionIndex`] for one [`PositionStream`] per term clause.

pub mod memory;

pub use self::memory::MemoryPositionIndex;

use crate::error::Result;
use crate::spans::PositionStream;

/// Trait for readers able to produce term position streams.
pub trait PositionIndex: Send + Sync + std::fmt::Debug {
    /// Get the number of documents in the index.
    fn doc_count(&self) -> u64;

    /// Get the position stream of a term in a field.
    ///
    /// Unknown fields and terms yield a stream without intervals.
    fn positions(&self, field: &str, term: &str) -> Result<Box<dyn PositionStream>>;

    /// Get the number of documents containing a term in a field.
    fn term_doc_freq(&self, field: &str, term: &str) -> Result<u64> {
        Ok(self.positions(field, term)?.cost())
    }
}
