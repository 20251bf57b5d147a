//! Ordered proximity matching over position streams.
//!
//! A near query is evaluated by pulling intervals from one
//! [`PositionStream`] per clause. [`NearSpansOrdered`] drives the whole
//! process: it aligns every stream on a shared document, repairs the order
//! of the current intervals, and then shrinks the alignment to the
//! minimal-slop arrangement ending at the last clause's interval.
//!
//! ```
//! use nearspan::spans::{NearSpansOrdered, PositionStream, VecPositionStream};
//!
//! let quick = VecPositionStream::from_positions(vec![(3, vec![0, 6])]).unwrap();
//! let fox = VecPositionStream::from_positions(vec![(3, vec![2])]).unwrap();
//! let streams: Vec<Box<dyn PositionStream>> = vec![Box::new(quick), Box::new(fox)];
//!
//! let matches: Vec<_> = NearSpansOrdered::new(streams, 1)
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!((matches[0].start, matches[0].end, matches[0].slop), (0, 3, 1));
//! ```

pub mod alignment;
pub mod interval;
pub mod near;
pub mod stream;
pub mod sub_matcher;

pub use self::alignment::{Alignment, Placement, Shrink};
pub use self::interval::{DocId, PositionInterval};
pub use self::near::{Match, NearSpansOrdered, SpanState};
pub use self::stream::{EmptyPositionStream, PositionStream, VecPositionStream};
pub use self::sub_matcher::SubMatcher;
