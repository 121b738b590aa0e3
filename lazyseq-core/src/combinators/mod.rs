//! Cursor-to-cursor transformation stages.
//!
//! Every stage owns its upstream cursor(s), pulls from them only when it is
//! pulled itself, and keeps a fixed amount of state: a counter, one buffered
//! predecessor, the current sub-cursor, or (for [`Chunked`]) one chunk of a
//! caller-chosen size. Stages that stop before upstream is exhausted close
//! upstream on the spot.

mod chain;
mod chunked;
mod filter;
mod flatten;
mod map;
mod take;
mod zip;

pub use chain::Chain;
pub use chunked::Chunked;
pub use filter::{Filter, TryFilter};
pub use flatten::Flatten;
pub use map::{Map, OnEach, TryMap, WithIndex};
pub use take::{Skip, SkipWhile, Take, TakeWhile};
pub use zip::{Zip, ZipWithNext};

pub(crate) use zip::{clone_pair, pair};
