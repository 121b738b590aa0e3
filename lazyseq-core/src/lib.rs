//! lazyseq Core
//!
//! Lazy, restartable, possibly-infinite sequences with vertical evaluation:
//! each value travels through the whole pipeline before the next one is
//! produced, and no stage computes ahead of demand.
//!
//! # Architecture
//!
//! - **sequence.rs** - Restartable `Sequence<T>` recipes and their combinators
//! - **cursor.rs** - The `Cursor` pull protocol, shared handles, iterator view
//! - **source.rs** - Leaf cursors (containers, successors, external sources)
//! - **engine/** - Generator engines (state machine, async coroutine)
//! - **combinators/** - Cursor-to-cursor stages (map, filter, take, zip, ...)
//! - **terminal.rs** - Terminal operations that drive a cursor to a result
//! - **grouping.rs** - Lazy per-key aggregation
//! - **error.rs** - `SeqError`, `Misuse`
//!
//! Everything here is single-threaded: sequences and cursors are built on
//! `Rc` and are neither `Send` nor `Sync`.
//!
//! ```
//! use lazyseq_core::prelude::*;
//!
//! let squares = Sequence::successors(1u64, |n| Some(n + 1)).map(|n| n * n);
//! assert_eq!(squares.take(4).to_list().unwrap(), vec![1, 4, 9, 16]);
//! assert_eq!(squares.first_where(|n| *n > 50).unwrap(), 64);
//! ```

pub mod combinators;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod sequence;
pub mod source;
pub mod terminal;

pub use cursor::{BoxCursor, Cursor, CursorIter, IntoCursor, SharedCursor};
#[cfg(feature = "coroutine")]
pub use engine::{CoroutineCursor, Emitter};
pub use engine::{Body, GeneratorState, MachineCursor, Step};
pub use error::{BoxError, Misuse, Pull, SeqError, SeqResult};
pub use grouping::Grouping;
pub use sequence::Sequence;
pub use terminal::Terminal;

/// Glob-import for the common case.
pub mod prelude {
    pub use crate::cursor::{Cursor, IntoCursor};
    #[cfg(feature = "coroutine")]
    pub use crate::engine::Emitter;
    pub use crate::error::{SeqError, SeqResult};
    pub use crate::sequence::Sequence;
    pub use crate::terminal::Terminal;
}
