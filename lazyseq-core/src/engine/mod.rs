//! Generator engines: turn a suspendable body into a cursor.
//!
//! A body emits values one at a time (`emit`) or delegates to a whole
//! sub-sequence (`emit_all`), amid ordinary control flow and possibly
//! forever. Two engines are provided:
//!
//! - **machine.rs** - the body is an explicit state machine implementing
//!   [`Body`]; its fields are the live variables, and each `resume` runs to
//!   the next emit point
//! - **coroutine.rs** - the body is an `async` block driven as a stackless
//!   coroutine (feature `coroutine`)
//!
//! Both guarantee that body code between two emit points runs exactly once,
//! exactly when a pull reaches it, and never ahead of demand. Creating a
//! cursor runs no body code at all.

#[cfg(feature = "coroutine")]
pub mod coroutine;
pub mod machine;

#[cfg(feature = "coroutine")]
pub use coroutine::{CoroutineCursor, Emitter};
pub use machine::{Body, MachineCursor, Step};

/// Observable phase of a generator cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Created, body not entered yet.
    NotStarted,
    /// Paused right after an emit.
    Suspended,
    /// Draining an `emit_all` sub-sequence.
    Delegating,
    /// Body finished or cursor closed.
    Completed,
    /// Body failed; further pulls fail.
    Poisoned,
}
