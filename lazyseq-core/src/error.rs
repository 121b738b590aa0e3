//! Error types for cursor pulls and terminal operations.
//!
//! Three kinds of failure reach a caller:
//! - `EmptySequence` from terminals that need at least one qualifying value
//! - `Body` for anything raised by user code (generator bodies, fallible
//!   predicates and transforms), carried through unmodified
//! - `Misuse` when a cursor is pulled in a way the protocol forbids

use std::error::Error;
use thiserror::Error;

/// Boxed user error carried by [`SeqError::Body`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Result of a single pull: a value, exhaustion (`Ok(None)`), or a failure.
pub type Pull<T> = Result<Option<T>, SeqError>;

/// Result type for terminal operations and generator bodies.
pub type SeqResult<T> = Result<T, SeqError>;

#[derive(Debug, Error)]
pub enum SeqError {
    /// A terminal that needs a value reached exhaustion first.
    #[error("sequence is empty")]
    EmptySequence,

    /// Failure raised by user code while producing or transforming a value.
    #[error(transparent)]
    Body(BoxError),

    /// The cursor protocol was violated.
    #[error("cursor misuse: {0}")]
    Misuse(#[from] Misuse),
}

/// Protocol violations detected at pull time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Misuse {
    /// A pull started while another pull on the same cursor was still running.
    #[error("cursor pulled while a pull on it is already in progress")]
    Reentrant,

    /// A pull on a cursor that already failed.
    #[error("cursor pulled after it failed")]
    Poisoned,
}

impl SeqError {
    /// Wrap a user error as a body failure.
    pub fn body<E: Into<BoxError>>(err: E) -> Self {
        SeqError::Body(err.into())
    }

    /// Borrow the original user error if it has type `E`.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            SeqError::Body(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty_sequence(&self) -> bool {
        matches!(self, SeqError::EmptySequence)
    }

    #[inline]
    pub fn misuse(&self) -> Option<Misuse> {
        match self {
            SeqError::Misuse(kind) => Some(*kind),
            _ => None,
        }
    }
}
