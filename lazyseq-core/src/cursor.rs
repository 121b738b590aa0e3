//! The cursor protocol: single-use, pull-driven producers of values.
//!
//! A cursor hands out one value per [`Cursor::pull`] until it reports
//! exhaustion with `Ok(None)`. Exhaustion is sticky: every later pull reports
//! it again without running any more code. A failed cursor is poisoned and
//! keeps failing.
//!
//! # Vertical evaluation
//!
//! ```text
//! Terminal            Combinators                 Source / Engine
//!    │                     │                            │
//!    │──pull()────────────▶│──pull()───────────────────▶│
//!    │                     │◀──Some(v)──────────────────│  (body runs to
//!    │◀──Some(f(v))────────│                            │   next emit)
//!    │──close()───────────▶│──close()──────────────────▶│  (early stop)
//! ```
//!
//! Adapters take the cursor by value and own it exclusively; a chain is
//! dropped as a whole.

use std::cell::RefCell;
use std::iter::FusedIterator;
use std::rc::Rc;

use log::debug;

use crate::combinators::{
    Chain, Chunked, Filter, Flatten, Map, OnEach, Skip, SkipWhile, Take, TakeWhile, TryFilter,
    TryMap, WithIndex, Zip, ZipWithNext,
};
use crate::error::{BoxError, Misuse, Pull, SeqResult};
use crate::grouping::Grouping;

/// Type-erased cursor, the shape handed out by [`crate::Sequence::cursor`].
pub type BoxCursor<T> = Box<dyn Cursor<Item = T>>;

/// Single-use, stateful producer of values.
pub trait Cursor {
    type Item;

    /// Produce the next value, `Ok(None)` on exhaustion.
    fn pull(&mut self) -> Pull<Self::Item>;

    /// Stop producing and release whatever is held upstream.
    ///
    /// Later pulls report exhaustion. Combinators forward the signal to
    /// every upstream cursor they own.
    fn close(&mut self) {}

    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U,
    {
        Map::new(self, f)
    }

    /// Like [`Cursor::map`] with a fallible transform; a failure is returned
    /// from the pull that triggered it.
    fn try_map<U, E, F>(self, f: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> Result<U, E>,
        E: Into<BoxError>,
    {
        TryMap::new(self, f)
    }

    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    fn try_filter<E, P>(self, predicate: P) -> TryFilter<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> Result<bool, E>,
        E: Into<BoxError>,
    {
        TryFilter::new(self, predicate)
    }

    /// Yield at most `n` values, then close upstream without pulling again.
    fn take(self, n: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, n)
    }

    /// Yield values while `predicate` holds. The first failing value is
    /// consumed and dropped, and upstream is closed.
    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        TakeWhile::new(self, predicate)
    }

    fn skip(self, n: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, n)
    }

    fn skip_while<P>(self, predicate: P) -> SkipWhile<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        SkipWhile::new(self, predicate)
    }

    /// Pair values from two cursors; stops when either side runs out.
    ///
    /// The left side is pulled first. A shorter left side leaves the rest of
    /// the right side unpulled; a shorter right side costs one extra pull of
    /// the left, whose value is dropped.
    fn zip<B>(self, other: B) -> Zip<Self, B, fn(Self::Item, B::Item) -> (Self::Item, B::Item)>
    where
        Self: Sized,
        B: Cursor,
    {
        let combine: fn(Self::Item, B::Item) -> (Self::Item, B::Item) = crate::combinators::pair;
        Zip::new(self, other, combine)
    }

    fn zip_with<B, U, F>(self, other: B, combine: F) -> Zip<Self, B, F>
    where
        Self: Sized,
        B: Cursor,
        F: FnMut(Self::Item, B::Item) -> U,
    {
        Zip::new(self, other, combine)
    }

    /// Pairs of adjacent values: `[a, b, c]` becomes `[(a, b), (b, c)]`.
    fn zip_with_next(
        self,
    ) -> ZipWithNext<Self, fn(&Self::Item, &Self::Item) -> (Self::Item, Self::Item)>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        let combine: fn(&Self::Item, &Self::Item) -> (Self::Item, Self::Item) =
            crate::combinators::clone_pair;
        ZipWithNext::new(self, combine)
    }

    fn zip_with_next_by<U, F>(self, combine: F) -> ZipWithNext<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item, &Self::Item) -> U,
    {
        ZipWithNext::new(self, combine)
    }

    fn flatten(self) -> Flatten<Self>
    where
        Self: Sized,
        Self::Item: IntoCursor,
    {
        Flatten::new(self)
    }

    fn flat_map<I, F>(self, f: F) -> Flatten<Map<Self, F>>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> I,
        I: IntoCursor,
    {
        Flatten::new(Map::new(self, f))
    }

    /// All of `self`, then all of `other`.
    fn chain<B>(self, other: B) -> Chain<Self, B>
    where
        Self: Sized,
        B: Cursor<Item = Self::Item>,
    {
        Chain::new(self, other)
    }

    /// Observe each value as it passes through.
    fn on_each<F>(self, f: F) -> OnEach<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item),
    {
        OnEach::new(self, f)
    }

    fn with_index(self) -> WithIndex<Self>
    where
        Self: Sized,
    {
        WithIndex::new(self)
    }

    /// Group values into vectors of `size`; the last chunk may be shorter.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    fn chunked(self, size: usize) -> Chunked<Self>
    where
        Self: Sized,
    {
        Chunked::new(self, size)
    }

    /// Lazy grouping; nothing is pulled until one of its terminals runs.
    fn grouping_by<K, F>(self, key: F) -> Grouping<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> K,
    {
        Grouping::new(self, key)
    }

    /// Share this cursor between several handles. Overlapping pulls fail
    /// with [`Misuse::Reentrant`].
    fn shared(self) -> SharedCursor<Self>
    where
        Self: Sized,
    {
        SharedCursor::new(self)
    }

    /// Adapt into a `std` iterator of `Result`s, fused after the first error.
    fn iter(self) -> CursorIter<Self>
    where
        Self: Sized,
    {
        CursorIter {
            cursor: self,
            done: false,
        }
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    #[inline]
    fn pull(&mut self) -> Pull<Self::Item> {
        (**self).pull()
    }

    #[inline]
    fn close(&mut self) {
        (**self).close()
    }
}

/// Anything that can be turned into a fresh cursor; the element source for
/// [`Cursor::flatten`] and [`Cursor::flat_map`].
pub trait IntoCursor {
    type Item;
    type IntoCursor: Cursor<Item = Self::Item>;

    fn into_cursor(self) -> Self::IntoCursor;
}

/// Per-stage exhaustion/poison latch.
///
/// Every combinator routes its pulls through [`Lifecycle::run`] so that
/// exhaustion and failure stick regardless of what upstream does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Lifecycle {
    #[default]
    Live,
    Exhausted,
    Poisoned,
}

impl Lifecycle {
    #[inline]
    pub(crate) fn run<T>(&mut self, pull: impl FnOnce() -> Pull<T>) -> Pull<T> {
        match *self {
            Lifecycle::Live => {}
            Lifecycle::Exhausted => return Ok(None),
            Lifecycle::Poisoned => return Err(Misuse::Poisoned.into()),
        }
        let result = pull();
        match &result {
            Ok(Some(_)) => {}
            Ok(None) => *self = Lifecycle::Exhausted,
            Err(err) => {
                debug!("stage poisoned: {}", err);
                *self = Lifecycle::Poisoned;
            }
        }
        result
    }

    /// Mark a live stage exhausted. A poisoned stage stays poisoned.
    #[inline]
    pub(crate) fn close(&mut self) {
        if *self == Lifecycle::Live {
            *self = Lifecycle::Exhausted;
        }
    }
}

/// Cloneable handle onto one cursor, guarded against re-entrant pulls.
///
/// All handles pull from the same underlying cursor; each value goes to
/// exactly one of them.
pub struct SharedCursor<C> {
    inner: Rc<RefCell<C>>,
}

impl<C> SharedCursor<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            inner: Rc::new(RefCell::new(cursor)),
        }
    }
}

impl<C> Clone for SharedCursor<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: Cursor> Cursor for SharedCursor<C> {
    type Item = C::Item;

    fn pull(&mut self) -> Pull<Self::Item> {
        let mut cursor = self.inner.try_borrow_mut().map_err(|_| Misuse::Reentrant)?;
        cursor.pull()
    }

    fn close(&mut self) {
        // A close issued from inside a running pull is dropped; the running
        // pull owns the cursor until it returns.
        if let Ok(mut cursor) = self.inner.try_borrow_mut() {
            cursor.close();
        }
    }
}

/// `std` iterator view of a cursor. See [`Cursor::iter`].
pub struct CursorIter<C> {
    cursor: C,
    done: bool,
}

impl<C: Cursor> Iterator for CursorIter<C> {
    type Item = SeqResult<C::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.pull() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<C: Cursor> FusedIterator for CursorIter<C> {}
