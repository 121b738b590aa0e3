//! Restartable sequence descriptors.
//!
//! A [`Sequence`] owns nothing mutable: it is a recipe for cursors. Every
//! [`Sequence::cursor`] call builds an independent cursor from scratch, so
//! restarting means recomputing. No produced value is cached between cursors.
//!
//! Sequence-level combinators wrap the recipe rather than a cursor, so
//! `seq.map(f)` is itself restartable. Closures passed to them are shared by
//! every cursor of the result and therefore must be `Fn`.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::cursor::{BoxCursor, Cursor, CursorIter, IntoCursor};
use crate::engine::{Body, MachineCursor};
use crate::error::{BoxError, Pull, SeqResult};
use crate::source::{Empty, FnCursor, IterCursor, SliceCursor, Successors};
use crate::terminal::Terminal;

#[cfg(feature = "coroutine")]
use crate::engine::coroutine::{BodyFuture, CoroutineCursor, Emitter, Producer};
#[cfg(feature = "coroutine")]
use std::future::Future;

/// Immutable, restartable recipe for cursors over `T`.
pub struct Sequence<T> {
    make: Rc<dyn Fn() -> BoxCursor<T>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            make: Rc::clone(&self.make),
        }
    }
}

impl<T> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").finish_non_exhaustive()
    }
}

impl<T> Sequence<T> {
    /// A fresh cursor positioned before the first value. Runs no producer
    /// code beyond building the cursor.
    pub fn cursor(&self) -> BoxCursor<T> {
        (self.make)()
    }

    /// A fresh cursor as a `std` iterator.
    pub fn iter(&self) -> CursorIter<BoxCursor<T>> {
        self.cursor().iter()
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<T: 'static> Sequence<T> {
    /// Any cursor factory; called once per [`Sequence::cursor`].
    pub fn new<C, F>(factory: F) -> Self
    where
        F: Fn() -> C + 'static,
        C: Cursor<Item = T> + 'static,
    {
        Self { make: Rc::new(move || -> BoxCursor<T> { Box::new(factory()) }) }
    }

    /// Values cloned out of an eager container, in order.
    pub fn of(values: Vec<T>) -> Self
    where
        T: Clone,
    {
        let items: Rc<[T]> = values.into();
        Self::new(move || SliceCursor::new(Rc::clone(&items)))
    }

    /// Every value of a cloneable iterable (ranges, small collections).
    /// Each cursor walks its own clone.
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + 'static,
        I::IntoIter: 'static,
    {
        Self::new(move || IterCursor::new(iterable.clone().into_iter()))
    }

    pub fn empty() -> Self {
        Self::new(Empty::new)
    }

    /// `seed`, then `next(seed)`, then `next(next(seed))`, until `next`
    /// returns `None`. A successor is computed only when it is pulled.
    pub fn successors<F>(seed: T, next: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> Option<T> + 'static,
    {
        let next = Rc::new(next);
        Self::new(move || {
            let next = Rc::clone(&next);
            Successors::new(seed.clone(), move |value: &T| next(value))
        })
    }

    /// External data source: `factory` opens the source and returns its
    /// "next value or exhaustion" function. Called once per cursor.
    pub fn from_source<F, G>(factory: F) -> Self
    where
        F: Fn() -> G + 'static,
        G: FnMut() -> Pull<T> + 'static,
    {
        Self::new(move || FnCursor::new(factory()))
    }

    /// Generator written as an explicit state machine; `factory` builds the
    /// body in its initial state for each cursor.
    pub fn machine<B, F>(factory: F) -> Self
    where
        F: Fn() -> B + 'static,
        B: Body<Item = T> + 'static,
    {
        Self::new(move || MachineCursor::new(factory()))
    }

    /// Generator written as an `async` body. See [`crate::engine::coroutine`].
    #[cfg(feature = "coroutine")]
    pub fn generator<F, Fut>(body: F) -> Self
    where
        F: Fn(Emitter<T>) -> Fut + 'static,
        Fut: Future<Output = SeqResult<()>> + 'static,
    {
        let producer: Producer<T> =
            Rc::new(move |emitter| -> BodyFuture { Box::pin(body(emitter)) });
        Self::new(move || CoroutineCursor::new(Rc::clone(&producer)))
    }
}

// ============================================================================
// Combinators
// ============================================================================

impl<T: 'static> Sequence<T> {
    fn pipe<U, C, S>(&self, stage: S) -> Sequence<U>
    where
        U: 'static,
        C: Cursor<Item = U> + 'static,
        S: Fn(BoxCursor<T>) -> C + 'static,
    {
        let make = Rc::clone(&self.make);
        Sequence::new(move || stage(make()))
    }

    pub fn map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let f = Rc::new(f);
        self.pipe(move |cursor| {
            let f = Rc::clone(&f);
            cursor.map(move |value| f(value))
        })
    }

    pub fn try_map<U, E, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        E: Into<BoxError> + 'static,
        F: Fn(T) -> Result<U, E> + 'static,
    {
        let f = Rc::new(f);
        self.pipe(move |cursor| {
            let f = Rc::clone(&f);
            cursor.try_map(move |value| f(value))
        })
    }

    pub fn filter<P>(&self, predicate: P) -> Sequence<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.pipe(move |cursor| {
            let predicate = Rc::clone(&predicate);
            cursor.filter(move |value| predicate(value))
        })
    }

    pub fn try_filter<E, P>(&self, predicate: P) -> Sequence<T>
    where
        E: Into<BoxError> + 'static,
        P: Fn(&T) -> Result<bool, E> + 'static,
    {
        let predicate = Rc::new(predicate);
        self.pipe(move |cursor| {
            let predicate = Rc::clone(&predicate);
            cursor.try_filter(move |value| predicate(value))
        })
    }

    pub fn take(&self, n: usize) -> Sequence<T> {
        self.pipe(move |cursor| cursor.take(n))
    }

    pub fn take_while<P>(&self, predicate: P) -> Sequence<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.pipe(move |cursor| {
            let predicate = Rc::clone(&predicate);
            cursor.take_while(move |value| predicate(value))
        })
    }

    pub fn skip(&self, n: usize) -> Sequence<T> {
        self.pipe(move |cursor| cursor.skip(n))
    }

    pub fn skip_while<P>(&self, predicate: P) -> Sequence<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.pipe(move |cursor| {
            let predicate = Rc::clone(&predicate);
            cursor.skip_while(move |value| predicate(value))
        })
    }

    /// Pairs values in lockstep. The left side (`self`) is pulled first, so
    /// put the shorter side on the left when the longer one is costly to pull.
    pub fn zip<B: 'static>(&self, other: &Sequence<B>) -> Sequence<(T, B)> {
        let other = other.clone();
        self.pipe(move |cursor| cursor.zip(other.cursor()))
    }

    pub fn zip_with<B, U, F>(&self, other: &Sequence<B>, combine: F) -> Sequence<U>
    where
        B: 'static,
        U: 'static,
        F: Fn(T, B) -> U + 'static,
    {
        let other = other.clone();
        let combine = Rc::new(combine);
        self.pipe(move |cursor| {
            let combine = Rc::clone(&combine);
            cursor.zip_with(other.cursor(), move |a, b| combine(a, b))
        })
    }

    pub fn zip_with_next(&self) -> Sequence<(T, T)>
    where
        T: Clone,
    {
        self.pipe(|cursor| cursor.zip_with_next())
    }

    pub fn zip_with_next_by<U, F>(&self, combine: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(&T, &T) -> U + 'static,
    {
        let combine = Rc::new(combine);
        self.pipe(move |cursor| {
            let combine = Rc::clone(&combine);
            cursor.zip_with_next_by(move |a, b| combine(a, b))
        })
    }

    pub fn flat_map<I, F>(&self, f: F) -> Sequence<I::Item>
    where
        I: IntoCursor + 'static,
        I::Item: 'static,
        I::IntoCursor: 'static,
        F: Fn(T) -> I + 'static,
    {
        let f = Rc::new(f);
        self.pipe(move |cursor| {
            let f = Rc::clone(&f);
            cursor.flat_map(move |value| f(value))
        })
    }

    pub fn flatten(&self) -> Sequence<T::Item>
    where
        T: IntoCursor,
        T::Item: 'static,
        T::IntoCursor: 'static,
    {
        self.pipe(|cursor| cursor.flatten())
    }

    pub fn chain(&self, other: &Sequence<T>) -> Sequence<T> {
        let other = other.clone();
        self.pipe(move |cursor| cursor.chain(other.cursor()))
    }

    pub fn on_each<F>(&self, f: F) -> Sequence<T>
    where
        F: Fn(&T) + 'static,
    {
        let f = Rc::new(f);
        self.pipe(move |cursor| {
            let f = Rc::clone(&f);
            cursor.on_each(move |value| f(value))
        })
    }

    pub fn with_index(&self) -> Sequence<(usize, T)> {
        self.pipe(|cursor| cursor.with_index())
    }

    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn chunked(&self, size: usize) -> Sequence<Vec<T>> {
        assert!(size > 0, "chunk size must be non-zero");
        self.pipe(move |cursor| cursor.chunked(size))
    }
}

// ============================================================================
// Terminals: each runs on a fresh cursor
// ============================================================================

impl<T: 'static> Sequence<T> {
    pub fn to_list(&self) -> SeqResult<Vec<T>> {
        self.cursor().to_list()
    }

    pub fn first(&self) -> SeqResult<T> {
        self.cursor().first()
    }

    pub fn first_or_none(&self) -> SeqResult<Option<T>> {
        self.cursor().first_or_none()
    }

    pub fn first_where<P: FnMut(&T) -> bool>(&self, predicate: P) -> SeqResult<T> {
        self.cursor().first_where(predicate)
    }

    pub fn find<P: FnMut(&T) -> bool>(&self, predicate: P) -> SeqResult<Option<T>> {
        self.cursor().find(predicate)
    }

    pub fn any<P: FnMut(&T) -> bool>(&self, predicate: P) -> SeqResult<bool> {
        self.cursor().any(predicate)
    }

    pub fn all<P: FnMut(&T) -> bool>(&self, predicate: P) -> SeqResult<bool> {
        self.cursor().all(predicate)
    }

    pub fn none<P: FnMut(&T) -> bool>(&self, predicate: P) -> SeqResult<bool> {
        self.cursor().none(predicate)
    }

    pub fn count(&self) -> SeqResult<usize> {
        self.cursor().count()
    }

    pub fn count_where<P: FnMut(&T) -> bool>(&self, predicate: P) -> SeqResult<usize> {
        self.cursor().count_where(predicate)
    }

    pub fn fold<B, F: FnMut(B, T) -> B>(&self, init: B, f: F) -> SeqResult<B> {
        self.cursor().fold(init, f)
    }

    pub fn reduce<F: FnMut(T, T) -> T>(&self, f: F) -> SeqResult<T> {
        self.cursor().reduce(f)
    }

    pub fn max(&self) -> SeqResult<Option<T>>
    where
        T: Ord,
    {
        self.cursor().max()
    }

    pub fn min(&self) -> SeqResult<Option<T>>
    where
        T: Ord,
    {
        self.cursor().min()
    }

    pub fn max_by_key<K: Ord, F: FnMut(&T) -> K>(&self, key: F) -> SeqResult<Option<T>> {
        self.cursor().max_by_key(key)
    }

    pub fn min_by_key<K: Ord, F: FnMut(&T) -> K>(&self, key: F) -> SeqResult<Option<T>> {
        self.cursor().min_by_key(key)
    }

    pub fn last(&self) -> SeqResult<T> {
        self.cursor().last()
    }

    pub fn last_or_none(&self) -> SeqResult<Option<T>> {
        self.cursor().last_or_none()
    }

    pub fn element_at(&self, index: usize) -> SeqResult<Option<T>> {
        self.cursor().element_at(index)
    }

    pub fn join(&self, separator: &str) -> SeqResult<String>
    where
        T: fmt::Display,
    {
        self.cursor().join(separator)
    }

    pub fn partition<P: FnMut(&T) -> bool>(&self, predicate: P) -> SeqResult<(Vec<T>, Vec<T>)> {
        self.cursor().partition(predicate)
    }

    pub fn group_by<K, F>(&self, key: F) -> SeqResult<HashMap<K, Vec<T>>>
    where
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        self.cursor().group_by(key)
    }
}

impl<T> IntoCursor for Sequence<T> {
    type Item = T;
    type IntoCursor = BoxCursor<T>;

    fn into_cursor(self) -> BoxCursor<T> {
        self.cursor()
    }
}

impl<T> IntoCursor for &Sequence<T> {
    type Item = T;
    type IntoCursor = BoxCursor<T>;

    fn into_cursor(self) -> BoxCursor<T> {
        self.cursor()
    }
}
