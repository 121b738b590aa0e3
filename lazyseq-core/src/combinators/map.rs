//! One-to-one stages: `map`, `try_map`, `on_each`, `with_index`.

use crate::cursor::{Cursor, Lifecycle};
use crate::error::{BoxError, Pull, SeqError};

pub struct Map<C, F> {
    upstream: C,
    f: F,
    state: Lifecycle,
}

impl<C, F> Map<C, F> {
    pub(crate) fn new(upstream: C, f: F) -> Self {
        Self {
            upstream,
            f,
            state: Lifecycle::Live,
        }
    }
}

impl<U, C, F> Cursor for Map<C, F>
where
    C: Cursor,
    F: FnMut(C::Item) -> U,
{
    type Item = U;

    #[inline]
    fn pull(&mut self) -> Pull<U> {
        let Self { upstream, f, state } = self;
        state.run(|| Ok(upstream.pull()?.map(f)))
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}

/// Fallible map. The transform's error becomes [`SeqError::Body`].
pub struct TryMap<C, F> {
    upstream: C,
    f: F,
    state: Lifecycle,
}

impl<C, F> TryMap<C, F> {
    pub(crate) fn new(upstream: C, f: F) -> Self {
        Self {
            upstream,
            f,
            state: Lifecycle::Live,
        }
    }
}

impl<U, E, C, F> Cursor for TryMap<C, F>
where
    C: Cursor,
    F: FnMut(C::Item) -> Result<U, E>,
    E: Into<BoxError>,
{
    type Item = U;

    fn pull(&mut self) -> Pull<U> {
        let Self { upstream, f, state } = self;
        state.run(|| match upstream.pull()? {
            Some(value) => f(value).map(Some).map_err(SeqError::body),
            None => Ok(None),
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}

pub struct OnEach<C, F> {
    upstream: C,
    f: F,
    state: Lifecycle,
}

impl<C, F> OnEach<C, F> {
    pub(crate) fn new(upstream: C, f: F) -> Self {
        Self {
            upstream,
            f,
            state: Lifecycle::Live,
        }
    }
}

impl<C, F> Cursor for OnEach<C, F>
where
    C: Cursor,
    F: FnMut(&C::Item),
{
    type Item = C::Item;

    fn pull(&mut self) -> Pull<C::Item> {
        let Self { upstream, f, state } = self;
        state.run(|| {
            let next = upstream.pull()?;
            if let Some(value) = &next {
                f(value);
            }
            Ok(next)
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}

pub struct WithIndex<C> {
    upstream: C,
    index: usize,
    state: Lifecycle,
}

impl<C> WithIndex<C> {
    pub(crate) fn new(upstream: C) -> Self {
        Self {
            upstream,
            index: 0,
            state: Lifecycle::Live,
        }
    }
}

impl<C: Cursor> Cursor for WithIndex<C> {
    type Item = (usize, C::Item);

    fn pull(&mut self) -> Pull<Self::Item> {
        let Self { upstream, index, state } = self;
        state.run(|| {
            Ok(upstream.pull()?.map(|value| {
                let i = *index;
                *index += 1;
                (i, value)
            }))
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}
