use crate::cursor::{Cursor, Lifecycle};
use crate::error::{BoxError, Pull, SeqError};

/// Skips values failing the predicate; pulls upstream until one passes.
pub struct Filter<C, P> {
    upstream: C,
    predicate: P,
    state: Lifecycle,
}

impl<C, P> Filter<C, P> {
    pub(crate) fn new(upstream: C, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
            state: Lifecycle::Live,
        }
    }
}

impl<C, P> Cursor for Filter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn pull(&mut self) -> Pull<C::Item> {
        let Self { upstream, predicate, state } = self;
        state.run(|| {
            while let Some(value) = upstream.pull()? {
                if predicate(&value) {
                    return Ok(Some(value));
                }
            }
            Ok(None)
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}

/// [`Filter`] with a fallible predicate.
pub struct TryFilter<C, P> {
    upstream: C,
    predicate: P,
    state: Lifecycle,
}

impl<C, P> TryFilter<C, P> {
    pub(crate) fn new(upstream: C, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
            state: Lifecycle::Live,
        }
    }
}

impl<E, C, P> Cursor for TryFilter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> Result<bool, E>,
    E: Into<BoxError>,
{
    type Item = C::Item;

    fn pull(&mut self) -> Pull<C::Item> {
        let Self { upstream, predicate, state } = self;
        state.run(|| {
            while let Some(value) = upstream.pull()? {
                if predicate(&value).map_err(SeqError::body)? {
                    return Ok(Some(value));
                }
            }
            Ok(None)
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}
