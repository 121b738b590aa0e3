//! Lockstep stages: `zip` over two cursors, `zip_with_next` over adjacent
//! values of one.

use log::trace;

use crate::cursor::{Cursor, Lifecycle};
use crate::error::Pull;

pub(crate) fn pair<A, B>(a: A, b: B) -> (A, B) {
    (a, b)
}

pub(crate) fn clone_pair<T: Clone>(a: &T, b: &T) -> (T, T) {
    (a.clone(), b.clone())
}

/// Pulls the left side, then the right side, once per step. The first side
/// to run out ends the zip and the other side is closed. When the right side
/// runs out first, the left value pulled for that step is discarded, so a
/// longer left side is pulled one more time than the zip yields.
pub struct Zip<A, B, F> {
    left: A,
    right: B,
    combine: F,
    state: Lifecycle,
}

impl<A, B, F> Zip<A, B, F> {
    pub(crate) fn new(left: A, right: B, combine: F) -> Self {
        Self {
            left,
            right,
            combine,
            state: Lifecycle::Live,
        }
    }
}

impl<U, A, B, F> Cursor for Zip<A, B, F>
where
    A: Cursor,
    B: Cursor,
    F: FnMut(A::Item, B::Item) -> U,
{
    type Item = U;

    fn pull(&mut self) -> Pull<U> {
        let Self { left, right, combine, state } = self;
        state.run(|| {
            let Some(a) = left.pull()? else {
                trace!("zip: left side exhausted, closing right");
                right.close();
                return Ok(None);
            };
            let Some(b) = right.pull()? else {
                trace!("zip: right side exhausted, closing left");
                left.close();
                return Ok(None);
            };
            Ok(Some(combine(a, b)))
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.left.close();
        self.right.close();
    }
}

/// Buffers exactly one value, the most recent one pulled.
pub struct ZipWithNext<C: Cursor, F> {
    upstream: C,
    prev: Option<C::Item>,
    combine: F,
    state: Lifecycle,
}

impl<C: Cursor, F> ZipWithNext<C, F> {
    pub(crate) fn new(upstream: C, combine: F) -> Self {
        Self {
            upstream,
            prev: None,
            combine,
            state: Lifecycle::Live,
        }
    }
}

impl<U, C, F> Cursor for ZipWithNext<C, F>
where
    C: Cursor,
    F: FnMut(&C::Item, &C::Item) -> U,
{
    type Item = U;

    fn pull(&mut self) -> Pull<U> {
        let Self { upstream, prev, combine, state } = self;
        state.run(|| {
            let before = match prev.take() {
                Some(value) => value,
                None => match upstream.pull()? {
                    Some(value) => value,
                    None => return Ok(None),
                },
            };
            let Some(after) = upstream.pull()? else {
                return Ok(None);
            };
            let out = combine(&before, &after);
            *prev = Some(after);
            Ok(Some(out))
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.prev = None;
        self.upstream.close();
    }
}
