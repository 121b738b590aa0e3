//! Prefix and suffix stages: `take`, `take_while`, `skip`, `skip_while`.
//!
//! `take` and `take_while` are what make infinite upstreams safe to consume:
//! once they stop they close upstream and never pull it again.

use log::trace;

use crate::cursor::{Cursor, Lifecycle};
use crate::error::Pull;

pub struct Take<C> {
    upstream: C,
    remaining: usize,
    state: Lifecycle,
}

impl<C> Take<C> {
    pub(crate) fn new(upstream: C, n: usize) -> Self {
        Self {
            upstream,
            remaining: n,
            state: Lifecycle::Live,
        }
    }
}

impl<C: Cursor> Cursor for Take<C> {
    type Item = C::Item;

    fn pull(&mut self) -> Pull<C::Item> {
        let Self { upstream, remaining, state } = self;
        state.run(|| {
            if *remaining == 0 {
                upstream.close();
                return Ok(None);
            }
            let next = upstream.pull()?;
            if next.is_some() {
                *remaining -= 1;
                if *remaining == 0 {
                    trace!("take: limit reached, closing upstream");
                    upstream.close();
                }
            }
            Ok(next)
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}

pub struct TakeWhile<C, P> {
    upstream: C,
    predicate: P,
    state: Lifecycle,
}

impl<C, P> TakeWhile<C, P> {
    pub(crate) fn new(upstream: C, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
            state: Lifecycle::Live,
        }
    }
}

impl<C, P> Cursor for TakeWhile<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn pull(&mut self) -> Pull<C::Item> {
        let Self { upstream, predicate, state } = self;
        state.run(|| match upstream.pull()? {
            Some(value) if predicate(&value) => Ok(Some(value)),
            Some(_) => {
                trace!("take_while: predicate failed, closing upstream");
                upstream.close();
                Ok(None)
            }
            None => Ok(None),
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}

/// Discards the first `n` values, on the first pull rather than at
/// construction.
pub struct Skip<C> {
    upstream: C,
    pending: usize,
    state: Lifecycle,
}

impl<C> Skip<C> {
    pub(crate) fn new(upstream: C, n: usize) -> Self {
        Self {
            upstream,
            pending: n,
            state: Lifecycle::Live,
        }
    }
}

impl<C: Cursor> Cursor for Skip<C> {
    type Item = C::Item;

    fn pull(&mut self) -> Pull<C::Item> {
        let Self { upstream, pending, state } = self;
        state.run(|| {
            while *pending > 0 {
                *pending -= 1;
                if upstream.pull()?.is_none() {
                    return Ok(None);
                }
            }
            upstream.pull()
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}

pub struct SkipWhile<C, P> {
    upstream: C,
    predicate: P,
    skipping: bool,
    state: Lifecycle,
}

impl<C, P> SkipWhile<C, P> {
    pub(crate) fn new(upstream: C, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
            skipping: true,
            state: Lifecycle::Live,
        }
    }
}

impl<C, P> Cursor for SkipWhile<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn pull(&mut self) -> Pull<C::Item> {
        let Self { upstream, predicate, skipping, state } = self;
        state.run(|| {
            if !*skipping {
                return upstream.pull();
            }
            while let Some(value) = upstream.pull()? {
                if !predicate(&value) {
                    *skipping = false;
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

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::cursor::Cursor;
    use crate::source::{FnCursor, Successors, VecCursor};
    use crate::terminal::Terminal;

    #[test]
    fn test_take_from_infinite() {
        let calls = Cell::new(0);
        let out = Successors::new(0, |n: &i32| {
            calls.set(calls.get() + 1);
            Some(n + 1)
        })
        .take(5)
        .to_list()
        .unwrap();

        assert_eq!(out, vec![0, 1, 2, 3, 4]);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_take_zero_never_pulls() {
        let pulls = Cell::new(0);
        let mut cursor = FnCursor::new(|| {
            pulls.set(pulls.get() + 1);
            Ok(Some(1))
        })
        .take(0);

        assert_eq!(cursor.pull().unwrap(), None);
        assert_eq!(pulls.get(), 0);
    }

    #[test]
    fn test_take_stays_exhausted() {
        let pulls = Cell::new(0);
        let mut cursor = FnCursor::new(|| {
            pulls.set(pulls.get() + 1);
            Ok(Some(pulls.get()))
        })
        .take(2);

        assert_eq!(cursor.pull().unwrap(), Some(1));
        assert_eq!(cursor.pull().unwrap(), Some(2));
        for _ in 0..3 {
            assert_eq!(cursor.pull().unwrap(), None);
        }
        assert_eq!(pulls.get(), 2);
    }

    #[test]
    fn test_take_while() {
        let out = Successors::new(1, |n: &i32| Some(n * 2))
            .take_while(|n| *n < 100)
            .to_list()
            .unwrap();
        assert_eq!(out, vec![1, 2, 4, 8, 16, 32, 64]);
    }

    #[test]
    fn test_skip_and_skip_while() {
        let out = VecCursor::new(vec![1, 2, 3, 4, 5]).skip(2).to_list().unwrap();
        assert_eq!(out, vec![3, 4, 5]);

        let out = VecCursor::new(vec![1, 2, 5, 1, 2]).skip_while(|n| *n < 3).to_list().unwrap();
        assert_eq!(out, vec![5, 1, 2]);

        let out = VecCursor::new(vec![1, 2]).skip(5).to_list().unwrap();
        assert!(out.is_empty());
    }
}
