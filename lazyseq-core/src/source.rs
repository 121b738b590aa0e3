//! Leaf cursors: the producers at the root of a chain.
//!
//! - [`SliceCursor`] - clones values out of a shared, already-built container
//! - [`VecCursor`] / [`IterCursor`] - move values out of an owned container
//!   or any `std` iterator
//! - [`Successors`] - seed plus successor rule, computed on demand
//! - [`FnCursor`] - an external "next or exhaustion" function
//! - [`Empty`]

use std::marker::PhantomData;
use std::mem;
use std::rc::Rc;

use crate::cursor::{Cursor, IntoCursor, Lifecycle};
use crate::error::Pull;

/// Clones values out of a shared slice, front to back.
///
/// Several cursors over the same `Rc<[T]>` walk it independently; the slice
/// itself is never mutated.
#[derive(Debug)]
pub struct SliceCursor<T> {
    items: Rc<[T]>,
    pos: usize,
}

impl<T> SliceCursor<T> {
    pub fn new(items: Rc<[T]>) -> Self {
        Self { items, pos: 0 }
    }
}

impl<T: Clone> Cursor for SliceCursor<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Pull<T> {
        match self.items.get(self.pos) {
            Some(item) => {
                self.pos += 1;
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.pos = self.items.len();
    }
}

/// Moves values out of an owned vector.
#[derive(Debug)]
pub struct VecCursor<T> {
    items: std::vec::IntoIter<T>,
}

impl<T> VecCursor<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl<T> Cursor for VecCursor<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Pull<T> {
        Ok(self.items.next())
    }

    fn close(&mut self) {
        // Drops the remaining values now rather than with the cursor.
        self.items = Vec::new().into_iter();
    }
}

impl<T> IntoCursor for Vec<T> {
    type Item = T;
    type IntoCursor = VecCursor<T>;

    fn into_cursor(self) -> VecCursor<T> {
        VecCursor::new(self)
    }
}

/// Wraps a `std` iterator. The iterator is dropped at exhaustion, so it is
/// never polled past its first `None`.
#[derive(Debug)]
pub struct IterCursor<I> {
    iter: Option<I>,
}

impl<I> IterCursor<I> {
    pub fn new(iter: I) -> Self {
        Self { iter: Some(iter) }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    fn pull(&mut self) -> Pull<I::Item> {
        let next = self.iter.as_mut().and_then(Iterator::next);
        if next.is_none() {
            self.iter = None;
        }
        Ok(next)
    }

    fn close(&mut self) {
        self.iter = None;
    }
}

enum Link<T> {
    Seed(T),
    Last(T),
    Done,
}

/// Seed plus successor rule.
///
/// The successor of a value is computed only when that successor is pulled,
/// so reading the seed alone never runs `next`. (`std::iter::successors`
/// computes one value ahead.)
pub struct Successors<T, F> {
    link: Link<T>,
    next: F,
}

impl<T, F> Successors<T, F>
where
    F: FnMut(&T) -> Option<T>,
{
    pub fn new(seed: T, next: F) -> Self {
        Self {
            link: Link::Seed(seed),
            next,
        }
    }
}

impl<T, F> Cursor for Successors<T, F>
where
    T: Clone,
    F: FnMut(&T) -> Option<T>,
{
    type Item = T;

    fn pull(&mut self) -> Pull<T> {
        let value = match mem::replace(&mut self.link, Link::Done) {
            Link::Seed(seed) => seed,
            Link::Last(prev) => match (self.next)(&prev) {
                Some(value) => value,
                None => return Ok(None),
            },
            Link::Done => return Ok(None),
        };
        self.link = Link::Last(value.clone());
        Ok(Some(value))
    }

    fn close(&mut self) {
        self.link = Link::Done;
    }
}

/// Cursor over an external "next element or exhaustion" function.
///
/// The function is dropped as soon as it reports exhaustion or failure, or
/// the cursor is closed, releasing whatever it captured.
pub struct FnCursor<F> {
    next: Option<F>,
    state: Lifecycle,
}

impl<F> FnCursor<F> {
    pub fn new<T>(next: F) -> Self
    where
        F: FnMut() -> Pull<T>,
    {
        Self {
            next: Some(next),
            state: Lifecycle::Live,
        }
    }
}

impl<T, F> Cursor for FnCursor<F>
where
    F: FnMut() -> Pull<T>,
{
    type Item = T;

    fn pull(&mut self) -> Pull<T> {
        let next = &mut self.next;
        let result = self.state.run(|| match next.as_mut() {
            Some(f) => f(),
            None => Ok(None),
        });
        if self.state != Lifecycle::Live {
            self.next = None;
        }
        result
    }

    fn close(&mut self) {
        self.state.close();
        self.next = None;
    }
}

/// Cursor that is exhausted from the start.
pub struct Empty<T>(PhantomData<fn() -> T>);

impl<T> Empty<T> {
    pub fn new() -> Self {
        Empty(PhantomData)
    }
}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cursor for Empty<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Pull<T> {
        Ok(None)
    }
}
