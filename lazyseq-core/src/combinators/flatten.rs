use crate::cursor::{Cursor, IntoCursor, Lifecycle};
use crate::error::Pull;

/// Drains each sub-cursor completely before pulling the next upstream value.
/// Only the current sub-cursor is alive at any time.
pub struct Flatten<C>
where
    C: Cursor,
    C::Item: IntoCursor,
{
    upstream: C,
    inner: Option<<C::Item as IntoCursor>::IntoCursor>,
    state: Lifecycle,
}

impl<C> Flatten<C>
where
    C: Cursor,
    C::Item: IntoCursor,
{
    pub(crate) fn new(upstream: C) -> Self {
        Self {
            upstream,
            inner: None,
            state: Lifecycle::Live,
        }
    }
}

impl<C> Cursor for Flatten<C>
where
    C: Cursor,
    C::Item: IntoCursor,
{
    type Item = <C::Item as IntoCursor>::Item;

    fn pull(&mut self) -> Pull<Self::Item> {
        let Self { upstream, inner, state } = self;
        state.run(|| loop {
            if let Some(cursor) = inner.as_mut() {
                if let Some(value) = cursor.pull()? {
                    return Ok(Some(value));
                }
                *inner = None;
            }
            match upstream.pull()? {
                Some(source) => *inner = Some(source.into_cursor()),
                None => return Ok(None),
            }
        })
    }

    fn close(&mut self) {
        self.state.close();
        if let Some(mut cursor) = self.inner.take() {
            cursor.close();
        }
        self.upstream.close();
    }
}
