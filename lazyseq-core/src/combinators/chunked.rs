use crate::cursor::{Cursor, Lifecycle};
use crate::error::Pull;

/// Collects up to `size` upstream values per pull. Holds at most one chunk.
pub struct Chunked<C> {
    upstream: C,
    size: usize,
    upstream_done: bool,
    state: Lifecycle,
}

impl<C> Chunked<C> {
    pub(crate) fn new(upstream: C, size: usize) -> Self {
        assert!(size > 0, "chunk size must be non-zero");
        Self {
            upstream,
            size,
            upstream_done: false,
            state: Lifecycle::Live,
        }
    }
}

impl<C: Cursor> Cursor for Chunked<C> {
    type Item = Vec<C::Item>;

    fn pull(&mut self) -> Pull<Self::Item> {
        let Self { upstream, size, upstream_done, state } = self;
        state.run(|| {
            if *upstream_done {
                return Ok(None);
            }
            let mut chunk = Vec::with_capacity((*size).min(1024));
            while chunk.len() < *size {
                match upstream.pull()? {
                    Some(value) => chunk.push(value),
                    None => {
                        *upstream_done = true;
                        break;
                    }
                }
            }
            Ok((!chunk.is_empty()).then_some(chunk))
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.upstream.close();
    }
}
