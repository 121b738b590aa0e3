use crate::cursor::{Cursor, Lifecycle};
use crate::error::Pull;

pub struct Chain<A, B> {
    first: A,
    second: B,
    on_second: bool,
    state: Lifecycle,
}

impl<A, B> Chain<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            on_second: false,
            state: Lifecycle::Live,
        }
    }
}

impl<A, B> Cursor for Chain<A, B>
where
    A: Cursor,
    B: Cursor<Item = A::Item>,
{
    type Item = A::Item;

    fn pull(&mut self) -> Pull<A::Item> {
        let Self { first, second, on_second, state } = self;
        state.run(|| {
            if !*on_second {
                if let Some(value) = first.pull()? {
                    return Ok(Some(value));
                }
                *on_second = true;
            }
            second.pull()
        })
    }

    fn close(&mut self) {
        self.state.close();
        self.first.close();
        self.second.close();
    }
}
