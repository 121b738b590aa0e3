//! Coroutine generator engine, backed by `genawaiter`.
//!
//! The body is an `async` block that receives an [`Emitter`]. Each
//! `emit(..).await` hands one value to the consumer and parks the body right
//! there, locals intact; the next pull resumes it. The body must not await
//! anything other than its emitter.
//!
//! ```
//! use lazyseq_core::prelude::*;
//!
//! let countdown = Sequence::generator(|e: Emitter<u32>| async move {
//!     for n in (1..=3).rev() {
//!         e.emit(n).await;
//!     }
//!     e.emit_all(&Sequence::of(vec![0, 0])).await
//! });
//!
//! assert_eq!(countdown.to_list().unwrap(), vec![3, 2, 1, 0, 0]);
//! ```

use std::cell::Cell;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::rc::Rc;

use genawaiter::rc::{Co, Gen};
use genawaiter::GeneratorState as Resumed;
use log::{debug, trace};

use super::GeneratorState;
use crate::cursor::Cursor;
use crate::error::{Misuse, Pull, SeqResult};
use crate::sequence::Sequence;

/// Boxed body future; its output is the body's final verdict.
pub type BodyFuture = Pin<Box<dyn Future<Output = SeqResult<()>>>>;

/// Builds a fresh body for each cursor.
pub(crate) type Producer<T> = Rc<dyn Fn(Emitter<T>) -> BodyFuture>;

/// Handle a generator body uses to hand values to its consumer.
pub struct Emitter<T> {
    co: Co<T>,
    // number of emit_all / emit_cursor calls currently draining
    depth: Rc<Cell<usize>>,
}

impl<T> Emitter<T> {
    /// Hand `value` to the consumer and suspend until the next pull.
    pub async fn emit(&self, value: T) {
        self.co.yield_(value).await
    }

    /// Emit every value of `seq` in order, one per pull, from a fresh
    /// cursor. A failure inside `seq` is returned here.
    pub async fn emit_all(&self, seq: &Sequence<T>) -> SeqResult<()> {
        self.emit_cursor(seq.cursor()).await
    }

    /// Like [`Emitter::emit_all`] for a cursor that already exists.
    pub async fn emit_cursor<C>(&self, mut cursor: C) -> SeqResult<()>
    where
        C: Cursor<Item = T>,
    {
        trace!("coroutine: delegating to sub-cursor");
        self.depth.set(self.depth.get() + 1);
        let result = loop {
            match cursor.pull() {
                Ok(Some(value)) => self.co.yield_(value).await,
                Ok(None) => break Ok(()),
                Err(err) => break Err(err),
            }
        };
        self.depth.set(self.depth.get() - 1);
        result
    }
}

enum Slot<T> {
    NotStarted(Producer<T>),
    Running(Gen<T, (), BodyFuture>),
    Completed,
    Poisoned,
}

/// Cursor driving an async generator body.
pub struct CoroutineCursor<T> {
    slot: Slot<T>,
    depth: Rc<Cell<usize>>,
}

impl<T> CoroutineCursor<T> {
    pub(crate) fn new(producer: Producer<T>) -> Self {
        Self {
            slot: Slot::NotStarted(producer),
            depth: Rc::new(Cell::new(0)),
        }
    }

    pub fn state(&self) -> GeneratorState {
        match self.slot {
            Slot::NotStarted(_) => GeneratorState::NotStarted,
            Slot::Running(_) if self.depth.get() > 0 => GeneratorState::Delegating,
            Slot::Running(_) => GeneratorState::Suspended,
            Slot::Completed => GeneratorState::Completed,
            Slot::Poisoned => GeneratorState::Poisoned,
        }
    }
}

impl<T> Cursor for CoroutineCursor<T> {
    type Item = T;

    fn pull(&mut self) -> Pull<T> {
        let mut gen = match mem::replace(&mut self.slot, Slot::Poisoned) {
            Slot::NotStarted(producer) => {
                trace!("coroutine: entering body");
                let depth = Rc::clone(&self.depth);
                Gen::new(move |co| producer(Emitter { co, depth }))
            }
            Slot::Running(gen) => gen,
            Slot::Completed => {
                self.slot = Slot::Completed;
                return Ok(None);
            }
            Slot::Poisoned => return Err(Misuse::Poisoned.into()),
        };

        // A completed Gen is never resumed again: it is dropped here and the
        // slot records the outcome.
        match gen.resume() {
            Resumed::Yielded(value) => {
                self.slot = Slot::Running(gen);
                Ok(Some(value))
            }
            Resumed::Complete(Ok(())) => {
                trace!("coroutine: body completed");
                self.slot = Slot::Completed;
                Ok(None)
            }
            Resumed::Complete(Err(err)) => {
                debug!("coroutine: body failed: {}", err);
                Err(err)
            }
        }
    }

    fn close(&mut self) {
        match mem::replace(&mut self.slot, Slot::Completed) {
            Slot::Running(gen) => {
                trace!("coroutine: closed while suspended");
                drop(gen);
            }
            Slot::Poisoned => self.slot = Slot::Poisoned,
            _ => {}
        }
        self.depth.set(0);
    }
}
