//! Explicit state-machine generator engine.
//!
//! The body is a value whose fields hold its resume point and live
//! variables. Each [`Body::resume`] call runs from the saved resume point to
//! the next emit point and reports what happened there:
//!
//! ```text
//! resume() ──▶ Step::Emit(v)      cursor yields v, body is Suspended
//!          ──▶ Step::EmitAll(seq) cursor drains seq, body is Delegating
//!          ──▶ Step::Done         cursor is Completed
//!          ──▶ Err(e)             cursor yields Err(e), body is Poisoned
//! ```
//!
//! # Example
//!
//! ```
//! use lazyseq_core::prelude::*;
//! use lazyseq_core::engine::{Body, Step};
//!
//! // emit 0..n, then the squares of 0..n
//! struct Twice { n: u32, i: u32, squares: bool }
//!
//! impl Body for Twice {
//!     type Item = u32;
//!     fn resume(&mut self) -> SeqResult<Step<u32>> {
//!         if self.i == self.n {
//!             if self.squares {
//!                 return Ok(Step::Done);
//!             }
//!             self.squares = true;
//!             self.i = 0;
//!         }
//!         let i = self.i;
//!         self.i += 1;
//!         Ok(Step::Emit(if self.squares { i * i } else { i }))
//!     }
//! }
//!
//! let seq = Sequence::machine(|| Twice { n: 3, i: 0, squares: false });
//! assert_eq!(seq.to_list().unwrap(), vec![0, 1, 2, 0, 1, 4]);
//! ```

use std::mem;

use log::{debug, trace};

use super::GeneratorState;
use crate::cursor::{BoxCursor, Cursor};
use crate::error::{Misuse, Pull, SeqResult};
use crate::sequence::Sequence;

/// What a body reached when it stopped running.
pub enum Step<T> {
    /// Hand one value to the consumer and suspend.
    Emit(T),
    /// Hand over every value of a sub-sequence, one per pull, then resume.
    EmitAll(Sequence<T>),
    /// The body is finished.
    Done,
}

/// A generator body written as an explicit state machine.
pub trait Body {
    type Item;

    /// Run to the next emit point.
    fn resume(&mut self) -> SeqResult<Step<Self::Item>>;
}

enum Slot<B: Body> {
    NotStarted(B),
    Suspended(B),
    Delegating(B, BoxCursor<B::Item>),
    Completed,
    Poisoned,
}

/// Cursor driving a [`Body`].
pub struct MachineCursor<B: Body> {
    slot: Slot<B>,
}

impl<B: Body> MachineCursor<B> {
    pub fn new(body: B) -> Self {
        Self {
            slot: Slot::NotStarted(body),
        }
    }

    pub fn state(&self) -> GeneratorState {
        match self.slot {
            Slot::NotStarted(_) => GeneratorState::NotStarted,
            Slot::Suspended(_) => GeneratorState::Suspended,
            Slot::Delegating(..) => GeneratorState::Delegating,
            Slot::Completed => GeneratorState::Completed,
            Slot::Poisoned => GeneratorState::Poisoned,
        }
    }
}

impl<B> Cursor for MachineCursor<B>
where
    B: Body,
    B::Item: 'static,
{
    type Item = B::Item;

    fn pull(&mut self) -> Pull<B::Item> {
        loop {
            // Poisoned while the body runs, and left that way if it fails.
            let mut body = match mem::replace(&mut self.slot, Slot::Poisoned) {
                Slot::NotStarted(body) => {
                    trace!("machine: entering body");
                    body
                }
                Slot::Suspended(body) => body,
                Slot::Delegating(body, mut sub) => match sub.pull() {
                    Ok(Some(value)) => {
                        self.slot = Slot::Delegating(body, sub);
                        return Ok(Some(value));
                    }
                    Ok(None) => body,
                    Err(err) => {
                        debug!("machine: sub-sequence failed: {}", err);
                        return Err(err);
                    }
                },
                Slot::Completed => {
                    self.slot = Slot::Completed;
                    return Ok(None);
                }
                Slot::Poisoned => return Err(Misuse::Poisoned.into()),
            };

            let step = match body.resume() {
                Ok(step) => step,
                Err(err) => {
                    debug!("machine: body failed: {}", err);
                    return Err(err);
                }
            };

            match step {
                Step::Emit(value) => {
                    self.slot = Slot::Suspended(body);
                    return Ok(Some(value));
                }
                Step::EmitAll(seq) => {
                    trace!("machine: delegating to sub-sequence");
                    self.slot = Slot::Delegating(body, seq.cursor());
                }
                Step::Done => {
                    trace!("machine: body completed");
                    self.slot = Slot::Completed;
                    return Ok(None);
                }
            }
        }
    }

    fn close(&mut self) {
        match mem::replace(&mut self.slot, Slot::Completed) {
            Slot::Suspended(_) | Slot::Delegating(..) => trace!("machine: closed while suspended"),
            Slot::Poisoned => self.slot = Slot::Poisoned,
            _ => {}
        }
    }
}
