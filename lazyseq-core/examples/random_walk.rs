//! A random walk whose random source is passed in explicitly.
//!
//! The same seed replays the same walk on every cursor; a different seed is
//! a different sequence.
//!
//! cargo run --example random_walk -- 42

use std::cell::RefCell;
use std::rc::Rc;

use lazyseq_core::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Unbounded walk starting at 0; each step is -1 or +1.
fn walk(seed: u64) -> Sequence<i64> {
    Sequence::generator(move |e: Emitter<i64>| async move {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut position = 0i64;
        loop {
            e.emit(position).await;
            position += if rng.gen_bool(0.5) { 1 } else { -1 };
        }
    })
}

/// Steps drawn from a shared generator owned by the caller. Each cursor
/// continues from wherever the shared generator is, so this sequence is not
/// restart-equivalent.
fn steps_from(rng: Rc<RefCell<StdRng>>) -> Sequence<i64> {
    Sequence::from_source(move || {
        let rng = Rc::clone(&rng);
        move || {
            let step = if rng.borrow_mut().gen_bool(0.5) { 1 } else { -1 };
            Ok(Some(step))
        }
    })
}

fn main() -> SeqResult<()> {
    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(7);

    let path = walk(seed);
    println!("first 20 positions: {}", path.take(20).join(" ")?);
    println!("replayed:           {}", path.take(20).join(" ")?);

    let first_return = path.with_index().skip(1).take(10_000).find(|(_, pos)| *pos == 0)?;
    match first_return {
        Some((step, _)) => println!("back at the origin after {} steps", step),
        None => println!("no return to the origin within 10000 steps"),
    }

    let far = path.take(1000).max_by_key(|pos| pos.abs())?;
    println!("furthest within 1000 steps: {:?}", far);

    let shared = Rc::new(RefCell::new(StdRng::seed_from_u64(seed)));
    let steps = steps_from(Rc::clone(&shared));
    println!("shared draws: {:?}", steps.take(5).to_list()?);
    println!("next draws:   {:?}", steps.take(5).to_list()?);
    Ok(())
}
