//! Print the first N Fibonacci numbers from an unbounded generator.
//!
//! cargo run --example fibonacci -- 20

use lazyseq_core::prelude::*;

fn fibonacci() -> Sequence<u64> {
    Sequence::generator(|e: Emitter<u64>| async move {
        let (mut a, mut b) = (0u64, 1u64);
        loop {
            e.emit(a).await;
            match a.checked_add(b) {
                Some(next) => (a, b) = (b, next),
                None => return Ok(()),
            }
        }
    })
}

fn main() -> SeqResult<()> {
    let n: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(15);

    let fib = fibonacci();
    println!("first {}: {}", n, fib.take(n).join(", ")?);

    let even = fib.filter(|v| v % 2 == 0);
    println!("first even above 1000: {}", even.first_where(|v| *v > 1000)?);

    let ratios = fib.skip(1).zip_with_next_by(|a, b| *b as f64 / *a as f64);
    if let Some(ratio) = ratios.element_at(40)? {
        println!("ratio after 40 steps: {:.12}", ratio);
    }
    Ok(())
}
