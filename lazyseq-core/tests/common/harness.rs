//! Test harness for running pipeline cases with stochastic variations

use std::cell::Cell;
use std::rc::Rc;

use lazyseq_core::engine::{Body, Step as Resume};
use lazyseq_core::prelude::*;

use super::generators::{Backing, Gen, Identity};
use super::loader::{Arg, Outcome, Source, Step, TestCase};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub backing: Backing,
    pub identities: Vec<Identity>,
    pub expected: Outcome,
    pub actual: Outcome,
    pub pulls: usize,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// What follows the finite values of a source
#[derive(Debug, Clone)]
enum Tail {
    End,
    Count(i64),
    Fail(String),
}

fn split_source(source: &Source) -> (Rc<[i64]>, Tail) {
    match source {
        Source::List(values) => (values.clone().into(), Tail::End),
        Source::Naturals { naturals } => (Rc::from(Vec::new()), Tail::Count(*naturals)),
        Source::Failing { values, fail } => (values.clone().into(), Tail::Fail(fail.clone())),
    }
}

/// The `i`-th pull of a source
fn nth(values: &[i64], tail: &Tail, i: usize) -> SeqResult<Option<i64>> {
    if let Some(v) = values.get(i) {
        return Ok(Some(*v));
    }
    match tail {
        Tail::End => Ok(None),
        Tail::Count(from) => Ok(Some(from + (i - values.len()) as i64)),
        Tail::Fail(msg) => Err(SeqError::body(msg.clone())),
    }
}

struct Replay {
    values: Rc<[i64]>,
    tail: Tail,
    i: usize,
}

impl Body for Replay {
    type Item = i64;

    fn resume(&mut self) -> SeqResult<Resume<i64>> {
        let next = nth(&self.values, &self.tail, self.i)?;
        self.i += 1;
        Ok(next.map_or(Resume::Done, Resume::Emit))
    }
}

/// Everything after the finite values, as its own sequence
fn tail_seq(tail: &Tail) -> Sequence<i64> {
    match tail {
        Tail::End => Sequence::empty(),
        Tail::Count(from) => Sequence::successors(*from, |n| Some(n + 1)),
        Tail::Fail(msg) => {
            let msg = msg.clone();
            Sequence::from_source(move || {
                let msg = msg.clone();
                move || Err(SeqError::body(msg.clone()))
            })
        }
    }
}

fn build_source(source: &Source, backing: &Backing) -> Sequence<i64> {
    let (values, tail) = split_source(source);
    match backing {
        Backing::Eager => Sequence::of(values.to_vec()).chain(&tail_seq(&tail)),
        Backing::Iter => Sequence::from_iter(values.to_vec()).chain(&tail_seq(&tail)),
        Backing::External => Sequence::from_source(move || {
            let values = Rc::clone(&values);
            let tail = tail.clone();
            let mut i = 0;
            move || {
                i += 1;
                nth(&values, &tail, i - 1)
            }
        }),
        Backing::Machine => Sequence::machine(move || Replay {
            values: Rc::clone(&values),
            tail: tail.clone(),
            i: 0,
        }),
        Backing::Coroutine => Sequence::generator(move |e: Emitter<i64>| {
            let values = Rc::clone(&values);
            let tail = tail.clone();
            async move {
                for v in values.iter() {
                    e.emit(*v).await;
                }
                match tail {
                    Tail::End => Ok(()),
                    Tail::Count(mut n) => loop {
                        e.emit(n).await;
                        n += 1;
                    },
                    Tail::Fail(msg) => Err(SeqError::body(msg)),
                }
            }
        }),
        Backing::Split(cuts) => {
            let mut parts = Vec::new();
            let mut start = 0;
            for &cut in cuts {
                parts.push(Sequence::of(values[start..cut].to_vec()));
                start = cut;
            }
            parts.push(Sequence::of(values[start..].to_vec()));
            Sequence::of(parts).flatten().chain(&tail_seq(&tail))
        }
    }
}

fn with_identity(seq: Sequence<i64>, identity: Identity) -> Sequence<i64> {
    match identity {
        Identity::Map => seq.map(|v| v),
        Identity::Filter => seq.filter(|_| true),
        Identity::OnEach => seq.on_each(|_| {}),
    }
}

fn transform(name: &str) -> Result<fn(i64) -> i64, String> {
    Ok(match name {
        "double" => |v: i64| v * 2,
        "square" => |v: i64| v * v,
        "negate" => |v: i64| -v,
        "inc" => |v: i64| v + 1,
        _ => return Err(format!("unknown transform {:?}", name)),
    })
}

fn predicate(name: &str) -> Result<fn(&i64) -> bool, String> {
    Ok(match name {
        "even" => |v: &i64| v % 2 == 0,
        "odd" => |v: &i64| v % 2 != 0,
        "positive" => |v: &i64| *v > 0,
        _ => return Err(format!("unknown predicate {:?}", name)),
    })
}

fn apply(seq: &Sequence<i64>, op: &Step) -> Result<Sequence<i64>, String> {
    Ok(match (op.name(), op.arg()) {
        ("map", Some(Arg::Name(f))) => seq.map(transform(f)?),
        ("filter", Some(Arg::Name(p))) => seq.filter(predicate(p)?),
        ("take", Some(Arg::Int(n))) => seq.take(*n as usize),
        ("skip", Some(Arg::Int(n))) => seq.skip(*n as usize),
        ("take_while", Some(Arg::Int(n))) => {
            let n = *n;
            seq.take_while(move |v| *v < n)
        }
        ("skip_while", Some(Arg::Int(n))) => {
            let n = *n;
            seq.skip_while(move |v| *v < n)
        }
        ("chunk_sum", Some(Arg::Int(n))) => {
            seq.chunked(*n as usize).map(|chunk| chunk.iter().sum())
        }
        ("pair_sum", None) => seq.zip_with_next_by(|a, b| a + b),
        ("zip_add", Some(Arg::List(other))) => {
            seq.zip_with(&Sequence::of(other.clone()), |a, b| a + b)
        }
        ("chain", Some(Arg::List(other))) => seq.chain(&Sequence::of(other.clone())),
        ("repeat", None) => seq.flat_map(|v| vec![v; v.max(0) as usize]),
        ("index_mul", None) => seq.with_index().map(|(i, v)| i as i64 * v),
        ("fail_on", Some(Arg::Int(n))) => {
            let n = *n;
            seq.try_map(move |v| {
                if v == n {
                    Err(format!("hit {}", n))
                } else {
                    Ok(v)
                }
            })
        }
        _ => return Err(format!("unknown op {:?}", op)),
    })
}

fn finish(seq: &Sequence<i64>, terminal: &Step) -> Outcome {
    let result = match (terminal.name(), terminal.arg()) {
        ("to_list", None) => seq.to_list().map(Outcome::Values),
        ("count", None) => seq.count().map(|n| Outcome::Scalar(n as i64)),
        ("first", None) => seq.first().map(Outcome::Scalar),
        ("first_or_none", None) => seq.first_or_none().map(Outcome::from),
        ("last", None) => seq.last().map(Outcome::Scalar),
        ("sum", None) => seq.fold(0, |acc, v| acc + v).map(Outcome::Scalar),
        ("max", None) => seq.max().map(Outcome::from),
        ("min", None) => seq.min().map(Outcome::from),
        ("element_at", Some(Arg::Int(i))) => seq.element_at(*i as usize).map(Outcome::from),
        ("any_eq", Some(Arg::Int(n))) => seq.any(|v| v == n).map(Outcome::Flag),
        ("all_below", Some(Arg::Int(n))) => seq.all(|v| v < n).map(Outcome::Flag),
        ("find_above", Some(Arg::Int(n))) => seq.find(|v| v > n).map(Outcome::from),
        _ => {
            return Outcome::Error {
                error: format!("unknown terminal {:?}", terminal),
            }
        }
    };
    result.unwrap_or_else(|e| Outcome::Error {
        error: e.to_string(),
    })
}

fn run(case: &TestCase, backing: Backing, identities: Vec<Identity>, seed: u64) -> TestResult {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let mut seq =
        build_source(&case.source, &backing).on_each(move |_| counter.set(counter.get() + 1));
    for identity in &identities {
        seq = with_identity(seq, *identity);
    }

    let mut errors = Vec::new();
    for op in &case.ops {
        match apply(&seq, op) {
            Ok(next) => seq = next,
            Err(e) => errors.push(e),
        }
    }

    let actual = finish(&seq, &case.terminal);
    if actual != case.expect {
        errors.push(format!("expected {:?}, got {:?}", case.expect, actual));
    }
    if let Some(max) = case.max_pulls {
        if pulls.get() > max {
            errors.push(format!(
                "pulled {} values from the source, at most {} allowed",
                pulls.get(),
                max
            ));
        }
    }

    TestResult {
        passed: errors.is_empty(),
        backing,
        identities,
        expected: case.expect.clone(),
        actual,
        pulls: pulls.get(),
        seed,
        errors,
    }
}

/// Run a single test case (canonical: eager source, no extra stages)
pub fn run_test(case: &TestCase) -> TestResult {
    run(case, Backing::Eager, Vec::new(), 0)
}

/// Run test with stochastic variations
///
/// - Random backing form for the source (same logical values)
/// - 50% chance of pass-through stages in front of the ops (geometric, α=0.5)
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let backing = gen.backing(&case.source);
    let identities = if gen.chance(0.5) {
        gen.identity_stages()
    } else {
        Vec::new()
    };
    run(case, backing, identities, gen.seed)
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case: &TestCase, label: &str) {
        eprintln!("\n=== FAILED: {} ({}) ===", case.id, label);
        eprintln!("{}", case.desc);
        eprintln!("Seed: {} (set LAZYSEQ_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("Backing: {:?}", self.backing);
        eprintln!("Pass-through stages: {:?}", self.identities);
        eprintln!("Source pulls: {}", self.pulls);
        eprintln!("Expected: {:?}", self.expected);
        eprintln!("Actual:   {:?}", self.actual);
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
