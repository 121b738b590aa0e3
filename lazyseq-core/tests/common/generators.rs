//! Stochastic choices for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::loader::Source;

/// How the logical source of a case is materialized
#[derive(Debug, Clone)]
pub enum Backing {
    /// `Sequence::of` / `Sequence::successors`
    Eager,
    /// `Sequence::from_iter` over a cloned `Vec`
    Iter,
    /// `Sequence::from_source` with a stateful next function
    External,
    /// State-machine generator body
    Machine,
    /// Async generator body
    Coroutine,
    /// The values cut into sub-sequences at these offsets and flattened
    Split(Vec<usize>),
}

/// Pass-through stage inserted in front of the ops under test
#[derive(Debug, Clone, Copy)]
pub enum Identity {
    Map,
    Filter,
    OnEach,
}

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from LAZYSEQ_TEST_SEED or a random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("LAZYSEQ_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Pick a backing form that can express `source`
    pub fn backing(&mut self, source: &Source) -> Backing {
        let splittable = !matches!(source, Source::Naturals { .. });
        match self.rng.gen_range(0..6) {
            0 => Backing::Eager,
            1 => Backing::Iter,
            2 => Backing::External,
            3 => Backing::Machine,
            4 => Backing::Coroutine,
            _ if splittable => Backing::Split(self.cuts(source)),
            _ => Backing::External,
        }
    }

    /// Sorted cut offsets into the finite part of `source`
    fn cuts(&mut self, source: &Source) -> Vec<usize> {
        let len = match source {
            Source::List(values) | Source::Failing { values, .. } => values.len(),
            Source::Naturals { .. } => 0,
        };
        let mut cuts: Vec<usize> = (0..self.geometric(0.6))
            .map(|_| self.rng.gen_range(0..=len))
            .collect();
        cuts.sort_unstable();
        cuts
    }

    /// Geometric number of pass-through stages (α=0.5)
    pub fn identity_stages(&mut self) -> Vec<Identity> {
        (0..self.geometric(0.5))
            .map(|_| match self.rng.gen_range(0..3) {
                0 => Identity::Map,
                1 => Identity::Filter,
                _ => Identity::OnEach,
            })
            .collect()
    }
}
