//! Test infrastructure for lazyseq pipelines
//!
//! Provides fixture loading, stochastic backing-source variations, and
//! failure reporting.

mod generators;
mod harness;
mod loader;

pub use generators::Gen;
pub use harness::{run_test, run_with_variations};
pub use loader::load_fixtures_by_name;
