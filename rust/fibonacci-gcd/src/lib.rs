//! Fibonacci-GCD factor search.
//!
//! For a pair of primes `(x, y)` with `base = x*y`, walk a Fibonacci-like
//! recurrence `F_k` and stop at the first `k` where `gcd(base, base + F_k)`
//! is nontrivial. The index at which that happens, and which factor shows
//! up, is what the experiment records for every pair a [`PrimeSource`]
//! hands out.

pub mod pipeline;
pub mod report;
pub mod searcher;
pub mod source;

pub use pipeline::{search_pair, FactorReport, FactorResult, FactorSearchPipeline};
pub use searcher::{FibonacciSearcher, Hit, RecurrenceSeed};
pub use source::{pairs, PrimePair, PrimeSource, RandomSource, SequentialSource};
