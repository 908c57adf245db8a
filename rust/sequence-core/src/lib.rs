//! Shared types and utilities for the sequence uniqueness and Fibonacci-GCD experiments.
//!
//! Every sequence is a `Vec<BigInt>`: Collatz trajectories and geometric
//! progressions leave the 64-bit range for modest inputs, and OEIS corpus
//! entries carry negative terms, so all arithmetic here is exact.

pub mod arith;
pub mod error;
pub mod generators;
pub mod output;
pub mod periodic;
pub mod pool;
pub mod sieve;

use num_bigint::BigInt;

pub use arith::{fibonacci, prime_factors, two_adic_histogram};
pub use error::SequenceError;
pub use generators::{
    arithmetic_series, collatz, geometric_series, random_series, smooth_series, SmoothBasis,
    DEFAULT_LENGTH, DEFAULT_RANDOM_SEED, SEVEN_SMOOTH_BASIS,
};
pub use output::{create_gzip, finish_gzip};
pub use periodic::{load_periodic_table, neutron_counts, Element};
pub use pool::{default_capacity, WorkerPool};
pub use sieve::sieve_of_eratosthenes;

/// An ordered, immutable run of arbitrary-precision integers.
pub type Sequence = Vec<BigInt>;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SequenceError>;
