//! Suppliers of prime pairs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sequence_core::sieve_of_eratosthenes;

/// Two primes handed to a searcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimePair {
    pub x: u64,
    pub y: u64,
}

impl PrimePair {
    pub fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }

    /// `x * y`, exact.
    pub fn product(&self) -> u128 {
        self.x as u128 * self.y as u128
    }
}

/// Something that hands out prime pairs until it decides it is done.
pub trait PrimeSource {
    /// Whether another call to [`next_pair`](PrimeSource::next_pair) will
    /// produce a pair.
    fn has_more(&self) -> bool;

    /// The next pair, or `None` once [`has_more`](PrimeSource::has_more) is false.
    fn next_pair(&mut self) -> Option<PrimePair>;
}

/// Drain a [`PrimeSource`] as an iterator.
pub fn pairs<S: PrimeSource + ?Sized>(source: &mut S) -> impl Iterator<Item = PrimePair> + '_ {
    std::iter::from_fn(move || source.next_pair())
}

/// Adjacent pairs `(p_i, p_{i+1})` of the primes below a bound, in order.
#[derive(Debug, Clone)]
pub struct SequentialSource {
    primes: Vec<u64>,
    cursor: usize,
}

impl SequentialSource {
    pub fn new(bound: u64) -> Self {
        Self::from_primes(sieve_of_eratosthenes(bound))
    }

    pub fn from_primes(primes: Vec<u64>) -> Self {
        Self { primes, cursor: 0 }
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }
}

impl PrimeSource for SequentialSource {
    fn has_more(&self) -> bool {
        self.cursor + 1 < self.primes.len()
    }

    fn next_pair(&mut self) -> Option<PrimePair> {
        if !self.has_more() {
            return None;
        }
        let pair = PrimePair::new(self.primes[self.cursor], self.primes[self.cursor + 1]);
        self.cursor += 1;
        Some(pair)
    }
}

/// Two independently, uniformly drawn primes per call.
///
/// The source stops after `len - 1` calls, the same count as
/// [`SequentialSource`]. That is a cutoff on calls, not on distinct pairs:
/// repeats are possible and most of the pair space is never visited.
#[derive(Debug, Clone)]
pub struct RandomSource {
    primes: Vec<u64>,
    calls: usize,
    rng: StdRng,
}

impl RandomSource {
    pub fn new(bound: u64, seed: u64) -> Self {
        Self::from_primes(sieve_of_eratosthenes(bound), seed)
    }

    pub fn from_primes(primes: Vec<u64>, seed: u64) -> Self {
        Self {
            primes,
            calls: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }
}

impl PrimeSource for RandomSource {
    fn has_more(&self) -> bool {
        self.calls + 1 < self.primes.len()
    }

    fn next_pair(&mut self) -> Option<PrimePair> {
        if !self.has_more() {
            return None;
        }
        let len = self.primes.len();
        let x = self.primes[self.rng.gen_range(0..len)];
        let y = self.primes[self.rng.gen_range(0..len)];
        self.calls += 1;
        Some(PrimePair::new(x, y))
    }
}
