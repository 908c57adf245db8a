//! The Fibonacci-GCD search for a single prime pair.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use crate::source::PrimePair;

/// Starting state `(i0, i1)` of a Fibonacci-like recurrence.
///
/// The first tested term is `i1`; each following term is the sum of the
/// previous two, with `i0` standing in before `i1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceSeed {
    pub i0: i64,
    pub i1: i64,
}

impl RecurrenceSeed {
    /// 0, 1: tests 1, 1, 2, 3, 5, ...
    pub const FIBONACCI: RecurrenceSeed = RecurrenceSeed { i0: 0, i1: 1 };
    /// 2, 1: tests 1, 3, 4, 7, 11, ...
    pub const LUCAS: RecurrenceSeed = RecurrenceSeed { i0: 2, i1: 1 };

    pub fn new(i0: i64, i1: i64) -> Self {
        Self { i0, i1 }
    }

    /// Terms `F_0, F_1, ...` of the recurrence.
    pub fn terms(&self) -> impl Iterator<Item = BigInt> {
        let mut prev = BigInt::from(self.i0);
        let mut current = BigInt::from(self.i1);
        std::iter::from_fn(move || {
            let next = &prev + &current;
            prev = std::mem::replace(&mut current, next);
            Some(prev.clone())
        })
    }
}

/// Earliest index with a nontrivial common factor, and that factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub index: u64,
    pub gcd: BigInt,
}

/// One search strategy: a recurrence seed and an optional iteration cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibonacciSearcher {
    seed: RecurrenceSeed,
    max_iterations: Option<u64>,
}

impl FibonacciSearcher {
    pub fn new(seed: RecurrenceSeed) -> Self {
        Self {
            seed,
            max_iterations: None,
        }
    }

    pub fn fibonacci() -> Self {
        Self::new(RecurrenceSeed::FIBONACCI)
    }

    pub fn lucas() -> Self {
        Self::new(RecurrenceSeed::LUCAS)
    }

    /// Give up after testing `cap` terms. Without a cap the search runs
    /// until it finds a factor, which is not known to always happen.
    pub fn with_max_iterations(mut self, cap: u64) -> Self {
        self.max_iterations = Some(cap);
        self
    }

    pub fn seed(&self) -> RecurrenceSeed {
        self.seed
    }

    pub fn max_iterations(&self) -> Option<u64> {
        self.max_iterations
    }

    /// First `k` with `gcd(x*y, x*y + F_k) > 1`.
    ///
    /// Returns `None` only when an iteration cap is set and was reached.
    pub fn search(&self, pair: PrimePair) -> Option<Hit> {
        self.scan(pair, self.max_iterations)
    }

    /// Like [`search`](Self::search), but only indices below `index` count.
    pub fn search_before(&self, pair: PrimePair, index: u64) -> Option<Hit> {
        let limit = self.max_iterations.map_or(index, |cap| cap.min(index));
        self.scan(pair, Some(limit))
    }

    fn scan(&self, pair: PrimePair, limit: Option<u64>) -> Option<Hit> {
        let base = BigInt::from(pair.product());
        let one = BigInt::one();

        let mut index = 0u64;
        for term in self.seed.terms() {
            if limit.is_some_and(|cap| index >= cap) {
                log::trace!(
                    "no factor for ({}, {}) within {} terms of seed {:?}",
                    pair.x,
                    pair.y,
                    index,
                    self.seed
                );
                return None;
            }

            let gcd = base.gcd(&(&base + term));
            if gcd > one {
                return Some(Hit { index, gcd });
            }
            index += 1;
        }

        // `terms` never ends.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn first_terms(seed: RecurrenceSeed, n: usize) -> Vec<i64> {
        seed.terms()
            .take(n)
            .map(|t| i64::try_from(t).unwrap())
            .collect()
    }

    /// Reference search on residues modulo `x*y`, which leave the gcd unchanged.
    fn brute_force(seed: RecurrenceSeed, x: u64, y: u64, cap: u64) -> Option<(u64, u64)> {
        let base = (x * y) as i128;
        let mut a = (seed.i0 as i128).rem_euclid(base);
        let mut b = (seed.i1 as i128).rem_euclid(base);
        for k in 0..cap {
            let g = gcd_i128(base, b);
            if g > 1 {
                return Some((k, g as u64));
            }
            let c = (a + b) % base;
            a = b;
            b = c;
        }
        None
    }

    fn gcd_i128(a: i128, b: i128) -> i128 {
        let (mut a, mut b) = (a.abs(), b.abs());
        while b != 0 {
            let t = a % b;
            a = b;
            b = t;
        }
        a
    }

    #[test]
    fn test_seed_terms() {
        assert_eq!(
            first_terms(RecurrenceSeed::FIBONACCI, 8),
            vec![1, 1, 2, 3, 5, 8, 13, 21]
        );
        assert_eq!(first_terms(RecurrenceSeed::LUCAS, 6), vec![1, 3, 4, 7, 11, 18]);
    }

    #[test]
    fn test_small_pair_hits_at_factor() {
        // base = 15: terms 1, 1, 2, 3 -> gcd(15, 18) = 3 at index 3.
        let hit = FibonacciSearcher::fibonacci()
            .search(PrimePair::new(3, 5))
            .unwrap();
        assert_eq!(hit, Hit { index: 3, gcd: BigInt::from(3) });
    }

    #[test]
    fn test_hit_is_valid_and_minimal() {
        let cap = 5_000;
        let primes = sequence_core::sieve_of_eratosthenes(400);
        for seed in [RecurrenceSeed::FIBONACCI, RecurrenceSeed::LUCAS] {
            let searcher = FibonacciSearcher::new(seed).with_max_iterations(cap);
            for w in primes.windows(2) {
                let pair = PrimePair::new(w[0], w[1]);
                let expected = brute_force(seed, w[0], w[1], cap);
                let hit = match searcher.search(pair) {
                    Some(hit) => hit,
                    None => {
                        assert_eq!(expected, None);
                        continue;
                    }
                };

                let base = BigInt::from(pair.product());
                let term = seed.terms().nth(hit.index as usize).unwrap();
                assert_eq!(hit.gcd, base.gcd(&(&base + &term)));
                assert!(hit.gcd > BigInt::one());
                assert!((&base % &hit.gcd).is_zero());

                for earlier in seed.terms().take(hit.index as usize) {
                    assert_eq!(base.gcd(&(&base + earlier)), BigInt::one());
                }

                let (k, g) = expected.unwrap();
                assert_eq!(hit.index, k);
                assert_eq!(hit.gcd, BigInt::from(g));
            }
        }
    }

    #[test]
    fn test_every_adjacent_pair_terminates_for_fibonacci() {
        // Every prime divides some Fibonacci number, so the uncapped search ends.
        let primes = sequence_core::sieve_of_eratosthenes(400);
        let searcher = FibonacciSearcher::fibonacci();
        for w in primes.windows(2) {
            let hit = searcher.search(PrimePair::new(w[0], w[1])).unwrap();
            assert!(hit.index <= 400);
        }
    }

    #[test]
    fn test_lucas_can_miss_both_primes() {
        // Neither 13 nor 17 divides a Lucas number; only a cap stops this search.
        let searcher = FibonacciSearcher::lucas().with_max_iterations(10_000);
        assert_eq!(searcher.search(PrimePair::new(13, 17)), None);
        assert_eq!(
            FibonacciSearcher::fibonacci().search(PrimePair::new(13, 17)),
            Some(Hit { index: 6, gcd: BigInt::from(13) })
        );
    }

    #[test]
    fn test_cap_reports_not_found() {
        let searcher = FibonacciSearcher::fibonacci().with_max_iterations(2);
        assert_eq!(searcher.search(PrimePair::new(3, 5)), None);
        let searcher = FibonacciSearcher::fibonacci().with_max_iterations(4);
        assert_eq!(searcher.search(PrimePair::new(3, 5)).unwrap().index, 3);
    }

    #[test]
    fn test_search_before_bounds_the_index() {
        let pair = PrimePair::new(13, 17);
        let fib = FibonacciSearcher::fibonacci();
        assert_eq!(fib.search_before(pair, 6), None);
        assert_eq!(fib.search_before(pair, 7).unwrap().index, 6);
        // The tighter of the cap and the bound applies.
        assert_eq!(fib.with_max_iterations(3).search_before(pair, 100), None);
        // An uncapped Lucas search that would never finish stops at the bound.
        assert_eq!(FibonacciSearcher::lucas().search_before(pair, 50), None);
    }

    #[test]
    fn test_product_beyond_u64() {
        // 2^64 - 59 is prime; the product needs 84 bits.
        let pair = PrimePair::new(1_000_033, 18_446_744_073_709_551_557);
        let hit = FibonacciSearcher::fibonacci().search(pair).unwrap();
        assert_eq!(hit, Hit { index: 1170, gcd: BigInt::from(1_000_033u64) });
    }
}
