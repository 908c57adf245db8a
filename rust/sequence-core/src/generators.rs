//! Deterministic sequence generators.
//!
//! All of them produce exact `BigInt` terms. Apart from [`random_series`],
//! whose output is fixed by its seed, each is a pure function of its inputs.

use std::collections::HashSet;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Result, Sequence, SequenceError};

/// Default number of terms for the progression and random generators.
pub const DEFAULT_LENGTH: usize = 256;

/// Seed used by the random generator unless told otherwise.
pub const DEFAULT_RANDOM_SEED: u64 = 1;

/// Basis of the 7-smooth numbers (OEIS A002473).
pub const SEVEN_SMOOTH_BASIS: [u64; 4] = [2, 3, 5, 7];

/// Collatz trajectory of `start`, including `start` and the final 1.
///
/// No iteration cap is applied: every start ever tested reaches 1, but that
/// is the conjecture, not a theorem.
pub fn collatz(start: &BigInt) -> Result<Sequence> {
    if !start.is_positive() {
        return Err(SequenceError::invalid_input(format!(
            "collatz start must be at least 1, got {}",
            start
        )));
    }

    let mut n = start.clone();
    let mut series = Vec::with_capacity(DEFAULT_LENGTH);
    series.push(n.clone());

    while !n.is_one() {
        if n.is_even() {
            n >>= 1u32;
        } else {
            n = &n * 3u32 + 1u32;
        }
        series.push(n.clone());
    }

    Ok(series)
}

/// `a + b*i` for `i` in `0..length`.
pub fn arithmetic_series(a: &BigInt, b: &BigInt, length: usize) -> Sequence {
    let mut series = Vec::with_capacity(length);
    let mut term = a.clone();
    for _ in 0..length {
        series.push(term.clone());
        term += b;
    }
    series
}

/// `a * b^i` for `i` in `0..length`.
pub fn geometric_series(a: &BigInt, b: &BigInt, length: usize) -> Sequence {
    let mut series = Vec::with_capacity(length);
    let mut term = a.clone();
    for _ in 0..length {
        series.push(term.clone());
        term *= b;
    }
    series
}

/// `length` distinct `u64` values drawn from a generator seeded with `seed`.
///
/// Duplicates are redrawn, so the result always has exactly `length` distinct
/// terms and is identical for identical seeds.
pub fn random_series(length: usize, seed: u64) -> Sequence {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(length);
    let mut series = Vec::with_capacity(length);

    while series.len() < length {
        let number: u64 = rng.gen();
        if seen.insert(number) {
            series.push(BigInt::from(number));
        }
    }

    series
}

/// The set of primes a smooth number may be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmoothBasis {
    primes: Vec<u64>,
}

impl SmoothBasis {
    pub fn new(primes: impl Into<Vec<u64>>) -> Result<Self> {
        let primes = primes.into();
        if primes.is_empty() {
            return Err(SequenceError::invalid_input("smooth basis must not be empty"));
        }
        if let Some(p) = primes.iter().find(|&&p| p < 2) {
            return Err(SequenceError::invalid_input(format!(
                "smooth basis elements must be at least 2, got {}",
                p
            )));
        }
        Ok(Self { primes })
    }

    /// The 7-smooth basis {2, 3, 5, 7}.
    pub fn seven() -> Self {
        Self {
            primes: SEVEN_SMOOTH_BASIS.to_vec(),
        }
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    /// Whether `n` factors completely over the basis. 1 is smooth; 0 is not.
    pub fn is_smooth(&self, mut n: u64) -> bool {
        if n == 0 {
            return false;
        }
        for &p in &self.primes {
            while n % p == 0 {
                n /= p;
            }
        }
        n == 1
    }
}

impl Default for SmoothBasis {
    fn default() -> Self {
        Self::seven()
    }
}

/// First `size` positive integers that are smooth over `basis`, or, with
/// `complement`, the first `size` that are not.
pub fn smooth_series(size: usize, basis: &SmoothBasis, complement: bool) -> Sequence {
    (1u64..)
        .filter(|&n| basis.is_smooth(n) != complement)
        .take(size)
        .map(BigInt::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Sequence {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn test_collatz_13() {
        let series = collatz(&BigInt::from(13)).unwrap();
        assert_eq!(series, ints(&[13, 40, 20, 10, 5, 16, 8, 4, 2, 1]));
    }

    #[test]
    fn test_collatz_one_is_single_term() {
        assert_eq!(collatz(&BigInt::from(1)).unwrap(), ints(&[1]));
    }

    #[test]
    fn test_collatz_always_ends_in_one() {
        for start in 1..500 {
            let series = collatz(&BigInt::from(start)).unwrap();
            assert_eq!(series.first(), Some(&BigInt::from(start)));
            assert_eq!(series.last(), Some(&BigInt::one()));
            assert_eq!(series.iter().filter(|v| v.is_one()).count(), 1);
        }
    }

    #[test]
    fn test_collatz_beyond_u64() {
        // 2^70 + 1 is odd, so the second term is 3 * (2^70 + 1) + 1.
        let start = (BigInt::one() << 70u32) + 1u32;
        let series = collatz(&start).unwrap();
        assert_eq!(series[1], &start * 3u32 + 1u32);
        assert!(series.last().unwrap().is_one());
    }

    #[test]
    fn test_collatz_rejects_non_positive() {
        assert!(matches!(
            collatz(&BigInt::from(0)),
            Err(SequenceError::InvalidInput(_))
        ));
        assert!(collatz(&BigInt::from(-5)).is_err());
    }

    #[test]
    fn test_arithmetic_series() {
        let series = arithmetic_series(&BigInt::from(2), &BigInt::from(3), DEFAULT_LENGTH);
        assert_eq!(series.len(), 256);
        assert_eq!(series[..4], ints(&[2, 5, 8, 11])[..]);
        assert_eq!(series[255], BigInt::from(2 + 3 * 255));
    }

    #[test]
    fn test_geometric_series_is_exact() {
        let series = geometric_series(&BigInt::from(2), &BigInt::from(3), DEFAULT_LENGTH);
        assert_eq!(series[..4], ints(&[2, 6, 18, 54])[..]);
        let expected = BigInt::from(2) * BigInt::from(3).pow(255u32);
        assert_eq!(series[255], expected);
    }

    #[test]
    fn test_geometric_ratio_one_is_constant() {
        let series = geometric_series(&BigInt::from(7), &BigInt::one(), 5);
        assert_eq!(series, ints(&[7, 7, 7, 7, 7]));
    }

    #[test]
    fn test_seven_smooth_prefix() {
        let series = smooth_series(16, &SmoothBasis::seven(), false);
        assert_eq!(
            series,
            ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 14, 15, 16, 18, 20])
        );
    }

    #[test]
    fn test_seven_smooth_complement_prefix() {
        let series = smooth_series(8, &SmoothBasis::seven(), true);
        assert_eq!(series, ints(&[11, 13, 17, 19, 22, 23, 26, 29]));
    }

    #[test]
    fn test_smooth_and_complement_partition_integers() {
        let basis = SmoothBasis::seven();
        let smooth = smooth_series(50, &basis, false);
        let rough = smooth_series(50, &basis, true);
        for v in &smooth {
            assert!(!rough.contains(v));
        }
    }

    #[test]
    fn test_smooth_basis_validation() {
        assert!(SmoothBasis::new(Vec::new()).is_err());
        assert!(SmoothBasis::new(vec![2, 1]).is_err());
        let basis = SmoothBasis::new(vec![2]).unwrap();
        assert_eq!(smooth_series(5, &basis, false), ints(&[1, 2, 4, 8, 16]));
    }

    #[test]
    fn test_random_series_distinct_and_reproducible() {
        let a = random_series(DEFAULT_LENGTH, DEFAULT_RANDOM_SEED);
        let b = random_series(DEFAULT_LENGTH, DEFAULT_RANDOM_SEED);
        assert_eq!(a, b);
        let distinct: HashSet<_> = a.iter().collect();
        assert_eq!(distinct.len(), DEFAULT_LENGTH);
        assert!(a.iter().all(|v| !v.is_negative()));
    }

    #[test]
    fn test_random_series_depends_on_seed() {
        assert_ne!(random_series(16, 1), random_series(16, 2));
    }
}
