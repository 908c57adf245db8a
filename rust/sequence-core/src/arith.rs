//! Small number-theory helpers used alongside the generators.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Prime factors of `n` by trial division, ascending, with multiplicity.
///
/// 0 and 1 have no prime factors.
pub fn prime_factors(n: &BigUint) -> Vec<BigUint> {
    let mut factors = Vec::new();
    if n.is_zero() {
        return factors;
    }

    let mut remaining = n.clone();
    let two = BigUint::from(2u32);

    while remaining.is_even() {
        factors.push(two.clone());
        remaining >>= 1u32;
    }

    let mut divisor = BigUint::from(3u32);
    while &divisor * &divisor <= remaining {
        while (&remaining % &divisor).is_zero() {
            factors.push(divisor.clone());
            remaining /= &divisor;
        }
        divisor += 2u32;
    }

    if remaining > BigUint::one() {
        factors.push(remaining);
    }

    factors
}

/// Histogram of 2-adic valuations over the even numbers in `2..limit`.
///
/// `histogram[v]` is how many of them are divisible by exactly `2^v`.
pub fn two_adic_histogram(limit: u64) -> Vec<u64> {
    let mut histogram: Vec<u64> = Vec::new();
    for i in (2..limit).step_by(2) {
        let v = i.trailing_zeros() as usize;
        if histogram.len() <= v {
            histogram.resize(v + 1, 0);
        }
        histogram[v] += 1;
    }
    histogram
}

/// The `n`-th Fibonacci number (`F(0) = 0`, `F(1) = 1`) by fast doubling.
pub fn fibonacci(n: u64) -> BigUint {
    let mut a = BigUint::zero();
    let mut b = BigUint::one();

    for bit in (0..u64::BITS - n.leading_zeros()).rev() {
        // (a, b) = (F(k), F(k+1)) -> (F(2k), F(2k+1))
        let c = &a * ((&b << 1u32) - &a);
        let d = &a * &a + &b * &b;
        if (n >> bit) & 1 == 1 {
            b = &c + &d;
            a = d;
        } else {
            a = c;
            b = d;
        }
    }

    a
}
