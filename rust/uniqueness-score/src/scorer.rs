//! The uniqueness score of a single sequence.

use std::collections::HashSet;
use std::f64::consts::SQRT_2;

use num_bigint::BigInt;
use serde::Serialize;

/// Two-component uniqueness score.
///
/// `sum` and `product` are the fractions of distinct pairwise sums and
/// products relative to `n(n+1)/2`; `combined` is their Euclidean norm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub sum: f64,
    pub product: f64,
    pub combined: f64,
}

impl Score {
    pub fn new(sum: f64, product: f64) -> Self {
        Self {
            sum,
            product,
            combined: (sum * sum + product * product).sqrt(),
        }
    }

    /// The worst attainable score, used for empty leaderboard slots.
    pub fn worst() -> Self {
        Self {
            sum: 0.0,
            product: 0.0,
            combined: SQRT_2,
        }
    }
}

/// Score `series` by counting distinct pairwise sums and products.
///
/// Pairs are drawn with repetition; since both operations commute, only
/// `x_i, x_j` with `i <= j` are evaluated. Duplicated terms are not removed
/// here, so they lower the score. An empty series scores zero.
pub fn sum_product_score(series: &[BigInt]) -> Score {
    let n = series.len();
    if n == 0 {
        return Score::new(0.0, 0.0);
    }

    let pairs = n * (n + 1) / 2;
    let mut sums: HashSet<BigInt> = HashSet::with_capacity(pairs);
    let mut products: HashSet<BigInt> = HashSet::with_capacity(pairs);

    for (i, x) in series.iter().enumerate() {
        for y in &series[i..] {
            sums.insert(x + y);
            products.insert(x * y);
        }
    }

    let max = pairs as f64;
    Score::new(sums.len() as f64 / max, products.len() as f64 / max)
}
