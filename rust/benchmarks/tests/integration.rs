//! Cross-crate checks: the generators, the scorer and the factor search
//! agreeing with each other.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;

use fibonacci_gcd::{pairs, search_pair, FibonacciSearcher, SequentialSource};
use sequence_core::{collatz, fibonacci, prime_factors, smooth_series, SmoothBasis, WorkerPool};
use uniqueness_score::{
    lookup_source, score_entry, sum_product_score, sweep, CorpusEntry, Leaderboard,
    ScoringPipeline,
};

fn collatz_entry(start: u64) -> CorpusEntry {
    let terms = collatz(&BigInt::from(start)).unwrap();
    CorpusEntry {
        name: format!("C{:06}", start),
        tokens: terms.iter().map(|t| t.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Fibonacci-GCD
// ---------------------------------------------------------------------------

#[test]
fn test_hits_agree_with_fast_doubling() {
    // The searcher's term k is F(k + 1) of the standard sequence.
    let strategies = [FibonacciSearcher::fibonacci()];
    for pair in pairs(&mut SequentialSource::new(600)) {
        let found = search_pair(pair, &strategies).unwrap();
        let base = BigUint::from(pair.x) * BigUint::from(pair.y);
        let term = fibonacci(found.index + 1);

        let gcd = base.gcd(&term);
        assert_eq!(BigInt::from(gcd), found.gcd, "pair ({}, {})", pair.x, pair.y);
        for k in 1..=found.index {
            assert_eq!(base.gcd(&fibonacci(k)), BigUint::from(1u32));
        }
    }
}

#[test]
fn test_gcd_is_a_product_of_the_pair() {
    let strategies = [FibonacciSearcher::fibonacci(), FibonacciSearcher::lucas()];
    for pair in pairs(&mut SequentialSource::new(3_000)) {
        let found = search_pair(pair, &strategies).unwrap();
        let factors = prime_factors(&BigUint::from(pair.product()));
        assert_eq!(factors, vec![BigUint::from(pair.x), BigUint::from(pair.y)]);

        let gcd = found.gcd.magnitude().clone();
        let product = BigUint::from(pair.product());
        assert!(factors.contains(&gcd) || gcd == product);
    }
}

// ---------------------------------------------------------------------------
// Uniqueness scoring
// ---------------------------------------------------------------------------

#[test]
fn test_collatz_trajectories_rank_like_serial_scoring() {
    let starts = 1..=300u64;

    let mut expected = Leaderboard::with_capacity(32);
    for start in starts.clone() {
        expected.insert(score_entry(collatz_entry(start)).unwrap());
    }

    let pool = WorkerPool::new(4).unwrap();
    let board = ScoringPipeline::new(&pool)
        .with_leaderboard_capacity(32)
        .run(starts.map(|s| Ok(collatz_entry(s))))
        .unwrap();

    assert_eq!(board, expected);
    assert_eq!(board.filled().count(), 32);
}

#[test]
fn test_sweep_matches_direct_scoring() {
    let pool = WorkerPool::new(3).unwrap();
    let source = lookup_source("sevenSmoothComplement").unwrap();
    let report = sweep(&pool, &source, 40).unwrap();

    let basis = SmoothBasis::seven();
    assert_eq!(report.results.len(), 39);
    for r in &report.results {
        let direct = sum_product_score(&smooth_series(r.size, &basis, true));
        assert_eq!(r.score, direct);
    }
    let best = report.best().unwrap();
    assert!(report
        .results
        .iter()
        .all(|r| r.score.combined >= best.score.combined));
}
