//! Fan the searcher out over every pair a [`PrimeSource`] produces.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use sequence_core::{Result, SequenceError, WorkerPool};

use crate::searcher::FibonacciSearcher;
use crate::source::{pairs, PrimePair, PrimeSource};

/// Outcome of the search for one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorResult {
    pub x: u64,
    pub y: u64,
    pub index: u64,
    pub gcd: BigInt,
}

impl FactorResult {
    /// `gcd / index`; infinite when the factor showed up at index 0.
    pub fn slope(&self) -> f64 {
        let gcd = self.gcd.to_f64().unwrap_or(f64::INFINITY);
        if self.index == 0 {
            f64::INFINITY
        } else {
            gcd / self.index as f64
        }
    }
}

/// Run every strategy on `pair` and keep the smallest index.
///
/// On equal indices the earlier strategy wins, so once one strategy has a
/// hit the later ones only look below its index. `None` means every
/// strategy hit its iteration cap.
pub fn search_pair(pair: PrimePair, strategies: &[FibonacciSearcher]) -> Option<FactorResult> {
    let mut best: Option<FactorResult> = None;
    for searcher in strategies {
        let hit = match &best {
            Some(b) => searcher.search_before(pair, b.index),
            None => searcher.search(pair),
        };
        if let Some(hit) = hit {
            best = Some(FactorResult {
                x: pair.x,
                y: pair.y,
                index: hit.index,
                gcd: hit.gcd,
            });
        }
    }
    best
}

/// All results of one run, in completion order.
#[derive(Debug, Clone, Default)]
pub struct FactorReport {
    pub results: Vec<FactorResult>,
    /// Pairs for which no strategy found a factor before its cap.
    pub skipped: usize,
}

impl FactorReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Ascending by `x`, then `y`.
    pub fn by_x(&self) -> Vec<FactorResult> {
        let mut sorted = self.results.clone();
        sorted.sort_by(|a, b| (a.x, a.y).cmp(&(b.x, b.y)));
        sorted
    }

    /// Ascending by [`FactorResult::slope`], then `x`.
    pub fn by_slope(&self) -> Vec<FactorResult> {
        let mut sorted = self.results.clone();
        sorted.sort_by(|a, b| a.slope().total_cmp(&b.slope()).then(a.x.cmp(&b.x)));
        sorted
    }
}

/// Searches every pair of a source on a [`WorkerPool`].
pub struct FactorSearchPipeline<'a> {
    pool: &'a WorkerPool,
    strategies: Vec<FibonacciSearcher>,
}

impl<'a> FactorSearchPipeline<'a> {
    pub fn new(pool: &'a WorkerPool, strategies: Vec<FibonacciSearcher>) -> Result<Self> {
        if strategies.is_empty() {
            return Err(SequenceError::invalid_input(
                "factor search needs at least one strategy",
            ));
        }
        Ok(Self { pool, strategies })
    }

    pub fn strategies(&self) -> &[FibonacciSearcher] {
        &self.strategies
    }

    /// Draw pairs from `source` on the calling thread until it runs dry,
    /// searching each on the pool.
    pub fn run<S>(&self, source: &mut S) -> Result<FactorReport>
    where
        S: PrimeSource + ?Sized,
    {
        let strategies = &self.strategies;
        let mut report = FactorReport::default();

        let searched = self.pool.run(
            pairs(source).map(Ok::<_, SequenceError>),
            |pair| (pair, search_pair(pair, strategies)),
            |(pair, found)| {
                match found {
                    Some(result) => {
                        log::debug!(
                            "({}, {}) -> index {}, gcd {}",
                            result.x,
                            result.y,
                            result.index,
                            result.gcd
                        );
                        report.results.push(result);
                    }
                    None => {
                        log::warn!("skipping ({}, {}): no factor found", pair.x, pair.y);
                        report.skipped += 1;
                    }
                }
                Ok(())
            },
        )?;

        log::info!(
            "searched {} pairs with {} workers, {} skipped",
            searched,
            self.pool.capacity(),
            report.skipped
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::RecurrenceSeed;
    use crate::source::{RandomSource, SequentialSource};

    fn result(x: u64, y: u64, index: u64, gcd: u64) -> FactorResult {
        FactorResult {
            x,
            y,
            index,
            gcd: BigInt::from(gcd),
        }
    }

    #[test]
    fn test_search_pair_prefers_smaller_index() {
        let pair = PrimePair::new(13, 17);
        let capped_lucas = FibonacciSearcher::lucas().with_max_iterations(1000);
        let fib = FibonacciSearcher::fibonacci();

        let found = search_pair(pair, &[capped_lucas, fib]).unwrap();
        assert_eq!(found, result(13, 17, 6, 13));

        // The uncapped Lucas search is bounded by the earlier hit.
        let found = search_pair(pair, &[fib, FibonacciSearcher::lucas()]).unwrap();
        assert_eq!(found, result(13, 17, 6, 13));

        // (3, 5): Lucas hits at 1, Fibonacci only at 3.
        let found = search_pair(PrimePair::new(3, 5), &[fib, FibonacciSearcher::lucas()]);
        assert_eq!(found, Some(result(3, 5, 1, 3)));

        assert_eq!(search_pair(pair, &[capped_lucas]), None);
    }

    #[test]
    fn test_search_pair_first_strategy_wins_ties() {
        let pair = PrimePair::new(3, 5);
        let first = FibonacciSearcher::fibonacci();
        // Same terms from index 0 on, so the same index and gcd.
        let second = FibonacciSearcher::new(RecurrenceSeed::new(0, 1));
        assert_eq!(
            search_pair(pair, &[first, second]),
            search_pair(pair, &[first])
        );
    }

    #[test]
    fn test_slope() {
        assert_eq!(result(3, 5, 3, 3).slope(), 1.0);
        assert_eq!(result(13, 17, 6, 13).slope(), 13.0 / 6.0);
        assert!(result(2, 3, 0, 2).slope().is_infinite());
    }

    #[test]
    fn test_report_orderings() {
        let report = FactorReport {
            results: vec![
                result(7, 11, 4, 7),
                result(3, 5, 3, 3),
                result(5, 7, 1, 5),
                result(2, 3, 0, 2),
                result(2, 5, 2, 2),
            ],
            skipped: 0,
        };

        let xs: Vec<(u64, u64)> = report.by_x().iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(xs, vec![(2, 3), (2, 5), (3, 5), (5, 7), (7, 11)]);

        let slopes: Vec<(u64, u64)> = report.by_slope().iter().map(|r| (r.x, r.y)).collect();
        // 1.0, 1.0 (tie broken by x), 1.75, 5.0, inf
        assert_eq!(slopes, vec![(2, 5), (3, 5), (7, 11), (5, 7), (2, 3)]);
    }

    #[test]
    fn test_pipeline_requires_a_strategy() {
        let pool = WorkerPool::new(1).unwrap();
        assert!(FactorSearchPipeline::new(&pool, Vec::new()).is_err());
    }

    #[test]
    fn test_sequential_run_covers_every_pair() {
        let pool = WorkerPool::new(3).unwrap();
        let pipeline = FactorSearchPipeline::new(&pool, vec![FibonacciSearcher::fibonacci()]).unwrap();
        let mut source = SequentialSource::new(400);
        let primes = source.primes().to_vec();

        let report = pipeline.run(&mut source).unwrap();
        assert_eq!(report.len(), primes.len() - 1);
        assert_eq!(report.skipped, 0);

        for (r, w) in report.by_x().iter().zip(primes.windows(2)) {
            assert_eq!((r.x, r.y), (w[0], w[1]));
            let g = &r.gcd;
            assert!(*g == BigInt::from(r.x) || *g == BigInt::from(r.y) || *g == BigInt::from(r.x * r.y));
        }
    }

    #[test]
    fn test_pool_size_does_not_change_results() {
        let run = |workers: usize| {
            let pool = WorkerPool::new(workers).unwrap();
            let pipeline =
                FactorSearchPipeline::new(&pool, vec![FibonacciSearcher::fibonacci()]).unwrap();
            pipeline.run(&mut RandomSource::new(300, 9)).unwrap().by_x()
        };
        let baseline = run(1);
        assert_eq!(run(2), baseline);
        assert_eq!(run(5), baseline);
    }

    #[test]
    fn test_capped_misses_are_skipped() {
        let pool = WorkerPool::new(2).unwrap();
        let pipeline = FactorSearchPipeline::new(
            &pool,
            vec![FibonacciSearcher::lucas().with_max_iterations(2000)],
        )
        .unwrap();
        let mut source = SequentialSource::from_primes(vec![3, 5, 13, 17]);

        let report = pipeline.run(&mut source).unwrap();
        // Lucas terms never pick up a factor of 5*13 or 13*17.
        assert_eq!(report.skipped, 2);
        assert_eq!(report.results, vec![result(3, 5, 1, 3)]);
    }
}
