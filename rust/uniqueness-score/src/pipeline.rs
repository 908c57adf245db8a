//! Concurrent scoring of a corpus into a [`Leaderboard`].

use sequence_core::{Result, WorkerPool};

use crate::corpus::CorpusEntry;
use crate::leaderboard::{Leaderboard, ScoreRecord, LEADERBOARD_CAPACITY};
use crate::scorer::sum_product_score;

/// Score one corpus entry on its distinct integers.
///
/// This is the only path that deduplicates before scoring; generator output
/// is scored as-is.
pub fn score_entry(entry: CorpusEntry) -> Result<ScoreRecord> {
    let integers = entry.distinct_integers()?;
    let score = sum_product_score(&integers);
    Ok(ScoreRecord::new(entry.name, entry.tokens, score))
}

/// Scores a stream of entries on a [`WorkerPool`] and ranks the results.
pub struct ScoringPipeline<'a> {
    pool: &'a WorkerPool,
    leaderboard_capacity: usize,
}

impl<'a> ScoringPipeline<'a> {
    pub fn new(pool: &'a WorkerPool) -> Self {
        Self {
            pool,
            leaderboard_capacity: LEADERBOARD_CAPACITY,
        }
    }

    pub fn with_leaderboard_capacity(mut self, capacity: usize) -> Self {
        self.leaderboard_capacity = capacity;
        self
    }

    /// Score every entry with [`score_entry`].
    pub fn run<I>(&self, entries: I) -> Result<Leaderboard>
    where
        I: IntoIterator<Item = Result<CorpusEntry>>,
    {
        self.run_with(entries, score_entry)
    }

    /// Score every entry with `score`, folding results into a fresh
    /// leaderboard on the calling thread. The first error aborts the run.
    pub fn run_with<I, F>(&self, entries: I, score: F) -> Result<Leaderboard>
    where
        I: IntoIterator<Item = Result<CorpusEntry>>,
        F: Fn(CorpusEntry) -> Result<ScoreRecord> + Sync,
    {
        let mut leaderboard = Leaderboard::with_capacity(self.leaderboard_capacity);
        let mut improved = 0usize;

        let scored = self.pool.run(entries, score, |record| {
            let record = record?;
            log::debug!("{} scored {:.6}", record.name, record.score.combined);
            if leaderboard.insert(record).is_some() {
                improved += 1;
            }
            Ok(())
        })?;

        log::info!(
            "scored {} sequences with {} workers, {} leaderboard insertions",
            scored,
            self.pool.capacity(),
            improved
        );
        Ok(leaderboard)
    }
}
