//! Score a generator at every size and find where it collides the most.

use serde::Serialize;

use sequence_core::{smooth_series, Result, Sequence, SequenceError, SmoothBasis, WorkerPool};

use crate::scorer::{sum_product_score, Score};

/// A generator that can be swept across sizes.
#[derive(Debug, Clone, Copy)]
pub struct SweepSource {
    /// Identifier used on the command line and in output file names.
    pub key: &'static str,
    /// Human-readable label.
    pub nice: &'static str,
    pub generate: fn(usize) -> Sequence,
    /// Terms printed before a sweep.
    pub preview_size: usize,
    /// Whether the preview is scored as well.
    pub score_preview: bool,
    /// Sweep sizes `1..default_max_size` unless told otherwise.
    pub default_max_size: usize,
}

impl SweepSource {
    /// The first `preview_size` terms, with their score when `score_preview`
    /// is set.
    pub fn preview(&self) -> (Sequence, Option<Score>) {
        let series = (self.generate)(self.preview_size);
        let score = self.score_preview.then(|| sum_product_score(&series));
        (series, score)
    }
}

fn seven_smooth(size: usize) -> Sequence {
    smooth_series(size, &SmoothBasis::seven(), false)
}

fn seven_smooth_complement(size: usize) -> Sequence {
    smooth_series(size, &SmoothBasis::seven(), true)
}

/// Every registered sweep source.
pub fn sweep_sources() -> &'static [SweepSource] {
    const SOURCES: &[SweepSource] = &[
        SweepSource {
            key: "sevenSmooth",
            nice: "seven smooth",
            generate: seven_smooth,
            preview_size: 100,
            score_preview: false,
            default_max_size: 256,
        },
        SweepSource {
            key: "sevenSmoothComplement",
            nice: "seven smooth complement",
            generate: seven_smooth_complement,
            preview_size: 1024,
            score_preview: true,
            default_max_size: 2048,
        },
    ];
    SOURCES
}

pub fn lookup_source(key: &str) -> Result<SweepSource> {
    sweep_sources()
        .iter()
        .find(|s| s.key == key)
        .copied()
        .ok_or_else(|| {
            let known: Vec<&str> = sweep_sources().iter().map(|s| s.key).collect();
            SequenceError::invalid_input(format!(
                "unknown series {:?}, expected one of {}",
                key,
                known.join(", ")
            ))
        })
}

/// Score of a generator at one size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeScore {
    pub size: usize,
    pub score: Score,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub key: &'static str,
    /// Ascending by size.
    pub results: Vec<SizeScore>,
}

impl SweepReport {
    /// The lowest combined score; ties go to the smaller size.
    pub fn best(&self) -> Option<SizeScore> {
        self.results.iter().copied().reduce(|best, candidate| {
            if candidate.score.combined < best.score.combined {
                candidate
            } else {
                best
            }
        })
    }
}

/// Generate and score `source` at every size in `1..max_size` on `pool`.
pub fn sweep(pool: &WorkerPool, source: &SweepSource, max_size: usize) -> Result<SweepReport> {
    let generate = source.generate;
    let mut results = Vec::with_capacity(max_size.saturating_sub(1));

    pool.run(
        (1..max_size).map(Ok::<usize, SequenceError>),
        |size| SizeScore {
            size,
            score: sum_product_score(&generate(size)),
        },
        |result| {
            log::debug!(
                "{} size {}: sum {} product {} score {}",
                source.key,
                result.size,
                result.score.sum,
                result.score.product,
                result.score.combined
            );
            results.push(result);
            Ok(())
        },
    )?;

    results.sort_by_key(|r| r.size);
    Ok(SweepReport {
        key: source.key,
        results,
    })
}
