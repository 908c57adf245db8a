//! Pairwise sum/product "uniqueness" scoring of integer sequences.
//!
//! A sequence whose pairwise sums and products collide a lot scores low. The
//! crate scores single sequences, sweeps a generator across sizes, and ranks
//! an entire OEIS-style corpus into a fixed-size [`Leaderboard`] using a
//! bounded worker pool.

pub mod corpus;
pub mod leaderboard;
pub mod pipeline;
pub mod report;
pub mod scorer;
pub mod sweep;

pub use corpus::{open_corpus, parse_line, CorpusEntry, CorpusReader};
pub use leaderboard::{Leaderboard, ScoreRecord, LEADERBOARD_CAPACITY};
pub use pipeline::{score_entry, ScoringPipeline};
pub use scorer::{sum_product_score, Score};
pub use sweep::{lookup_source, sweep, sweep_sources, SizeScore, SweepReport, SweepSource};
