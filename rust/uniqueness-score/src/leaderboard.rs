//! Fixed-capacity, score-sorted set of the best records seen so far.

use std::cmp::Ordering;

use serde::Serialize;

use crate::scorer::Score;

/// Number of entries kept by [`Leaderboard::new`].
pub const LEADERBOARD_CAPACITY: usize = 256;

/// A scored, named sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub name: String,
    /// The terms as they were read, before parsing and deduplication.
    pub numbers: Vec<String>,
    pub score: Score,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, numbers: Vec<String>, score: Score) -> Self {
        Self {
            name: name.into(),
            numbers,
            score,
        }
    }

    /// Placeholder occupying a slot no real record has claimed yet.
    pub fn sentinel() -> Self {
        Self::new(String::new(), Vec::new(), Score::worst())
    }

    /// True when `self` ranks strictly ahead of `other`: a lower combined
    /// score, or an equal score and a lexicographically smaller name.
    pub fn beats(&self, other: &ScoreRecord) -> bool {
        match self.score.combined.partial_cmp(&other.score.combined) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => self.name < other.name,
            _ => false,
        }
    }
}

/// The `capacity` lowest-scoring records, ascending by `(combined, name)`.
///
/// Always holds exactly `capacity` entries; slots not yet taken by a real
/// record hold [`ScoreRecord::sentinel`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    entries: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::with_capacity(LEADERBOARD_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: vec![ScoreRecord::sentinel(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Place `record` ahead of the first entry it beats, shifting the rest
    /// down and dropping the last. Returns the slot it landed in, or `None`
    /// if it beat nothing and was discarded.
    pub fn insert(&mut self, record: ScoreRecord) -> Option<usize> {
        let slot = self.entries.iter().position(|entry| record.beats(entry))?;
        self.entries.insert(slot, record);
        self.entries.pop();
        Some(slot)
    }

    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreRecord> {
        self.entries.iter()
    }

    /// Entries that came from real records, skipping unfilled slots.
    pub fn filled(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.entries.iter().filter(|r| !r.name.is_empty())
    }

    pub fn into_entries(self) -> Vec<ScoreRecord> {
        self.entries
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a ScoreRecord;
    type IntoIter = std::slice::Iter<'a, ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
