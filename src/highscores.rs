//! High score leaderboard system
//!
//! Tracks the top 10 scores, persisted through a [`ScoreBackend`]. The store
//! is fail-safe: unreadable data falls back to a seed list and failed writes
//! are logged, never surfaced to gameplay.

use serde::{Deserialize, Serialize};

use crate::persistence::{ScoreBackend, decode_entries, encode_entries, sanitize_name};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name (no commas or line breaks)
    pub name: String,
    /// Cumulative session score
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// High score leaderboard, sorted descending; ties keep arrival order
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Seed board used when nothing can be loaded
    pub fn seeded() -> Self {
        Self::from_entries(vec![
            HighScoreEntry::new("CPU", 1000),
            HighScoreEntry::new("PLAYER", 800),
            HighScoreEntry::new("RETRO", 600),
        ])
    }

    /// Build from arbitrary entries: stable sort descending, keep the top 10
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry::new(sanitize_name(name), score);

        // Insert after any equal scores so ties keep arrival order
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Leaderboard plus its backing store
#[derive(Debug)]
pub struct HighScoreStore {
    backend: Box<dyn ScoreBackend>,
    scores: HighScores,
}

impl HighScoreStore {
    /// Open a store and load its current contents
    pub fn open(backend: Box<dyn ScoreBackend>) -> Self {
        let mut store = Self {
            backend,
            scores: HighScores::new(),
        };
        store.scores = store.load();
        store
    }

    /// Read persisted entries; any read failure yields the seed board
    pub fn load(&self) -> HighScores {
        match self.backend.read() {
            Ok(text) => {
                let scores = HighScores::from_entries(decode_entries(&text));
                log::info!(
                    "Loaded {} high scores from {}",
                    scores.len(),
                    self.backend.describe()
                );
                scores
            }
            Err(err) => {
                log::info!(
                    "No high scores at {} ({err}), using defaults",
                    self.backend.describe()
                );
                HighScores::seeded()
            }
        }
    }

    /// Overwrite persisted contents with `scores`; failures are logged only
    pub fn save(&mut self, scores: &HighScores) {
        match self.backend.write(&encode_entries(&scores.entries)) {
            Ok(()) => log::info!("High scores saved ({} entries)", scores.len()),
            Err(err) => log::warn!(
                "Failed to save high scores to {}: {err}",
                self.backend.describe()
            ),
        }
    }

    /// Insert, sort, truncate and persist.
    /// Returns the rank achieved, None if the score fell off the board.
    pub fn add(&mut self, name: &str, score: u64) -> Option<usize> {
        let rank = self.scores.add_score(name, score);
        let scores = self.scores.clone();
        self.save(&scores);
        rank
    }

    /// Cached leaderboard
    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn qualifies(&self, score: u64) -> bool {
        self.scores.qualifies(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryBackend;
    use proptest::prelude::*;

    fn full_board(min: u64) -> HighScores {
        HighScores::from_entries(
            (0..10)
                .map(|i| HighScoreEntry::new(format!("P{i}"), min + i * 10))
                .collect(),
        )
    }

    #[test]
    fn test_seeded_defaults() {
        let scores = HighScores::seeded();
        assert_eq!(scores.len(), 3);
        assert_eq!(scores.top_score(), Some(1000));
        assert_eq!(scores.entries[2].name, "RETRO");
    }

    #[test]
    fn test_low_score_does_not_enter_full_board() {
        let mut scores = full_board(50);
        let before = scores.clone();
        assert_eq!(scores.add_score("X", 50), None);
        assert_eq!(scores, before);
    }

    #[test]
    fn test_beating_minimum_keeps_ten_sorted() {
        let mut scores = full_board(40);
        assert_eq!(scores.add_score("X", 50), Some(10));
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert!(scores.entries.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(scores.entries.last().map(|e| e.score), Some(50));
        assert!(scores.entries.iter().any(|e| e.name == "X"));
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let mut scores = HighScores::new();
        scores.add_score("FIRST", 100);
        scores.add_score("SECOND", 100);
        assert_eq!(scores.add_score("TOP", 200), Some(1));
        let names: Vec<&str> = scores.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["TOP", "FIRST", "SECOND"]);
    }

    #[test]
    fn test_potential_rank() {
        let scores = HighScores::seeded();
        assert_eq!(scores.potential_rank(2000), Some(1));
        assert_eq!(scores.potential_rank(700), Some(3));
        assert_eq!(scores.potential_rank(10), Some(4));
        assert_eq!(full_board(50).potential_rank(50), None);
    }

    #[test]
    fn test_store_falls_back_to_seed_on_missing_data() {
        let store = HighScoreStore::open(Box::new(MemoryBackend::new()));
        assert_eq!(store.scores(), &HighScores::seeded());
    }

    #[test]
    fn test_store_loads_sorted_and_truncated() {
        let text: String = (0..12).map(|i| format!("P{i},{}\n", i * 10)).collect();
        let store = HighScoreStore::open(Box::new(MemoryBackend::with_contents(text)));
        assert_eq!(store.scores().len(), 10);
        assert_eq!(store.scores().top_score(), Some(110));
        assert_eq!(store.scores().entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_store_add_persists() {
        let handle = MemoryBackend::new();
        let mut store = HighScoreStore::open(Box::new(handle.clone()));
        assert_eq!(store.add("ALICE", 900), Some(2));
        assert_eq!(
            handle.contents().as_deref(),
            Some("CPU,1000\nALICE,900\nPLAYER,800\nRETRO,600\n")
        );
        // Reopening sees the saved board
        let reopened = HighScoreStore::open(Box::new(handle));
        assert_eq!(reopened.scores(), store.scores());
    }

    #[test]
    fn test_store_swallows_write_failures() {
        let backend = MemoryBackend::with_contents("CPU,1000\n").failing_writes();
        let mut store = HighScoreStore::open(Box::new(backend));
        assert_eq!(store.add("BOB", 5), Some(2));
        assert_eq!(store.scores().len(), 2);
    }

    proptest! {
        #[test]
        fn board_stays_sorted_and_bounded(scores in prop::collection::vec(0u64..5_000, 0..40)) {
            let mut board = HighScores::new();
            for (i, score) in scores.iter().enumerate() {
                board.add_score(&format!("P{i}"), *score);
                prop_assert!(board.len() <= MAX_HIGH_SCORES);
                prop_assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
            }
            // Same membership as append + stable sort + truncate
            let mut expected: Vec<HighScoreEntry> = scores
                .iter()
                .enumerate()
                .map(|(i, s)| HighScoreEntry::new(format!("P{i}"), *s))
                .collect();
            expected.sort_by(|a, b| b.score.cmp(&a.score));
            expected.truncate(MAX_HIGH_SCORES);
            prop_assert_eq!(board.entries, expected);
        }
    }
}
