//! Session state: current screen, cumulative score, active level
//!
//! Transitions live in [`tick`](super::tick); this module holds the data and
//! the read-only views the presentation layer consumes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::levels::{CATALOG, LevelEngine, LevelInfo, LevelSnapshot, LevelStatus};
use crate::highscores::{HighScoreEntry, HighScoreStore, HighScores};

/// Which screen is active (exactly one at a time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Title screen
    Menu,
    /// Pick a level 1-4
    LevelSelect,
    /// A level engine is running
    Playing,
    /// Last level failed; retry, level select or menu
    GameOver,
    /// Leaderboard
    Scoreboard,
}

/// Outcome of the most recently resolved level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelResult {
    pub level: u8,
    pub status: LevelStatus,
    /// Level score including time bonus
    pub level_score: u32,
    /// Cumulative score after this level
    pub total_score: u64,
    /// Leaderboard rank earned, if any
    pub rank: Option<usize>,
}

#[derive(Debug)]
pub struct GameSession {
    pub(super) screen: Screen,
    /// Cumulative score; only reset on the way back to the menu
    pub(super) score: u64,
    /// Last level started (for retry)
    pub(super) current_level: Option<u8>,
    pub(super) engine: Option<LevelEngine>,
    pub(super) high_scores: HighScoreStore,
    pub(super) player_name: String,
    pub(super) rng: Pcg32,
    pub(super) running: bool,
    pub(super) last_result: Option<LevelResult>,
    /// Board rank the current total was saved at; cleared when the total resets
    pub(super) recorded_rank: Option<usize>,
}

impl GameSession {
    /// Create a session on the menu screen
    pub fn new(high_scores: HighScoreStore, player_name: impl Into<String>, seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            score: 0,
            current_level: None,
            engine: None,
            high_scores,
            player_name: player_name.into(),
            rng: Pcg32::seed_from_u64(seed),
            running: true,
            last_result: None,
            recorded_rank: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Cumulative session score
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn current_level(&self) -> Option<u8> {
        self.current_level
    }

    pub fn engine(&self) -> Option<&LevelEngine> {
        self.engine.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        self.high_scores.scores()
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn last_result(&self) -> Option<LevelResult> {
        self.last_result
    }

    /// Cumulative score would make the board and isn't on it yet
    pub fn is_new_high_score(&self) -> bool {
        self.score > 0 && self.recorded_rank.is_none() && self.high_scores.qualifies(self.score)
    }

    /// Rank the current total holds on the board, or would take if saved now
    pub fn high_score_rank(&self) -> Option<usize> {
        if self.score == 0 {
            return None;
        }
        self.recorded_rank
            .or_else(|| self.high_scores().potential_rank(self.score))
    }

    /// Seed for the next level instance
    pub(super) fn next_level_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self, now_ms: u64) -> SessionSnapshot {
        let scores = self.high_scores();
        SessionSnapshot {
            screen: self.screen,
            total_score: self.score,
            best_score: scores.top_score(),
            current_level: self.current_level,
            level: self.engine.as_ref().map(|engine| engine.snapshot(now_ms)),
            high_scores: scores.entries.clone(),
            new_high_score: self.is_new_high_score(),
            high_score_rank: self.high_score_rank(),
            last_result: self.last_result,
            levels: CATALOG.to_vec(),
        }
    }
}

/// Everything a renderer needs for any screen
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub total_score: u64,
    pub best_score: Option<u64>,
    pub current_level: Option<u8>,
    pub level: Option<LevelSnapshot>,
    pub high_scores: Vec<HighScoreEntry>,
    pub new_high_score: bool,
    pub high_score_rank: Option<usize>,
    pub last_result: Option<LevelResult>,
    pub levels: Vec<LevelInfo>,
}
