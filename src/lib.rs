//! DSA Arcade - a retro arcade game about data structures
//!
//! Core modules:
//! - `sim`: Level engines and the session state machine (menus, play, scoring)
//! - `highscores`: Top-10 leaderboard with a pluggable backing store
//! - `persistence`: Score storage backends and the `name,score` line format
//! - `platform`: Monotonic clock and terminal key mapping
//! - `settings`: JSON configuration
//! - `ui`: Terminal presentation built from read-only snapshots

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::LevelError;
pub use highscores::{HighScoreEntry, HighScoreStore, HighScores};
pub use settings::Settings;
pub use sim::{GameSession, LevelEngine, LevelStatus, Screen};

/// Game configuration constants
pub mod consts {
    /// Target frame rate for the render/update loop
    pub const TARGET_FPS: u32 = 60;

    /// Time bonus awarded per remaining second when a level resolves
    pub const TIME_BONUS_PER_SECOND: u64 = 10;

    /// Remaining time under which the HUD asks the player to hurry
    pub const HURRY_THRESHOLD_MS: u64 = 10_000;

    /// Penalty for a wrong answer (score is floored at 0)
    pub const WRONG_ANSWER_PENALTY: u32 = 20;

    /// Array level
    pub const ARRAY_LEN: usize = 10;
    pub const ARRAY_MAX_VALUE: u32 = 50;
    pub const ARRAY_MAX_ATTEMPTS: u32 = 3;
    pub const ARRAY_HIT_REWARD: u32 = 100;
    pub const ARRAY_WIN_SCORE: u32 = 500;

    /// Stack level
    pub const STACK_TARGET_LEN: usize = 5;
    pub const STACK_MATCH_BONUS: u32 = 100;

    /// Queue level
    pub const QUEUE_CAPACITY: usize = 15;
    pub const QUEUE_SPAWN_INTERVAL_MS: u64 = 2000;
    pub const QUEUE_PROCESS_REWARD: u32 = 25;
    pub const QUEUE_TARGET_PROCESSED: usize = 10;

    /// Binary search level
    pub const SEARCH_LEN: usize = 15;
    pub const SEARCH_MAX_VALUE: u32 = 100;
    /// ceil(log2(15))
    pub const SEARCH_MAX_COMPARISONS: u32 = 4;
    pub const SEARCH_STEP_REWARD: u32 = 20;
    pub const SEARCH_FOUND_REWARD: u32 = 100;

    /// Name recorded on the leaderboard when settings don't provide one
    pub const DEFAULT_PLAYER_NAME: &str = "PLAYER";
}

/// Subtract a penalty from a score, flooring at zero
#[inline]
pub fn apply_penalty(score: u32, penalty: u32) -> u32 {
    score.saturating_sub(penalty)
}
