//! Timed mini-game engines
//!
//! Each engine is self-contained: it owns its countdown, score and puzzle
//! state, takes discrete [`LevelInput`]s and is ticked with the current
//! monotonic time. [`LevelEngine`] is the tagged union the session holds.

pub mod array;
pub mod binary_search;
pub mod catalog;
pub mod queue;
pub mod stack;
pub mod timer;

use serde::Serialize;

pub use array::ArrayLevel;
pub use binary_search::{BinarySearchLevel, SearchHint};
pub use catalog::{CATALOG, Difficulty, LevelInfo};
pub use queue::QueueLevel;
pub use stack::{StackLevel, StackOp};
pub use timer::{LevelStatus, LevelTimer, TimerUrgency};

use crate::error::LevelError;

/// Number of stack operations kept in snapshots
const RECENT_OPS: usize = 6;

/// Level-local input, already stripped of screen navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelInput {
    /// Cursor left / "target is smaller"
    Left,
    /// Cursor right / "target is larger"
    Right,
    /// Select, pop, serve or "found it", depending on the level
    Confirm,
    /// Push a digit 1-9
    Push(u8),
    Pop,
    Add,
}

/// The active mini-game
#[derive(Debug, Clone)]
pub enum LevelEngine {
    Array(ArrayLevel),
    Stack(StackLevel),
    Queue(QueueLevel),
    BinarySearch(BinarySearchLevel),
}

impl LevelEngine {
    /// Build the engine for a catalog level number.
    ///
    /// Fails with `UnknownLevel` for numbers that have no engine and
    /// `LockedLevel` for locked catalog entries.
    pub fn create(number: u8, seed: u64, now_ms: u64) -> Result<Self, LevelError> {
        let info = catalog::lookup(number).ok_or(LevelError::UnknownLevel(number))?;
        if info.locked {
            return Err(LevelError::LockedLevel(number));
        }
        let limit = info.time_limit_secs;
        let engine = match number {
            1 => LevelEngine::Array(ArrayLevel::new(limit, seed, now_ms)),
            2 => LevelEngine::Stack(StackLevel::new(limit, seed, now_ms)),
            3 => LevelEngine::Queue(QueueLevel::new(limit, now_ms)),
            4 => LevelEngine::BinarySearch(BinarySearchLevel::new(limit, seed, now_ms)),
            _ => return Err(LevelError::UnknownLevel(number)),
        };
        Ok(engine)
    }

    /// Catalog number of this variant
    pub fn number(&self) -> u8 {
        match self {
            LevelEngine::Array(_) => 1,
            LevelEngine::Stack(_) => 2,
            LevelEngine::Queue(_) => 3,
            LevelEngine::BinarySearch(_) => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        catalog::lookup(self.number())
            .map(|info| info.name)
            .unwrap_or("Unknown")
    }

    pub fn handle_input(&mut self, input: LevelInput) {
        match self {
            LevelEngine::Array(level) => level.handle_input(input),
            LevelEngine::Stack(level) => level.handle_input(input),
            LevelEngine::Queue(level) => level.handle_input(input),
            LevelEngine::BinarySearch(level) => level.handle_input(input),
        }
    }

    /// Advance to `now_ms` and report the status
    pub fn tick(&mut self, now_ms: u64) -> LevelStatus {
        match self {
            LevelEngine::Array(level) => level.tick(now_ms),
            LevelEngine::Stack(level) => level.tick(now_ms),
            LevelEngine::Queue(level) => level.tick(now_ms),
            LevelEngine::BinarySearch(level) => level.tick(now_ms),
        }
    }

    pub fn timer(&self) -> &LevelTimer {
        match self {
            LevelEngine::Array(level) => level.timer(),
            LevelEngine::Stack(level) => level.timer(),
            LevelEngine::Queue(level) => level.timer(),
            LevelEngine::BinarySearch(level) => level.timer(),
        }
    }

    pub fn status(&self) -> LevelStatus {
        self.timer().status()
    }

    /// Score earned by play, without the time bonus
    pub fn base_score(&self) -> u32 {
        match self {
            LevelEngine::Array(level) => level.score(),
            LevelEngine::Stack(level) => level.score(),
            LevelEngine::Queue(level) => level.score(),
            LevelEngine::BinarySearch(level) => level.score(),
        }
    }

    pub fn remaining_secs(&self, now_ms: u64) -> f64 {
        self.timer().remaining_secs(now_ms)
    }

    /// `base_score + floor(remaining_secs * 10)`; read-only
    pub fn get_score(&self, now_ms: u64) -> u32 {
        self.base_score()
            .saturating_add(self.timer().time_bonus(now_ms))
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self, now_ms: u64) -> LevelSnapshot {
        let timer = self.timer();
        let puzzle = match self {
            LevelEngine::Array(level) => PuzzleSnapshot::Array {
                values: level.values().to_vec(),
                target: level.target(),
                selected: level.selected(),
                attempts: level.attempts(),
                max_attempts: level.max_attempts(),
            },
            LevelEngine::Stack(level) => PuzzleSnapshot::Stack {
                stack: level.stack().to_vec(),
                target: level.target().to_vec(),
                matched: level.matched_positions(),
                matches: level.matches(),
                recent_ops: level
                    .recent_operations(RECENT_OPS)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
            LevelEngine::Queue(level) => PuzzleSnapshot::Queue {
                queue: level.queue().iter().copied().collect(),
                processed: level.processed().to_vec(),
                target_processed: level.target_processed(),
                next_customer_id: level.next_customer_id(),
            },
            LevelEngine::BinarySearch(level) => PuzzleSnapshot::BinarySearch {
                values: level.values().to_vec(),
                target: level.target(),
                left: level.left(),
                right: level.right(),
                mid: level.mid(),
                comparisons: level.comparisons(),
                max_comparisons: level.max_comparisons(),
                found: level.found(),
                hint: level.hint(),
                efficiency: level.efficiency(),
            },
        };

        LevelSnapshot {
            number: self.number(),
            name: self.name(),
            status: self.status(),
            score: self.base_score(),
            remaining_secs: timer.remaining_secs(now_ms),
            time_limit_secs: timer.time_limit_secs(),
            urgency: timer.urgency(now_ms),
            hurry: timer.hurry(now_ms),
            puzzle,
        }
    }
}

/// Everything a renderer needs for the play screen
#[derive(Debug, Clone, Serialize)]
pub struct LevelSnapshot {
    pub number: u8,
    pub name: &'static str,
    pub status: LevelStatus,
    pub score: u32,
    pub remaining_secs: f64,
    pub time_limit_secs: u32,
    pub urgency: TimerUrgency,
    pub hurry: bool,
    pub puzzle: PuzzleSnapshot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PuzzleSnapshot {
    Array {
        values: Vec<u32>,
        target: u32,
        selected: usize,
        attempts: u32,
        max_attempts: u32,
    },
    Stack {
        /// Bottom first
        stack: Vec<u8>,
        target: Vec<u8>,
        matched: Vec<bool>,
        matches: usize,
        recent_ops: Vec<String>,
    },
    Queue {
        /// Front first
        queue: Vec<u32>,
        processed: Vec<u32>,
        target_processed: usize,
        next_customer_id: u32,
    },
    BinarySearch {
        values: Vec<u32>,
        target: u32,
        left: isize,
        right: isize,
        mid: usize,
        comparisons: u32,
        max_comparisons: u32,
        found: bool,
        hint: Option<SearchHint>,
        efficiency: f64,
    },
}
