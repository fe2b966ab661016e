//! Level countdown and resolution
//!
//! Every engine owns one [`LevelTimer`]. It derives remaining time from the
//! `now_ms` values it is handed, never lets remaining time grow back, and
//! freezes the clock once the level resolves so the time bonus is stable.

use serde::{Deserialize, Serialize};

use crate::consts::{HURRY_THRESHOLD_MS, TIME_BONUS_PER_SECOND};

/// Outcome of a level tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    Active,
    Completed,
    Failed,
}

impl LevelStatus {
    /// Completed and Failed are terminal
    pub fn is_terminal(self) -> bool {
        !matches!(self, LevelStatus::Active)
    }
}

/// How close the timer is to running out (drives HUD colouring)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerUrgency {
    /// More than half the time left
    Normal,
    /// More than a quarter left
    Warning,
    Critical,
}

#[derive(Debug, Clone)]
pub struct LevelTimer {
    start_ms: u64,
    time_limit_ms: u64,
    /// Latest time observed by a tick
    last_seen_ms: u64,
    /// Clock value at which the level resolved
    resolved_at_ms: Option<u64>,
    status: LevelStatus,
}

impl LevelTimer {
    pub fn new(time_limit_secs: u32, now_ms: u64) -> Self {
        Self {
            start_ms: now_ms,
            time_limit_ms: u64::from(time_limit_secs) * 1000,
            last_seen_ms: now_ms,
            resolved_at_ms: None,
            status: LevelStatus::Active,
        }
    }

    pub fn time_limit_secs(&self) -> u32 {
        u32::try_from(self.time_limit_ms / 1000).unwrap_or(u32::MAX)
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }

    /// Clock value used for time derivations at `now_ms`
    fn effective_now(&self, now_ms: u64) -> u64 {
        match self.resolved_at_ms {
            Some(resolved) => resolved,
            None => now_ms.max(self.last_seen_ms),
        }
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.effective_now(now_ms).saturating_sub(self.start_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.time_limit_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    pub fn remaining_secs(&self, now_ms: u64) -> f64 {
        self.remaining_ms(now_ms) as f64 / 1000.0
    }

    pub fn is_time_up(&self, now_ms: u64) -> bool {
        self.remaining_ms(now_ms) == 0
    }

    /// `floor(remaining_secs * 10)`, computed in whole milliseconds
    pub fn time_bonus(&self, now_ms: u64) -> u32 {
        let bonus = self.remaining_ms(now_ms) * TIME_BONUS_PER_SECOND / 1000;
        u32::try_from(bonus).unwrap_or(u32::MAX)
    }

    pub fn urgency(&self, now_ms: u64) -> TimerUrgency {
        if self.time_limit_ms == 0 {
            return TimerUrgency::Critical;
        }
        let remaining = self.remaining_ms(now_ms);
        if remaining * 2 > self.time_limit_ms {
            TimerUrgency::Normal
        } else if remaining * 4 > self.time_limit_ms {
            TimerUrgency::Warning
        } else {
            TimerUrgency::Critical
        }
    }

    pub fn hurry(&self, now_ms: u64) -> bool {
        self.remaining_ms(now_ms) < HURRY_THRESHOLD_MS
    }

    /// Resolve one tick: the win check wins over time-out and `exhausted`.
    ///
    /// Terminal timers keep reporting their status and ignore the clock.
    pub fn settle(&mut self, now_ms: u64, won: bool, exhausted: bool) -> LevelStatus {
        if self.is_resolved() {
            return self.status;
        }
        self.last_seen_ms = self.last_seen_ms.max(now_ms);

        let status = if won {
            LevelStatus::Completed
        } else if exhausted || self.is_time_up(now_ms) {
            LevelStatus::Failed
        } else {
            LevelStatus::Active
        };

        if status.is_terminal() {
            self.resolve(status);
        }
        status
    }

    /// Force a failure (used when a tick hits an internal fault)
    pub fn fail(&mut self, now_ms: u64) -> LevelStatus {
        if self.is_resolved() {
            return self.status;
        }
        self.last_seen_ms = self.last_seen_ms.max(now_ms);
        self.resolve(LevelStatus::Failed);
        self.status
    }

    fn resolve(&mut self, status: LevelStatus) {
        self.status = status;
        self.resolved_at_ms = Some(self.last_seen_ms);
    }
}
