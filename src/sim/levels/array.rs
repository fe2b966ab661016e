//! Array level: find the target value by moving a cursor over the array

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::LevelInput;
use super::timer::{LevelStatus, LevelTimer};
use crate::apply_penalty;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct ArrayLevel {
    timer: LevelTimer,
    rng: Pcg32,
    values: Vec<u32>,
    target: u32,
    selected: usize,
    attempts: u32,
    score: u32,
}

impl ArrayLevel {
    /// Random array of `ARRAY_LEN` values in `1..=ARRAY_MAX_VALUE`
    pub fn new(time_limit_secs: u32, seed: u64, now_ms: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let values = (0..ARRAY_LEN)
            .map(|_| rng.random_range(1..=ARRAY_MAX_VALUE))
            .collect();
        Self::from_parts(values, None, rng, time_limit_secs, now_ms)
    }

    /// Fixed puzzle; later targets and shuffles still come from `seed`
    pub fn with_values(
        values: Vec<u32>,
        target: u32,
        time_limit_secs: u32,
        seed: u64,
        now_ms: u64,
    ) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        Self::from_parts(values, Some(target), rng, time_limit_secs, now_ms)
    }

    fn from_parts(
        values: Vec<u32>,
        target: Option<u32>,
        rng: Pcg32,
        time_limit_secs: u32,
        now_ms: u64,
    ) -> Self {
        let mut level = Self {
            timer: LevelTimer::new(time_limit_secs, now_ms),
            rng,
            values,
            target: 0,
            selected: 0,
            attempts: 0,
            score: 0,
        };
        match target {
            Some(target) => level.target = target,
            None => level.new_target(),
        }
        level
    }

    /// Draw a fresh target from the current array and reset attempts
    fn new_target(&mut self) {
        if let Some(&target) = self.values.choose(&mut self.rng) {
            self.target = target;
        }
        self.attempts = 0;
    }

    pub fn handle_input(&mut self, input: LevelInput) {
        if self.timer.is_resolved() {
            return;
        }
        match input {
            LevelInput::Left => self.move_left(),
            LevelInput::Right => self.move_right(),
            LevelInput::Confirm => self.confirm(),
            _ => {}
        }
    }

    pub fn move_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected + 1 < self.values.len() {
            self.selected += 1;
        }
    }

    /// Check the selected value against the target
    pub fn confirm(&mut self) {
        let Some(&value) = self.values.get(self.selected) else {
            return;
        };

        if value == self.target {
            self.score += ARRAY_HIT_REWARD;
            self.values.shuffle(&mut self.rng);
            self.new_target();
            log::debug!("array hit, next target {}", self.target);
        } else {
            self.score = apply_penalty(self.score, WRONG_ANSWER_PENALTY);
            self.attempts += 1;
            if self.attempts >= ARRAY_MAX_ATTEMPTS {
                self.new_target();
                log::debug!("array attempts exhausted, new target {}", self.target);
            }
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> LevelStatus {
        self.timer.settle(now_ms, self.score >= ARRAY_WIN_SCORE, false)
    }

    pub fn timer(&self) -> &LevelTimer {
        &self.timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        ARRAY_MAX_ATTEMPTS
    }
}
