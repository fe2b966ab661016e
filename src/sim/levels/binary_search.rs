//! Binary search level: narrow the range by asserting which half holds the target

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::LevelInput;
use super::timer::{LevelStatus, LevelTimer};
use crate::apply_penalty;
use crate::consts::*;

/// Which way the middle element points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchHint {
    /// Middle value is larger than the target
    SearchLeft,
    /// Middle value is smaller than the target
    SearchRight,
    Found,
}

#[derive(Debug, Clone)]
pub struct BinarySearchLevel {
    timer: LevelTimer,
    /// Sorted ascending, duplicates allowed
    values: Vec<u32>,
    target: u32,
    left: isize,
    right: isize,
    mid: usize,
    comparisons: u32,
    found: bool,
    score: u32,
}

impl BinarySearchLevel {
    /// Random sorted array of `SEARCH_LEN` values with a target drawn from it
    pub fn new(time_limit_secs: u32, seed: u64, now_ms: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let values: Vec<u32> = (0..SEARCH_LEN)
            .map(|_| rng.random_range(1..=SEARCH_MAX_VALUE))
            .collect();
        let target = values.choose(&mut rng).copied().unwrap_or(1);
        Self::with_puzzle(values, target, time_limit_secs, now_ms)
    }

    /// Fixed puzzle; `values` is sorted on the way in
    pub fn with_puzzle(
        mut values: Vec<u32>,
        target: u32,
        time_limit_secs: u32,
        now_ms: u64,
    ) -> Self {
        values.sort_unstable();
        let right = values.len() as isize - 1;
        let mut level = Self {
            timer: LevelTimer::new(time_limit_secs, now_ms),
            values,
            target,
            left: 0,
            right,
            mid: 0,
            comparisons: 0,
            found: false,
            score: 0,
        };
        level.update_mid();
        level
    }

    pub fn handle_input(&mut self, input: LevelInput) {
        if self.timer.is_resolved() {
            return;
        }
        match input {
            LevelInput::Left => self.search_left(),
            LevelInput::Right => self.search_right(),
            LevelInput::Confirm => self.confirm_found(),
            _ => {}
        }
    }

    fn range_open(&self) -> bool {
        !self.found && self.left <= self.right
    }

    fn mid_value(&self) -> Option<u32> {
        self.values.get(self.mid).copied()
    }

    /// Assert `target < values[mid]`
    pub fn search_left(&mut self) {
        if !self.range_open() {
            return;
        }
        self.comparisons += 1;
        match self.mid_value() {
            Some(mid_value) if self.target < mid_value => {
                self.right = self.mid as isize - 1;
                self.score += SEARCH_STEP_REWARD;
                self.update_mid();
            }
            _ => self.score = apply_penalty(self.score, WRONG_ANSWER_PENALTY),
        }
    }

    /// Assert `target > values[mid]`
    pub fn search_right(&mut self) {
        if !self.range_open() {
            return;
        }
        self.comparisons += 1;
        match self.mid_value() {
            Some(mid_value) if self.target > mid_value => {
                self.left = self.mid as isize + 1;
                self.score += SEARCH_STEP_REWARD;
                self.update_mid();
            }
            _ => self.score = apply_penalty(self.score, WRONG_ANSWER_PENALTY),
        }
    }

    /// Claim the middle element is the target
    pub fn confirm_found(&mut self) {
        if self.found {
            return;
        }
        if self.mid_value() == Some(self.target) {
            self.found = true;
            self.score += SEARCH_FOUND_REWARD;
        } else {
            self.score = apply_penalty(self.score, WRONG_ANSWER_PENALTY);
        }
    }

    /// Recompute `mid` while the range is non-empty; otherwise keep the last one
    fn update_mid(&mut self) {
        if self.left <= self.right {
            self.mid = ((self.left + self.right) / 2) as usize;
        }
    }

    /// Found is checked before the comparison cap and the clock
    pub fn tick(&mut self, now_ms: u64) -> LevelStatus {
        let exhausted = self.comparisons >= SEARCH_MAX_COMPARISONS;
        self.timer.settle(now_ms, self.found, exhausted)
    }

    pub fn hint(&self) -> Option<SearchHint> {
        if self.left > self.right {
            return None;
        }
        let mid_value = self.mid_value()?;
        Some(if mid_value > self.target {
            SearchHint::SearchLeft
        } else if mid_value < self.target {
            SearchHint::SearchRight
        } else {
            SearchHint::Found
        })
    }

    /// `1 - comparisons / max`, floored at 0
    pub fn efficiency(&self) -> f64 {
        (1.0 - f64::from(self.comparisons) / f64::from(SEARCH_MAX_COMPARISONS)).max(0.0)
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

    pub fn left(&self) -> isize {
        self.left
    }

    pub fn right(&self) -> isize {
        self.right
    }

    pub fn mid(&self) -> usize {
        self.mid
    }

    pub fn comparisons(&self) -> u32 {
        self.comparisons
    }

    pub fn max_comparisons(&self) -> u32 {
        SEARCH_MAX_COMPARISONS
    }

    pub fn found(&self) -> bool {
        self.found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [u32; 15] = [2, 5, 8, 12, 16, 23, 38, 45, 56, 60, 71, 79, 83, 90, 98];

    fn level(target: u32) -> BinarySearchLevel {
        BinarySearchLevel::with_puzzle(VALUES.to_vec(), target, 30, 0)
    }

    #[test]
    fn test_random_puzzle_is_sorted_and_contains_target() {
        let level = BinarySearchLevel::new(30, 2024, 0);
        assert_eq!(level.values().len(), SEARCH_LEN);
        assert!(level.values().windows(2).all(|w| w[0] <= w[1]));
        assert!(level.values().contains(&level.target()));
        assert_eq!(level.mid(), 7);
    }

    #[test]
    fn test_immediate_find() {
        let mut level = level(45);
        assert_eq!(level.mid(), 7);
        assert_eq!(level.hint(), Some(SearchHint::Found));
        level.handle_input(LevelInput::Confirm);
        assert!(level.found());
        assert_eq!(level.score(), 100);
        assert_eq!(level.tick(1_000), LevelStatus::Completed);
    }

    #[test]
    fn test_correct_decisions_narrow_range() {
        let mut level = level(12);
        level.search_left(); // 12 < 45
        assert_eq!((level.left(), level.right(), level.mid()), (0, 6, 3));
        assert_eq!(level.score(), 20);
        level.confirm_found(); // values[3] == 12
        assert!(level.found());
        assert_eq!(level.score(), 120);
        assert_eq!(level.comparisons(), 1);
    }

    #[test]
    fn test_wrong_decision_penalizes_and_keeps_bounds() {
        let mut level = level(90);
        level.search_right(); // correct: left = 8
        assert_eq!(level.score(), 20);
        level.search_left(); // wrong: 90 > values[11] = 79
        assert_eq!(level.score(), 0);
        assert_eq!((level.left(), level.right(), level.mid()), (8, 14, 11));
        assert_eq!(level.comparisons(), 2);
        level.search_left(); // wrong again, floored
        assert_eq!(level.score(), 0);
    }

    #[test]
    fn test_wrong_confirm_penalizes() {
        let mut level = level(12);
        level.search_left();
        level.search_left(); // wrong: 12 == values[3]
        assert_eq!(level.score(), 0);
        level.search_right(); // wrong too
        level.confirm_found();
        assert!(level.found());
    }

    #[test]
    fn test_comparison_cap_fails() {
        let mut level = level(2);
        for _ in 0..4 {
            level.search_right(); // all wrong
        }
        assert_eq!(level.comparisons(), 4);
        assert_eq!(level.tick(1_000), LevelStatus::Failed);
    }

    #[test]
    fn test_found_beats_cap_in_same_step() {
        let mut level = level(2);
        level.search_left(); // mid 3 (12)
        level.search_left(); // mid 1 (5)
        level.search_left(); // mid 0 (2)
        level.search_right(); // wrong, comparisons hit 4
        assert_eq!(level.comparisons(), 4);
        level.confirm_found();
        assert_eq!(level.tick(1_000), LevelStatus::Completed);
    }

    #[test]
    fn test_found_beats_timeout() {
        let mut level = level(45);
        level.confirm_found();
        assert_eq!(level.tick(31_000), LevelStatus::Completed);
    }

    #[test]
    fn test_timeout_fails() {
        let mut level = level(45);
        assert_eq!(level.tick(30_000), LevelStatus::Failed);
    }

    #[test]
    fn test_decisions_inert_after_found() {
        let mut level = level(45);
        level.confirm_found();
        level.confirm_found();
        level.search_left();
        assert_eq!(level.score(), 100);
        assert_eq!(level.comparisons(), 0);
    }

    #[test]
    fn test_efficiency() {
        let mut level = level(12);
        assert!((level.efficiency() - 1.0).abs() < 1e-9);
        level.search_left();
        assert!((level.efficiency() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_puzzle_is_harmless() {
        let mut level = BinarySearchLevel::with_puzzle(Vec::new(), 5, 30, 0);
        level.search_left();
        level.confirm_found();
        assert_eq!(level.comparisons(), 0);
        assert_eq!(level.hint(), None);
        assert!(!level.found());
    }
}
