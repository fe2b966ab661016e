//! Stack level: build the target sequence on top of a LIFO stack

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::LevelInput;
use super::timer::{LevelStatus, LevelTimer};
use crate::consts::*;

/// One recorded stack operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackOp {
    Push(u8),
    Pop(u8),
}

impl fmt::Display for StackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackOp::Push(value) => write!(f, "PUSH {value}"),
            StackOp::Pop(value) => write!(f, "POP {value}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StackLevel {
    timer: LevelTimer,
    /// Bottom first
    stack: Vec<u8>,
    target: Vec<u8>,
    current_target_index: usize,
    /// Target positions matched by the top of the stack
    sequence_matches: Vec<usize>,
    operations: Vec<StackOp>,
    score: u32,
}

impl StackLevel {
    /// Random target of `STACK_TARGET_LEN` digits in 1-9
    pub fn new(time_limit_secs: u32, seed: u64, now_ms: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let target = (0..STACK_TARGET_LEN)
            .map(|_| rng.random_range(1..=9u8))
            .collect();
        Self::with_target(target, time_limit_secs, now_ms)
    }

    pub fn with_target(target: Vec<u8>, time_limit_secs: u32, now_ms: u64) -> Self {
        Self {
            timer: LevelTimer::new(time_limit_secs, now_ms),
            stack: Vec::new(),
            target,
            current_target_index: 0,
            sequence_matches: Vec::new(),
            operations: Vec::new(),
            score: 0,
        }
    }

    pub fn handle_input(&mut self, input: LevelInput) {
        if self.timer.is_resolved() {
            return;
        }
        match input {
            LevelInput::Push(value) => self.push(value),
            // Primary action pops, same as the dedicated key
            LevelInput::Pop | LevelInput::Confirm => self.pop(),
            _ => {}
        }
    }

    /// Push a digit 1-9; anything else is ignored
    pub fn push(&mut self, value: u8) {
        if !(1..=9).contains(&value) {
            return;
        }
        self.stack.push(value);
        self.operations.push(StackOp::Push(value));
        self.check_progress();
    }

    /// Pop the top; popping an empty stack does nothing
    pub fn pop(&mut self) {
        if let Some(value) = self.stack.pop() {
            self.operations.push(StackOp::Pop(value));
            self.check_progress();
        }
    }

    /// Reset match progress, then compare the top window with the target.
    ///
    /// A full match awards the bonus each time it is (re)formed.
    fn check_progress(&mut self) {
        self.current_target_index = 0;
        self.sequence_matches.clear();

        let n = self.target.len();
        if n == 0 || self.stack.len() < n {
            return;
        }
        if self.stack[self.stack.len() - n..] == self.target[..] {
            self.sequence_matches = (0..n).collect();
            self.current_target_index = n;
            self.score += STACK_MATCH_BONUS;
            log::debug!("stack sequence formed: {:?}", self.target);
        }
    }

    pub fn is_full_match(&self) -> bool {
        let n = self.target.len();
        self.current_target_index == n && self.sequence_matches.len() == n
    }

    pub fn tick(&mut self, now_ms: u64) -> LevelStatus {
        self.timer.settle(now_ms, self.is_full_match(), false)
    }

    /// Per target position: does the top window hold that digit there?
    pub fn matched_positions(&self) -> Vec<bool> {
        let n = self.target.len();
        if self.stack.len() < n {
            return vec![false; n];
        }
        self.stack[self.stack.len() - n..]
            .iter()
            .zip(&self.target)
            .map(|(have, want)| have == want)
            .collect()
    }

    pub fn timer(&self) -> &LevelTimer {
        &self.timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stack(&self) -> &[u8] {
        &self.stack
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    pub fn matches(&self) -> usize {
        self.sequence_matches.len()
    }

    pub fn operations(&self) -> &[StackOp] {
        &self.operations
    }

    /// Last `n` operations, oldest first
    pub fn recent_operations(&self, n: usize) -> &[StackOp] {
        &self.operations[self.operations.len().saturating_sub(n)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> StackLevel {
        StackLevel::with_target(vec![3, 1, 4, 1, 5], 45, 0)
    }

    #[test]
    fn test_random_target_digits() {
        let level = StackLevel::new(45, 99, 0);
        assert_eq!(level.target().len(), STACK_TARGET_LEN);
        assert!(level.target().iter().all(|d| (1..=9).contains(d)));
    }

    #[test]
    fn test_pushing_target_forms_match_once() {
        let mut level = level();
        for d in [3, 1, 4, 1, 5] {
            level.handle_input(LevelInput::Push(d));
        }
        assert!(level.is_full_match());
        assert_eq!(level.matches(), 5);
        assert_eq!(level.score(), 100);
        assert_eq!(level.tick(1_000), LevelStatus::Completed);
    }

    #[test]
    fn test_pop_resets_progress() {
        let mut level = level();
        for d in [3, 1, 4, 1, 5] {
            level.push(d);
        }
        level.pop();
        assert!(!level.is_full_match());
        assert_eq!(level.matches(), 0);
        assert_eq!(level.tick(1_000), LevelStatus::Active);
    }

    #[test]
    fn test_reforming_sequence_reearns_bonus() {
        let mut level = level();
        for d in [3, 1, 4, 1, 5] {
            level.push(d);
        }
        level.pop();
        level.push(5);
        assert!(level.is_full_match());
        assert_eq!(level.score(), 200);
    }

    #[test]
    fn test_match_uses_top_window_only() {
        let mut level = level();
        for d in [9, 9, 3, 1, 4, 1, 5] {
            level.push(d);
        }
        assert!(level.is_full_match());
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut level = level();
        level.handle_input(LevelInput::Pop);
        assert!(level.stack().is_empty());
        assert!(level.operations().is_empty());
    }

    #[test]
    fn test_invalid_digit_ignored() {
        let mut level = level();
        level.push(0);
        level.push(10);
        assert!(level.stack().is_empty());
    }

    #[test]
    fn test_operations_log() {
        let mut level = level();
        level.push(3);
        level.push(7);
        level.handle_input(LevelInput::Confirm);
        let ops: Vec<String> = level.operations().iter().map(ToString::to_string).collect();
        assert_eq!(ops, vec!["PUSH 3", "PUSH 7", "POP 7"]);
        assert_eq!(level.recent_operations(2), &[StackOp::Push(7), StackOp::Pop(7)]);
    }

    #[test]
    fn test_matched_positions() {
        let mut level = level();
        for d in [3, 2, 4, 1, 9] {
            level.push(d);
        }
        assert_eq!(level.matched_positions(), vec![true, false, true, true, false]);
    }

    #[test]
    fn test_timeout_only_failure() {
        let mut level = level();
        for _ in 0..50 {
            level.push(2);
            level.pop();
        }
        assert_eq!(level.tick(44_999), LevelStatus::Active);
        assert_eq!(level.tick(45_000), LevelStatus::Failed);
    }
}
