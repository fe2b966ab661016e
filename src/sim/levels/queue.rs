//! Queue level: serve customers in FIFO order while new ones keep arriving

use std::collections::VecDeque;

use super::LevelInput;
use super::timer::{LevelStatus, LevelTimer};
use crate::consts::*;
use crate::error::LevelError;

#[derive(Debug, Clone)]
pub struct QueueLevel {
    timer: LevelTimer,
    queue: VecDeque<u32>,
    processed: Vec<u32>,
    next_customer_id: u32,
    last_spawn_ms: u64,
    /// Fault raised outside a tick, surfaced by the next tick
    pending_fault: Option<LevelError>,
    score: u32,
}

impl QueueLevel {
    pub fn new(time_limit_secs: u32, now_ms: u64) -> Self {
        Self {
            timer: LevelTimer::new(time_limit_secs, now_ms),
            queue: VecDeque::with_capacity(QUEUE_CAPACITY),
            processed: Vec::new(),
            next_customer_id: 1,
            last_spawn_ms: now_ms,
            pending_fault: None,
            score: 0,
        }
    }

    pub fn handle_input(&mut self, input: LevelInput) {
        if self.timer.is_resolved() {
            return;
        }
        match input {
            LevelInput::Confirm => self.process_customer(),
            LevelInput::Add => {
                if let Err(err) = self.add_customer() {
                    self.pending_fault = Some(err);
                }
            }
            _ => {}
        }
    }

    /// Enqueue the next customer; returns `false` when the queue is full
    pub fn add_customer(&mut self) -> Result<bool, LevelError> {
        if self.queue.len() >= QUEUE_CAPACITY {
            return Ok(false);
        }
        let id = self.next_customer_id;
        self.next_customer_id = id
            .checked_add(1)
            .ok_or(LevelError::CustomerIdExhausted { last_id: id })?;
        self.queue.push_back(id);
        Ok(true)
    }

    /// Serve the oldest customer; an empty queue does nothing
    pub fn process_customer(&mut self) {
        if let Some(customer) = self.queue.pop_front() {
            self.processed.push(customer);
            self.score += QUEUE_PROCESS_REWARD;
        }
    }

    /// Periodic auto-spawn. Spawns at capacity are dropped, not deferred.
    fn advance(&mut self, now_ms: u64) -> Result<(), LevelError> {
        if let Some(err) = self.pending_fault.take() {
            return Err(err);
        }
        let since_spawn = now_ms
            .checked_sub(self.last_spawn_ms)
            .ok_or(LevelError::ClockWentBackwards {
                now_ms,
                last_spawn_ms: self.last_spawn_ms,
            })?;
        if since_spawn >= QUEUE_SPAWN_INTERVAL_MS {
            self.add_customer()?;
            self.last_spawn_ms = now_ms;
        }
        Ok(())
    }

    pub fn tick(&mut self, now_ms: u64) -> LevelStatus {
        if self.timer.is_resolved() {
            return self.timer.status();
        }
        match self.advance(now_ms) {
            Ok(()) => {
                let won = self.processed.len() >= QUEUE_TARGET_PROCESSED;
                self.timer.settle(now_ms, won, false)
            }
            Err(err) => {
                log::error!("queue level fault, failing level: {err}");
                self.timer.fail(now_ms)
            }
        }
    }

    pub fn timer(&self) -> &LevelTimer {
        &self.timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Front (next to serve) first
    pub fn queue(&self) -> &VecDeque<u32> {
        &self.queue
    }

    pub fn processed(&self) -> &[u32] {
        &self.processed
    }

    pub fn next_customer_id(&self) -> u32 {
        self.next_customer_id
    }

    pub fn target_processed(&self) -> usize {
        QUEUE_TARGET_PROCESSED
    }
}
