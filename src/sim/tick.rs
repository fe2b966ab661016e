//! Session frame update
//!
//! Screen transitions and the per-frame tick that routes input to the active
//! level and settles its outcome.

use super::levels::{LevelEngine, LevelInput, LevelStatus};
use super::state::{GameSession, LevelResult, Screen};
use crate::error::LevelError;

/// Abstract input, independent of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Left arrow
    Prev,
    /// Right arrow
    Next,
    /// Start (menu), select / pop / serve / found (levels), level select (game over)
    Confirm,
    /// 1-9: level pick or stack push
    Digit(u8),
    Pop,
    Add,
    ViewScores,
    Retry,
    /// Escape
    Back,
    Quit,
}

impl Action {
    /// Level-local meaning of this action while playing
    pub fn level_input(self) -> Option<LevelInput> {
        match self {
            Action::Prev => Some(LevelInput::Left),
            Action::Next => Some(LevelInput::Right),
            Action::Confirm => Some(LevelInput::Confirm),
            Action::Digit(d) => Some(LevelInput::Push(d)),
            Action::Pop => Some(LevelInput::Pop),
            Action::Add => Some(LevelInput::Add),
            _ => None,
        }
    }
}

/// Input commands for a single frame (applied in order)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub actions: Vec<Action>,
}

/// Advance the session by one frame: apply input, then update the level.
///
/// Only an unknown level number escapes as an error.
pub fn tick(session: &mut GameSession, input: &TickInput, now_ms: u64) -> Result<(), LevelError> {
    for action in &input.actions {
        session.handle_action(*action, now_ms)?;
    }
    session.update(now_ms);
    Ok(())
}

impl GameSession {
    /// Route one action according to the current screen
    pub fn handle_action(&mut self, action: Action, now_ms: u64) -> Result<(), LevelError> {
        match self.screen {
            Screen::Menu => match action {
                Action::Confirm => {
                    self.start();
                }
                Action::ViewScores => {
                    self.view_scores();
                }
                Action::Quit => self.quit(),
                _ => {}
            },
            Screen::LevelSelect => match action {
                Action::Digit(number) => {
                    self.select_level(number, now_ms)?;
                }
                Action::Back => {
                    self.back();
                }
                _ => {}
            },
            Screen::Playing => match action {
                Action::Back => {
                    self.back();
                }
                other => {
                    let input = other.level_input();
                    if let (Some(input), Some(engine)) = (input, self.engine.as_mut()) {
                        engine.handle_input(input);
                    }
                }
            },
            Screen::GameOver => match action {
                Action::Retry => {
                    self.retry(now_ms)?;
                }
                Action::Confirm => {
                    self.open_level_select();
                }
                Action::Back => {
                    self.back();
                }
                _ => {}
            },
            Screen::Scoreboard => {
                if action == Action::Back {
                    self.back();
                }
            }
        }
        Ok(())
    }

    /// Menu → LevelSelect, starting a fresh cumulative score
    pub fn start(&mut self) -> bool {
        if self.screen != Screen::Menu {
            return false;
        }
        self.score = 0;
        self.recorded_rank = None;
        self.last_result = None;
        self.set_screen(Screen::LevelSelect);
        true
    }

    /// Menu → Scoreboard
    pub fn view_scores(&mut self) -> bool {
        if self.screen != Screen::Menu {
            return false;
        }
        self.set_screen(Screen::Scoreboard);
        true
    }

    /// Stop the session (menu only)
    pub fn quit(&mut self) {
        if self.screen == Screen::Menu {
            log::info!("Quit requested");
            self.running = false;
        }
    }

    /// Escape: one step back from the current screen.
    ///
    /// Leaving a level discards it without scoring; reaching the menu from
    /// level select or game over resets the cumulative score.
    pub fn back(&mut self) -> bool {
        match self.screen {
            Screen::Menu => false,
            Screen::Scoreboard => {
                self.set_screen(Screen::Menu);
                true
            }
            Screen::LevelSelect | Screen::GameOver => {
                self.enter_menu();
                true
            }
            Screen::Playing => {
                if let Some(engine) = self.engine.take() {
                    log::info!("Abandoned level {}", engine.number());
                }
                self.set_screen(Screen::LevelSelect);
                true
            }
        }
    }

    /// LevelSelect → Playing for an unlocked level.
    ///
    /// Locked levels are inert (`Ok(false)`); numbers with no engine are an error.
    pub fn select_level(&mut self, number: u8, now_ms: u64) -> Result<bool, LevelError> {
        if self.screen != Screen::LevelSelect {
            return Ok(false);
        }
        match self.start_level(number, now_ms) {
            Ok(()) => Ok(true),
            Err(LevelError::LockedLevel(n)) => {
                log::info!("Level {n} is locked");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// GameOver → Playing, same level, cumulative score untouched
    pub fn retry(&mut self, now_ms: u64) -> Result<bool, LevelError> {
        if self.screen != Screen::GameOver {
            return Ok(false);
        }
        let Some(number) = self.current_level else {
            return Ok(false);
        };
        self.start_level(number, now_ms)?;
        Ok(true)
    }

    /// GameOver → LevelSelect, cumulative score untouched
    pub fn open_level_select(&mut self) -> bool {
        if self.screen != Screen::GameOver {
            return false;
        }
        self.set_screen(Screen::LevelSelect);
        true
    }

    /// Tick the active level and settle its outcome.
    ///
    /// Returns the terminal status when the level resolved this frame.
    pub fn update(&mut self, now_ms: u64) -> Option<LevelStatus> {
        if self.screen != Screen::Playing {
            return None;
        }
        let (status, number, level_score) = {
            let engine = self.engine.as_mut()?;
            let status = engine.tick(now_ms);
            (status, engine.number(), engine.get_score(now_ms))
        };

        match status {
            LevelStatus::Active => None,
            LevelStatus::Completed => {
                self.engine = None;
                self.complete_level(number, level_score);
                Some(status)
            }
            LevelStatus::Failed => {
                self.engine = None;
                log::info!("Level {number} failed, total stays {}", self.score);
                self.last_result = Some(LevelResult {
                    level: number,
                    status,
                    level_score,
                    total_score: self.score,
                    rank: None,
                });
                self.set_screen(Screen::GameOver);
                Some(status)
            }
        }
    }

    fn start_level(&mut self, number: u8, now_ms: u64) -> Result<(), LevelError> {
        let seed = self.next_level_seed();
        let engine = LevelEngine::create(number, seed, now_ms)?;
        log::info!("Starting level {number} ({})", engine.name());
        self.engine = Some(engine);
        self.current_level = Some(number);
        self.set_screen(Screen::Playing);
        Ok(())
    }

    /// Bank the level score and record a high score if it qualifies
    fn complete_level(&mut self, number: u8, level_score: u32) {
        self.score += u64::from(level_score);
        let rank = if self.high_scores.qualifies(self.score) {
            self.high_scores.add(&self.player_name, self.score)
        } else {
            None
        };
        self.recorded_rank = rank;
        log::info!(
            "Level {number} completed: +{level_score}, total {}{}",
            self.score,
            rank.map(|r| format!(", high score rank #{r}"))
                .unwrap_or_default()
        );
        self.last_result = Some(LevelResult {
            level: number,
            status: LevelStatus::Completed,
            level_score,
            total_score: self.score,
            rank,
        });
        self.set_screen(Screen::LevelSelect);
    }

    fn enter_menu(&mut self) {
        self.engine = None;
        self.score = 0;
        self.recorded_rank = None;
        self.set_screen(Screen::Menu);
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::debug!("Screen {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
    }
}
