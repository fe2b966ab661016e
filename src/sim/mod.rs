//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time comes in as `now_ms`, never read from a clock
//! - Seeded RNG only (one master RNG per session, one seed per level)
//! - No rendering or platform dependencies

pub mod levels;
pub mod state;
pub mod tick;

pub use levels::{
    LevelEngine, LevelInfo, LevelInput, LevelSnapshot, LevelStatus, PuzzleSnapshot, CATALOG,
};
pub use state::{GameSession, LevelResult, Screen, SessionSnapshot};
pub use tick::{Action, TickInput, tick};
