//! Terminal presentation
//!
//! [`view`] turns a session snapshot into styled text lines; [`terminal`]
//! puts them on screen with crossterm.

pub mod terminal;
pub mod view;

pub use terminal::TerminalRenderer;
pub use view::{Line, Tone, render_lines};
