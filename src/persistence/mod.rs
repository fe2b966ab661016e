//! Score persistence
//!
//! Features:
//! - Plain `name,score` line format, tolerant of malformed lines
//! - Pluggable backends (file, in-memory) behind [`ScoreBackend`]
//! - Atomic file writes (tmp → rename)

pub mod file;
pub mod format;
pub mod memory;

use std::fmt;
use std::io;

pub use file::FileBackend;
pub use format::{decode_entries, encode_entries, sanitize_name};
pub use memory::MemoryBackend;

/// Raw storage for the encoded high-score list.
///
/// Backends deal in text only; parsing, ordering and fallbacks live in
/// [`HighScoreStore`](crate::highscores::HighScoreStore).
pub trait ScoreBackend: fmt::Debug {
    /// Read the full persisted contents
    fn read(&self) -> io::Result<String>;

    /// Replace the persisted contents
    fn write(&mut self, contents: &str) -> io::Result<()>;

    /// Human-readable location for log messages
    fn describe(&self) -> String;
}
