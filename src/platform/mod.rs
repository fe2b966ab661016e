//! Platform abstraction layer
//!
//! Keeps the simulation free of terminal and OS details:
//! - Time: monotonic millisecond clock handed into every tick
//! - Input: terminal key events mapped to abstract [`Action`](crate::sim::Action)s

pub mod input;
pub mod time;

pub use input::{map_key_event, should_quit};
pub use time::{Clock, ManualClock, MonotonicClock};
