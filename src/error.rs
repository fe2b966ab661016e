//! Error types for level instantiation and tick faults.

use thiserror::Error;

/// Errors raised by the level engines.
///
/// `UnknownLevel` is a catalog/selection mismatch and is treated as fatal by the
/// binary. The queue faults never leave the engine: they are contained at the
/// tick boundary and turned into a failed level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// No engine is mapped to this level number.
    #[error("unknown level number: {0}")]
    UnknownLevel(u8),

    /// The level exists in the catalog but cannot be played yet.
    #[error("level {0} is locked")]
    LockedLevel(u8),

    /// Customer ids ran out while spawning.
    #[error("customer id space exhausted after {last_id}")]
    CustomerIdExhausted { last_id: u32 },

    /// The clock handed to the engine went backwards past the last spawn.
    #[error("clock went backwards: now {now_ms}ms is before last spawn at {last_spawn_ms}ms")]
    ClockWentBackwards { now_ms: u64, last_spawn_ms: u64 },
}
