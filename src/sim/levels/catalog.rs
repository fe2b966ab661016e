//! Static level catalog
//!
//! Levels 1-4 are playable; the rest are locked placeholders shown on the
//! level select screen.

use serde::{Deserialize, Serialize};

/// Difficulty tag shown next to a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// One immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub number: u8,
    pub name: &'static str,
    pub time_limit_secs: u32,
    pub difficulty: Difficulty,
    pub locked: bool,
}

impl LevelInfo {
    const fn new(
        number: u8,
        name: &'static str,
        time_limit_secs: u32,
        difficulty: Difficulty,
        locked: bool,
    ) -> Self {
        Self {
            number,
            name,
            time_limit_secs,
            difficulty,
            locked,
        }
    }
}

pub const CATALOG: [LevelInfo; 10] = [
    LevelInfo::new(1, "Array Basics", 60, Difficulty::Easy, false),
    LevelInfo::new(2, "Stack Operations", 45, Difficulty::Easy, false),
    LevelInfo::new(3, "Queue Management", 45, Difficulty::Easy, false),
    LevelInfo::new(4, "Binary Search", 30, Difficulty::Medium, false),
    LevelInfo::new(5, "Linked Lists", 40, Difficulty::Medium, true),
    LevelInfo::new(6, "Binary Trees", 50, Difficulty::Medium, true),
    LevelInfo::new(7, "Hash Tables", 35, Difficulty::Medium, true),
    LevelInfo::new(8, "Graph Traversal", 60, Difficulty::Hard, true),
    LevelInfo::new(9, "Dynamic Programming", 90, Difficulty::Hard, true),
    LevelInfo::new(10, "Sorting Algorithms", 45, Difficulty::Medium, true),
];

pub fn lookup(number: u8) -> Option<&'static LevelInfo> {
    CATALOG.iter().find(|info| info.number == number)
}
