//! `name,score` line format

use crate::consts::DEFAULT_PLAYER_NAME;
use crate::highscores::HighScoreEntry;

/// Parse persisted lines, skipping any that don't read as `name,score`.
///
/// Order is preserved; the caller sorts.
pub fn decode_entries(text: &str) -> Vec<HighScoreEntry> {
    let mut skipped = 0usize;
    let entries: Vec<HighScoreEntry> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let entry = parse_line(line);
            if entry.is_none() {
                skipped += 1;
            }
            entry
        })
        .collect();

    if skipped > 0 {
        log::warn!("Skipped {skipped} malformed high score line(s)");
    }
    entries
}

fn parse_line(line: &str) -> Option<HighScoreEntry> {
    let (name, score) = line.trim().split_once(',')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let score = score.trim().parse::<u64>().ok()?;
    Some(HighScoreEntry {
        name: name.to_string(),
        score,
    })
}

/// One `name,score` line per entry, newline-terminated
pub fn encode_entries(entries: &[HighScoreEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{},{}\n", sanitize_name(&e.name), e.score))
        .collect()
}

/// Strip characters that would break the line format
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| *c != ',' && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}
