//! Text layout for every screen.
//!
//! Pure functions from a [`SessionSnapshot`] to lines of text; the terminal
//! module only decides where those lines go.

use crate::sim::levels::{LevelStatus, SearchHint, TimerUrgency};
use crate::sim::{LevelSnapshot, PuzzleSnapshot, Screen, SessionSnapshot};

/// Visual emphasis for a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Title,
    Good,
    Warn,
    Bad,
    Dim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

impl Line {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Collects lines for one frame
#[derive(Debug, Default)]
struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    fn push(&mut self, text: impl Into<String>) {
        self.lines.push(Line::new(text, Tone::Normal));
    }

    fn styled(&mut self, text: impl Into<String>, tone: Tone) {
        self.lines.push(Line::new(text, tone));
    }

    fn blank(&mut self) {
        self.push("");
    }
}

/// Lay out the current screen
pub fn render_lines(snapshot: &SessionSnapshot) -> Vec<Line> {
    let mut frame = Frame::default();
    match snapshot.screen {
        Screen::Menu => menu(&mut frame, snapshot),
        Screen::LevelSelect => level_select(&mut frame, snapshot),
        Screen::Playing => match &snapshot.level {
            Some(level) => playing(&mut frame, snapshot, level),
            None => frame.styled("LOADING...", Tone::Dim),
        },
        Screen::GameOver => game_over(&mut frame, snapshot),
        Screen::Scoreboard => scoreboard(&mut frame, snapshot),
    }
    frame.lines
}

fn menu(frame: &mut Frame, snapshot: &SessionSnapshot) {
    frame.styled("DSA ARCADE", Tone::Title);
    frame.styled("Learn data structures the arcade way", Tone::Dim);
    frame.blank();
    if let Some(best) = snapshot.best_score {
        frame.push(format!("HIGH SCORE  {best}"));
        frame.blank();
    }
    frame.styled("PRESS SPACE TO START", Tone::Good);
    frame.push("S  high scores");
    frame.push("Q  quit");
}

fn level_select(frame: &mut Frame, snapshot: &SessionSnapshot) {
    frame.styled("SELECT LEVEL", Tone::Title);
    frame.push(format!("TOTAL SCORE  {}", snapshot.total_score));
    if let Some(result) = snapshot
        .last_result
        .filter(|r| r.status == LevelStatus::Completed)
    {
        let mut text = format!("LEVEL {} CLEARED  +{}", result.level, result.level_score);
        if let Some(rank) = result.rank {
            text.push_str(&format!("  (HIGH SCORE #{rank})"));
        }
        frame.styled(text, Tone::Good);
    }
    frame.blank();
    for info in &snapshot.levels {
        if info.locked {
            frame.styled(format!("{:>2}  {:<28} LOCKED", info.number, info.name), Tone::Dim);
        } else {
            frame.push(format!(
                "{:>2}  {:<28} {:>3}s  {}",
                info.number,
                info.name,
                info.time_limit_secs,
                info.difficulty.as_str()
            ));
        }
    }
    frame.blank();
    frame.styled("1-4 play   ESC menu", Tone::Dim);
}

fn playing(frame: &mut Frame, snapshot: &SessionSnapshot, level: &LevelSnapshot) {
    frame.styled(format!("LEVEL {}: {}", level.number, level.name), Tone::Title);
    let timer_tone = match level.urgency {
        TimerUrgency::Normal => Tone::Normal,
        TimerUrgency::Warning => Tone::Warn,
        TimerUrgency::Critical => Tone::Bad,
    };
    frame.styled(
        format!(
            "TIME {:>5.1}s   SCORE {}   TOTAL {}{}",
            level.remaining_secs,
            level.score,
            snapshot.total_score,
            if level.hurry { "   HURRY!" } else { "" }
        ),
        timer_tone,
    );
    frame.blank();

    match &level.puzzle {
        PuzzleSnapshot::Array {
            values,
            target,
            selected,
            attempts,
            max_attempts,
        } => {
            frame.push(format!("FIND {target}"));
            frame.push(cells(values.iter(), |i| i == *selected));
            frame.push(cursor_line(values.len(), *selected));
            frame.push(format!("MISSES {attempts}/{max_attempts}"));
            frame.blank();
            frame.styled("<- -> move   SPACE select", Tone::Dim);
        }
        PuzzleSnapshot::Stack {
            stack,
            target,
            matched,
            matches,
            recent_ops,
        } => {
            let target_text: Vec<String> = target
                .iter()
                .zip(matched)
                .map(|(digit, ok)| if *ok { format!("[{digit}]") } else { format!(" {digit} ") })
                .collect();
            frame.push(format!("TARGET (bottom->top) {}", target_text.join("")));
            let stack_text: Vec<String> = stack.iter().map(u8::to_string).collect();
            frame.push(format!("STACK  [{}", stack_text.join(" ")));
            frame.push(format!("MATCHES {matches}"));
            if !recent_ops.is_empty() {
                frame.styled(format!("OPS {}", recent_ops.join(", ")), Tone::Dim);
            }
            frame.blank();
            frame.styled("1-9 push   P/SPACE pop", Tone::Dim);
        }
        PuzzleSnapshot::Queue {
            queue,
            processed,
            target_processed,
            next_customer_id: _,
        } => {
            let waiting: Vec<String> = queue.iter().map(|id| format!("#{id}")).collect();
            frame.push(format!("FRONT -> {}", waiting.join(" ")));
            frame.push(format!("WAITING {}", queue.len()));
            frame.push(format!("SERVED {}/{}", processed.len(), target_processed));
            frame.blank();
            frame.styled("SPACE serve   A add customer", Tone::Dim);
        }
        PuzzleSnapshot::BinarySearch {
            values,
            target,
            left,
            right,
            mid,
            comparisons,
            max_comparisons,
            found,
            hint,
            efficiency,
        } => {
            frame.push(format!("FIND {target}"));
            frame.push(cells(values.iter(), |i| i == *mid));
            frame.push(range_line(values.len(), *left, *right, *mid));
            frame.push(format!(
                "COMPARISONS {comparisons}/{max_comparisons}   EFFICIENCY {:.0}%",
                efficiency * 100.0
            ));
            match hint {
                Some(SearchHint::Found) if *found => frame.styled("FOUND!", Tone::Good),
                Some(SearchHint::Found) => frame.styled("HINT: this is it", Tone::Dim),
                Some(SearchHint::SearchLeft) => frame.styled("HINT: go left", Tone::Dim),
                Some(SearchHint::SearchRight) => frame.styled("HINT: go right", Tone::Dim),
                None => {}
            }
            frame.blank();
            frame.styled("<- smaller   -> larger   SPACE found", Tone::Dim);
        }
    }
    frame.styled("ESC abandon", Tone::Dim);
}

fn game_over(frame: &mut Frame, snapshot: &SessionSnapshot) {
    frame.styled("GAME OVER", Tone::Bad);
    if let Some(result) = &snapshot.last_result {
        frame.push(format!("LEVEL {} FAILED", result.level));
    }
    frame.push(format!("TOTAL SCORE  {}", snapshot.total_score));
    match snapshot.high_score_rank {
        Some(rank) if snapshot.new_high_score => {
            frame.styled(format!("NEW HIGH SCORE! RANK #{rank}"), Tone::Good)
        }
        Some(rank) => frame.styled(format!("ON THE BOARD AT #{rank}"), Tone::Good),
        None => {}
    }
    frame.blank();
    frame.push("R retry   SPACE level select   ESC menu");
}

fn scoreboard(frame: &mut Frame, snapshot: &SessionSnapshot) {
    frame.styled("HIGH SCORES", Tone::Title);
    frame.blank();
    if snapshot.high_scores.is_empty() {
        frame.styled("no scores yet", Tone::Dim);
    }
    for (i, entry) in snapshot.high_scores.iter().enumerate() {
        frame.push(format!("{:>2}. {:<12} {:>7}", i + 1, entry.name, entry.score));
    }
    frame.blank();
    frame.styled("ESC back", Tone::Dim);
}

const CELL_WIDTH: usize = 4;

/// Row of fixed-width cells, with the highlighted one bracketed
fn cells<'a>(values: impl Iterator<Item = &'a u32>, highlight: impl Fn(usize) -> bool) -> String {
    values
        .enumerate()
        .map(|(i, v)| {
            if highlight(i) {
                format!("[{v:>2}]")
            } else {
                format!(" {v:>2} ")
            }
        })
        .collect()
}

fn cursor_line(len: usize, at: usize) -> String {
    (0..len)
        .map(|i| if i == at { "  ^ " } else { "    " })
        .collect()
}

/// Marks L/M/R under the cells; outside the active range is dotted
fn range_line(len: usize, left: isize, right: isize, mid: usize) -> String {
    let mut out = String::with_capacity(len * CELL_WIDTH);
    for i in 0..len {
        let idx = i as isize;
        let mark = if i == mid && left <= right {
            "  M "
        } else if idx == left {
            "  L "
        } else if idx == right {
            "  R "
        } else if idx < left || idx > right {
            "  . "
        } else {
            "    "
        };
        out.push_str(mark);
    }
    out
}
