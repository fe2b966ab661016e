//! Raw-mode terminal output.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal,
};

use super::view::{Line, Tone};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Lines drawn last frame; identical frames are skipped
    last: Vec<Line>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: Vec::new(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force a full redraw next frame (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.last.clear();
    }

    /// Draw lines from the top-left corner, clearing whatever was there
    pub fn draw(&mut self, lines: &[Line]) -> Result<()> {
        if lines == self.last.as_slice() {
            return Ok(());
        }
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        for (y, line) in lines.iter().enumerate() {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            self.stdout.queue(cursor::MoveTo(1, y + 1))?;
            self.apply_tone(line.tone)?;
            self.stdout.queue(Print(&line.text))?;
        }
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.last = lines.to_vec();
        Ok(())
    }

    fn apply_tone(&mut self, tone: Tone) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        let color = match tone {
            Tone::Normal => Color::Reset,
            Tone::Title => Color::Cyan,
            Tone::Good => Color::Green,
            Tone::Warn => Color::Yellow,
            Tone::Bad => Color::Red,
            Tone::Dim => Color::DarkGrey,
        };
        self.stdout.queue(SetForegroundColor(color))?;
        if tone == Tone::Title {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}
