//! DSA Arcade entry point
//!
//! Loads settings, opens the high score file and runs the terminal frame loop.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use dsa_arcade::persistence::FileBackend;
use dsa_arcade::platform::{Clock, MonotonicClock, map_key_event, should_quit};
use dsa_arcade::sim::{GameSession, TickInput, tick};
use dsa_arcade::ui::{TerminalRenderer, render_lines};
use dsa_arcade::{HighScoreStore, Settings};

fn main() -> Result<()> {
    let settings = Settings::load_from_env();
    init_logging(&settings);
    log::info!("DSA Arcade starting...");

    let store = HighScoreStore::open(Box::new(FileBackend::new(settings.high_score_path.clone())));
    let seed = settings.resolved_seed();
    log::info!("Session seed: {seed}");
    let mut session = GameSession::new(store, settings.player_name.clone(), seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("Exiting on error: {err:#}");
    }
    log::info!("DSA Arcade stopped, final score {}", session.score());
    result
}

/// Log to a file; the terminal belongs to the game while it runs.
///
/// Without a writable log file the game still starts, just without logs.
fn init_logging(settings: &Settings) {
    let Some(file) = settings.open_log_file() else {
        eprintln!(
            "warning: cannot open log file {}, logging disabled",
            settings.log_path.display()
        );
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession, settings: &Settings) -> Result<()> {
    let clock = MonotonicClock::new();
    let frame = settings.frame_duration();
    let mut input = TickInput::default();
    let mut last_frame = Instant::now();

    while session.is_running() {
        // Input until the next frame is due.
        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        log::info!("Interrupted");
                        return Ok(());
                    }
                    if let Some(action) = map_key_event(key) {
                        input.actions.push(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_frame.elapsed() < frame {
            continue;
        }
        last_frame = Instant::now();

        let now_ms = clock.now_ms();
        tick(session, &input, now_ms)?;
        input.actions.clear();

        term.draw(&render_lines(&session.snapshot(now_ms)))?;
    }
    Ok(())
}
