//! Whole-session playthroughs driven the way the frame loop drives them:
//! actions in, a manual clock, snapshots out.

use dsa_arcade::HighScoreStore;
use dsa_arcade::persistence::MemoryBackend;
use dsa_arcade::platform::{Clock, ManualClock};
use dsa_arcade::sim::levels::SearchHint;
use dsa_arcade::sim::{
    Action, GameSession, LevelStatus, PuzzleSnapshot, Screen, TickInput, tick,
};

struct Harness {
    session: GameSession,
    clock: ManualClock,
    backend: MemoryBackend,
}

impl Harness {
    fn new(seed: u64) -> Self {
        let backend = MemoryBackend::new();
        let store = HighScoreStore::open(Box::new(backend.clone()));
        Self {
            session: GameSession::new(store, "ADA", seed),
            clock: ManualClock::new(1_000),
            backend,
        }
    }

    fn press(&mut self, actions: &[Action]) {
        let input = TickInput {
            actions: actions.to_vec(),
        };
        tick(&mut self.session, &input, self.clock.now_ms()).unwrap();
    }

    fn wait(&mut self, ms: u64) {
        self.clock.advance(ms);
        self.press(&[]);
    }

    fn puzzle(&self) -> PuzzleSnapshot {
        let snapshot = self.session.snapshot(self.clock.now_ms());
        snapshot.level.expect("a level is running").puzzle
    }
}

/// Follow the hints until the target is confirmed
fn solve_binary_search(h: &mut Harness) {
    for _ in 0..8 {
        if h.session.screen() != Screen::Playing {
            return;
        }
        let PuzzleSnapshot::BinarySearch { hint, .. } = h.puzzle() else {
            panic!("not a binary search level");
        };
        let action = match hint {
            Some(SearchHint::SearchLeft) => Action::Prev,
            Some(SearchHint::SearchRight) => Action::Next,
            Some(SearchHint::Found) | None => Action::Confirm,
        };
        h.clock.advance(500);
        h.press(&[action]);
    }
}

#[test]
fn full_run_through_three_levels() {
    let mut h = Harness::new(2024);
    h.press(&[Action::Confirm]);
    assert_eq!(h.session.screen(), Screen::LevelSelect);

    // Stack: push the target digits bottom to top
    h.press(&[Action::Digit(2)]);
    let PuzzleSnapshot::Stack { target, .. } = h.puzzle() else {
        panic!("level 2 should be the stack level");
    };
    h.clock.advance(5_000);
    let digits: Vec<Action> = target.iter().copied().map(Action::Digit).collect();
    h.press(&digits);
    assert_eq!(h.session.screen(), Screen::LevelSelect);
    // 100 match bonus + 40s left * 10
    assert_eq!(h.session.score(), 500);

    // Queue: serve a customer every time one arrives
    h.press(&[Action::Digit(3)]);
    for _ in 0..10 {
        h.wait(2_000);
        h.press(&[Action::Confirm]);
    }
    assert_eq!(h.session.screen(), Screen::LevelSelect);
    let result = h.session.last_result().unwrap();
    assert_eq!(result.level, 3);
    assert_eq!(result.status, LevelStatus::Completed);
    // 10 * 25 + 25s left * 10
    assert_eq!(result.level_score, 500);
    assert_eq!(h.session.score(), 1000);

    // Binary search
    h.press(&[Action::Digit(4)]);
    solve_binary_search(&mut h);
    assert_eq!(h.session.screen(), Screen::LevelSelect);
    let total = h.session.score();
    assert!(total > 1000);

    // Every completion was persisted
    let saved = h.backend.contents().unwrap();
    assert!(saved.lines().any(|l| l == format!("ADA,{total}")));
    assert_eq!(h.session.high_scores().top_score(), Some(total));
}

#[test]
fn failure_retry_and_menu_reset() {
    let mut h = Harness::new(7);
    h.press(&[Action::Confirm, Action::Digit(4)]);
    solve_binary_search(&mut h);
    let banked = h.session.score();
    assert!(banked >= 100);

    h.press(&[Action::Digit(3)]);
    h.wait(45_000);
    assert_eq!(h.session.screen(), Screen::GameOver);
    assert_eq!(h.session.score(), banked);

    h.press(&[Action::Retry]);
    assert_eq!(h.session.screen(), Screen::Playing);
    assert_eq!(h.session.current_level(), Some(3));
    assert_eq!(h.session.score(), banked);

    h.wait(45_000);
    assert_eq!(h.session.screen(), Screen::GameOver);
    h.press(&[Action::Back]);
    assert_eq!(h.session.screen(), Screen::Menu);
    assert_eq!(h.session.score(), 0);
    // Quitting from the menu stops the loop
    h.press(&[Action::Quit]);
    assert!(!h.session.is_running());
}

#[test]
fn locked_levels_and_scoreboard() {
    let mut h = Harness::new(1);
    h.press(&[Action::ViewScores]);
    let snapshot = h.session.snapshot(h.clock.now_ms());
    assert_eq!(snapshot.screen, Screen::Scoreboard);
    assert_eq!(snapshot.high_scores.len(), 3);

    h.press(&[Action::Back, Action::Confirm, Action::Digit(9)]);
    assert_eq!(h.session.screen(), Screen::LevelSelect);
    assert!(h.session.engine().is_none());
}
