//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::sim::Action;

/// Map keyboard input to an abstract action.
///
/// The mapping is screen-agnostic; the session decides what an action means
/// on the current screen (e.g. `Confirm` starts the game from the menu).
pub fn map_key_event(key: KeyEvent) -> Option<Action> {
    match key.code {
        // Directional
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Action::Prev),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Action::Next),

        // Primary action
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Confirm),

        // Digits (stack pushes, level picks)
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Action::Digit(d as u8)),

        // Data structure operations
        KeyCode::Backspace | KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Pop),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Add),

        // Screen navigation
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::ViewScores),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Retry),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),

        _ => None,
    }
}

/// Check if key should exit immediately, regardless of screen.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_keys() {
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Left)), Some(Action::Prev));
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Right)), Some(Action::Next));
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('H'))),
            Some(Action::Prev)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('l'))),
            Some(Action::Next)
        );
    }

    #[test]
    fn test_digit_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('1'))),
            Some(Action::Digit(1))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('9'))),
            Some(Action::Digit(9))
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Action::Confirm)
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Enter)), Some(Action::Confirm));
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Backspace)), Some(Action::Pop));
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('a'))),
            Some(Action::Add)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(Action::Retry)
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Esc)), Some(Action::Back));
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(Action::ViewScores)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
