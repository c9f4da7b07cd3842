//! Key and token mapping for the presentation layer. The core only ever sees [`Direction`]s.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hunt_core::Direction;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    /// Raw text handed to the core to parse.
    Token(String),
    Quit,
}

pub fn input_for_event(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => input_for_key(key),
        _ => None,
    }
}

/// Press edges only, repeats and releases are ignored.
pub fn input_for_key(key: &KeyEvent) -> Option<Input> {
    use Direction::*;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Input::Move(Up)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Input::Move(Down)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Input::Move(Left)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Input::Move(Right)),
        _ => None,
    }
}

/// One line of headless input. Blank lines are skipped.
pub fn input_for_line(line: &str) -> Option<Input> {
    let token = line.trim();
    if token.is_empty() {
        None
    } else if token.eq_ignore_ascii_case("q") || token.eq_ignore_ascii_case("quit") {
        Some(Input::Quit)
    } else {
        Some(Input::Token(token.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wasd_and_arrows_map_to_directions() {
        assert_eq!(input_for_key(&press(KeyCode::Char('w'))), Some(Input::Move(Direction::Up)));
        assert_eq!(input_for_key(&press(KeyCode::Down)), Some(Input::Move(Direction::Down)));
        assert_eq!(input_for_key(&press(KeyCode::Char('A'))), Some(Input::Move(Direction::Left)));
        assert_eq!(input_for_key(&press(KeyCode::Right)), Some(Input::Move(Direction::Right)));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(input_for_key(&press(KeyCode::Esc)), Some(Input::Quit));
        assert_eq!(input_for_key(&press(KeyCode::Char('q'))), Some(Input::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input_for_key(&ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn releases_and_other_keys_are_ignored() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(input_for_key(&release), None);
        assert_eq!(input_for_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(input_for_key(&press(KeyCode::Char('c'))), None);
        assert_eq!(input_for_event(&Event::FocusGained), None);
    }

    #[test]
    fn lines_become_tokens() {
        assert_eq!(input_for_line("  up \n"), Some(Input::Token("up".into())));
        assert_eq!(input_for_line("QUIT"), Some(Input::Quit));
        assert_eq!(input_for_line("   "), None);
        assert_eq!(input_for_line("sideways"), Some(Input::Token("sideways".into())));
    }
}
