use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    Dismiss,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    ClickCursor,
    ClickDigit(u8),
    PlayAgain,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Dismiss,
        KeyCode::Left | KeyCode::Char('h') => InputAction::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => InputAction::MoveRight,
        KeyCode::Up | KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::ClickCursor,
        KeyCode::Char(ch @ '1'..='9') => InputAction::ClickDigit(ch as u8 - b'0'),
        KeyCode::Char('n') | KeyCode::Char('r') => InputAction::PlayAgain,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_digit_keys() {
        assert_eq!(map_key(key(KeyCode::Char('1'))), InputAction::ClickDigit(1));
        assert_eq!(map_key(key(KeyCode::Char('9'))), InputAction::ClickDigit(9));
        assert_eq!(map_key(key(KeyCode::Char('0'))), InputAction::None);
    }

    #[test]
    fn maps_navigation_and_commands() {
        assert_eq!(map_key(key(KeyCode::Left)), InputAction::MoveLeft);
        assert_eq!(map_key(key(KeyCode::Char('j'))), InputAction::MoveDown);
        assert_eq!(map_key(key(KeyCode::Char(' '))), InputAction::ClickCursor);
        assert_eq!(map_key(key(KeyCode::Char('n'))), InputAction::PlayAgain);
        assert_eq!(map_key(key(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc)), InputAction::Dismiss);
    }
}
