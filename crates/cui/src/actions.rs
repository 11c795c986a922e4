use crate::app::App;
use crate::input::InputAction;
use std::time::Instant;

pub fn dispatch(app: &mut App, action: InputAction, now: Instant) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::Dismiss => app.show_help = false,
        InputAction::MoveLeft => app.move_cursor(-1),
        InputAction::MoveRight => app.move_cursor(1),
        InputAction::MoveUp => app.move_cursor(-3),
        InputAction::MoveDown => app.move_cursor(3),
        InputAction::ClickCursor => app.click_cursor(),
        InputAction::ClickDigit(value) => app.click_value(value),
        InputAction::PlayAgain => app.play_again(now),
    }
}
