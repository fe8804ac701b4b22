use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use harvest::SubmitError;

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') if ctrl => request_submit(app, action_tx),
        KeyCode::Char('n') | KeyCode::Char('N') if ctrl => app.form_add_row(),
        KeyCode::Char('d') | KeyCode::Char('D') if ctrl => app.form_remove_focused_row(),
        KeyCode::Char('q') | KeyCode::Char('Q') if ctrl => app.quit(),
        KeyCode::Char(c) if !ctrl => app.form_input_char(c),
        KeyCode::Tab => app.form_next_field(),
        KeyCode::BackTab => app.form_previous_field(),
        KeyCode::Left => app.form_left_right(false),
        KeyCode::Right => app.form_left_right(true),
        KeyCode::Home => app.form_cursor_home_end(true),
        KeyCode::End => app.form_cursor_home_end(false),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Esc => app.cancel_form(),
        _ => {}
    }
}

/// At most one submission is queued or running; further requests are
/// refused until it finishes.
fn request_submit(app: &mut App, action_tx: &ActionTx) {
    if app.submit_pending {
        app.toasts.error(SubmitError::InFlight.to_string());
        return;
    }
    app.submit_pending = true;
    enqueue_action(action_tx, Action::Submit);
}
