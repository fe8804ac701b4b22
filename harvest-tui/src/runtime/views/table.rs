use crate::app::{self, App};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_table_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    // Filter typing takes priority.
    if app.is_editing_filter() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.end_filter_edit(),
            KeyCode::Backspace => app.filter_backspace(),
            KeyCode::Left => app.filter_move_cursor(true),
            KeyCode::Right => app.filter_move_cursor(false),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.filter_input_char(c);
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('x') | KeyCode::Char('X')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.clear_filters();
        }
        KeyCode::Left | KeyCode::Char('h') => app.table_focus_column(false),
        KeyCode::Right | KeyCode::Char('l') => app.table_focus_column(true),
        KeyCode::Up | KeyCode::Char('k') => app.table_scroll(false),
        KeyCode::Down | KeyCode::Char('j') => app.table_scroll(true),
        KeyCode::Char('/') | KeyCode::Enter => app.begin_filter_edit(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.open_source_picker(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.open_form(app::today()),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            enqueue_action(action_tx, Action::LoadDataset);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}
