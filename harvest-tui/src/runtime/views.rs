use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod form;
mod sources;
mod table;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.current_view {
        View::Table => table::handle_table_key(key, app, action_tx),
        View::SelectSource => sources::handle_source_key(key, app, action_tx),
        View::Form => form::handle_form_key(key, app, action_tx),
    }
}
