use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_source_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.source_cursor_move(false),
        KeyCode::Down | KeyCode::Char('j') => app.source_cursor_move(true),
        KeyCode::Enter => {
            if app.confirm_source() {
                enqueue_action(action_tx, Action::LoadDataset);
            }
        }
        KeyCode::Esc => app.navigate_to(View::Table),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use crossterm::event::KeyModifiers;

    use super::super::super::action_queue::channel;

    #[test]
    fn enter_selects_and_reloads() {
        let mut app = test_app();
        app.open_source_picker();
        let (tx, mut rx) = channel();

        handle_source_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), &mut app, &tx);
        handle_source_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut app, &tx);

        assert_eq!(rx.try_recv().ok(), Some(Action::LoadDataset));
        assert_eq!(app.workbench.selected_source().unwrap().name, "Archive");
        assert_eq!(app.current_view, View::Table);
    }

    #[test]
    fn esc_leaves_selection_untouched() {
        let mut app = test_app();
        app.open_source_picker();
        let (tx, mut rx) = channel();

        handle_source_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), &mut app, &tx);
        handle_source_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(app.workbench.selected_source().unwrap().name, "Inventaire");
    }
}
