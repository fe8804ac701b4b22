use super::state::View;
use super::App;

impl App {
    pub fn open_source_picker(&mut self) {
        self.source_cursor = self.workbench.selected_index().unwrap_or(0);
        self.navigate_to(View::SelectSource);
    }

    pub fn source_cursor_move(&mut self, down: bool) {
        let count = self.workbench.sources().len();
        if count == 0 {
            return;
        }
        self.source_cursor = if down {
            (self.source_cursor + 1) % count
        } else {
            (self.source_cursor + count - 1) % count
        };
    }

    /// Select the source under the cursor. Returns whether the selection
    /// changed to a valid source.
    pub fn confirm_source(&mut self) -> bool {
        let selected = self.workbench.select_source(self.source_cursor);
        self.navigate_to(View::Table);
        selected
    }
}

#[cfg(test)]
mod tests {
    use crate::app::View;
    use crate::test_support::test_app;

    #[test]
    fn picker_starts_on_current_source_and_wraps() {
        let mut app = test_app();
        app.workbench.select_source(1);
        app.open_source_picker();
        assert_eq!(app.source_cursor, 1);
        assert_eq!(app.current_view, View::SelectSource);

        app.source_cursor_move(true);
        assert_eq!(app.source_cursor, 0);
        app.source_cursor_move(false);
        assert_eq!(app.source_cursor, 1);
    }

    #[test]
    fn confirm_selects_and_returns_to_table() {
        let mut app = test_app();
        app.open_source_picker();
        app.source_cursor_move(true);
        assert!(app.confirm_source());
        assert_eq!(app.workbench.selected_source().unwrap().name, "Archive");
        assert_eq!(app.current_view, View::Table);
    }
}
