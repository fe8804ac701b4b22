use super::state::{TableState, TextInput};
use super::App;

impl App {
    fn column_count(&self) -> usize {
        self.workbench.dataset().headers.len()
    }

    pub fn table_focus_column(&mut self, forward: bool) {
        let count = self.column_count();
        if count == 0 {
            return;
        }
        let current = self.table.focused_column.min(count - 1);
        self.table.focused_column = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
    }

    pub fn table_scroll(&mut self, down: bool) {
        let visible = self
            .workbench
            .table_view()
            .map(|view| view.rows.len())
            .unwrap_or(0);
        if down {
            if self.table.scroll + 1 < visible {
                self.table.scroll += 1;
            }
        } else {
            self.table.scroll = self.table.scroll.saturating_sub(1);
        }
    }

    pub fn is_editing_filter(&self) -> bool {
        self.table.filter_input.is_some()
    }

    /// Start typing the filter of the focused column, keeping its current text.
    pub fn begin_filter_edit(&mut self) {
        if self.column_count() == 0 {
            return;
        }
        let current = self.workbench.filters().get(self.table.focused_column);
        self.table.filter_input = Some(TextInput::from_str(current));
    }

    pub fn end_filter_edit(&mut self) {
        self.table.filter_input = None;
    }

    pub fn filter_input_char(&mut self, c: char) {
        if let Some(input) = self.table.filter_input.as_mut() {
            input.insert(c);
        }
        self.apply_filter_input();
    }

    pub fn filter_backspace(&mut self) {
        if let Some(input) = self.table.filter_input.as_mut() {
            input.backspace();
        }
        self.apply_filter_input();
    }

    pub fn filter_move_cursor(&mut self, left: bool) {
        if let Some(input) = self.table.filter_input.as_mut() {
            if left {
                input.move_left();
            } else {
                input.move_right();
            }
        }
    }

    /// Filters apply as they are typed.
    fn apply_filter_input(&mut self) {
        if let Some(input) = &self.table.filter_input {
            self.workbench
                .apply_filter(self.table.focused_column, &input.value);
            self.table.scroll = 0;
        }
    }

    pub fn clear_filters(&mut self) {
        self.workbench.clear_filters();
        self.table.filter_input = None;
        self.table.scroll = 0;
    }

    /// A fresh dataset arrived: the workbench dropped its filters, so the
    /// table cursor starts over too.
    pub fn reset_table(&mut self) {
        self.table = TableState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_dataset, test_app, StubSheet};

    async fn loaded_app() -> App {
        let mut app = test_app();
        let sheet = StubSheet::with(sample_dataset());
        app.workbench.load_dataset(&sheet).await.unwrap();
        app
    }

    #[tokio::test]
    async fn typing_a_filter_narrows_the_table() {
        let mut app = loaded_app().await;
        app.table_focus_column(true);
        app.begin_filter_edit();
        for c in "haba".chars() {
            app.filter_input_char(c);
        }

        let view = app.workbench.table_view().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.stats.raw_total, 10.0);

        app.end_filter_edit();
        assert_eq!(app.workbench.filters().get(1), "haba");
    }

    #[tokio::test]
    async fn erasing_the_filter_restores_all_rows() {
        let mut app = loaded_app().await;
        app.begin_filter_edit();
        app.filter_input_char('x');
        assert!(app.workbench.table_view().unwrap().rows.is_empty());

        app.filter_backspace();
        assert_eq!(app.workbench.table_view().unwrap().rows.len(), 2);
        assert!(app.workbench.filters().is_empty());
    }

    #[tokio::test]
    async fn column_focus_wraps() {
        let mut app = loaded_app().await;
        app.table_focus_column(false);
        assert_eq!(app.table.focused_column, 5);
        app.table_focus_column(true);
        assert_eq!(app.table.focused_column, 0);
    }

    #[test]
    fn filters_need_a_loaded_table() {
        let mut app = test_app();
        app.begin_filter_edit();
        assert!(!app.is_editing_filter());
    }
}
