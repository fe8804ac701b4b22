use harvest::domain::DataSource;
use harvest::Workbench;
use time::{Date, OffsetDateTime};

use crate::toast::ToastQueue;

mod form;
mod sources;
mod state;
mod table;
pub use state::{FormField, FormFocus, FormState, RowInputs, TableState, TextInput, View};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub workbench: Workbench,

    // Entry form, present while the workbench form is open
    pub form: Option<FormState>,

    // History table
    pub table: TableState,

    // Source picker cursor
    pub source_cursor: usize,

    pub toasts: ToastQueue,

    /// Set when a submission is queued or running; cleared once it finishes.
    pub submit_pending: bool,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(sources: Vec<DataSource>) -> Self {
        Self {
            running: true,
            current_view: View::Table,
            workbench: Workbench::new(sources),
            form: None,
            table: TableState::default(),
            source_cursor: 0,
            toasts: ToastQueue::new(),
            submit_pending: false,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
    }
}

pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
