use super::*;
use crate::toast::{Toast, ToastLevel};
use ratatui::widgets::Clear;
use std::time::Instant;

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// Stack the live toasts upwards from the bottom-right corner, newest at
/// the bottom.
pub fn render_toasts(frame: &mut Frame, app: &App) {
    let now = Instant::now();
    let mut area = frame.area();

    let toasts: Vec<&Toast> = app.toasts.visible().collect();
    for toast in toasts.into_iter().rev() {
        if area.height < TOAST_HEIGHT {
            break;
        }
        let rect = utils::bottom_right_rect(TOAST_WIDTH, TOAST_HEIGHT, area);
        render_toast(frame, rect, toast, toast.is_fading(now));
        area.height -= TOAST_HEIGHT;
    }
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast, fading: bool) {
    let color = match toast.level {
        ToastLevel::Success => Color::Green,
        ToastLevel::Error => Color::Red,
    };
    let mut style = Style::default().fg(color);
    if fading {
        style = style.add_modifier(Modifier::DIM);
    }

    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(Span::styled(toast.message.clone(), style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}
