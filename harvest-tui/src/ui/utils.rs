use ratatui::layout::Rect;

/// A `width` x `height` box anchored to the bottom-right corner of `r`,
/// shrunk to fit.
pub fn bottom_right_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + r.width - width,
        y: r.y + r.height - height,
        width,
        height,
    }
}
