use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub mod confirm_delete;
pub mod dialog;
pub mod entry_list;
pub mod error_bar;
pub mod footer;
pub mod new_name;
pub mod search_bar;

/// Popups take four fifths of the terminal width.
pub fn dialog_width(terminal_width: u16) -> u16 {
    terminal_width.saturating_mul(4) / 5
}

/// Center a `width` x `height` rect within `r`, shrinking it to fit.
pub fn centered_fixed_rect(width: u16, height: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(r.height))])
        .flex(Flex::Center)
        .areas(r);
    let [area] = Layout::horizontal([Constraint::Length(width.min(r.width))])
        .flex(Flex::Center)
        .areas(row);
    area
}
