use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};
use tries_core::state::Picker;

pub fn draw(f: &mut Frame, area: Rect, picker: &Picker, theme: &Theme) {
    if let Some(error) = &picker.error {
        let error_line = Paragraph::new(Span::styled(
            format!(" Error: {error}"),
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(error_line, area);
    }
}
