use super::dialog::Dialog;
use crate::theme::Theme;
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
};
use tries_core::state::Mode;

/// Popup for naming a new directory: the dated prefix followed by the buffer.
pub fn draw(f: &mut Frame, mode: &Mode, today: &str, theme: &Theme) {
    let Mode::NamingNew { buffer } = mode else {
        return;
    };

    let name = Line::from(vec![
        Span::styled(format!("{today}-"), Style::default().fg(theme.muted)),
        Span::styled(
            buffer.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);

    Dialog::new(vec![name])
        .title("New experiment")
        .border_color(theme.success)
        .render(f, f.area());
}
