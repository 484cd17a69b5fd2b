use super::dialog::Dialog;
use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
};
use tries_core::{
    config::{Command, KeysConfig},
    paths,
    state::Mode,
};

pub fn draw(f: &mut Frame, area: Rect, mode: &Mode, keys: &KeysConfig, theme: &Theme) {
    let Mode::ConfirmingDelete { target } = mode else {
        return;
    };

    let keymap = keys.keymap_for_mode(mode);
    let confirm_key = KeysConfig::find_key(&keymap, &Command::Confirm)
        .map_or_else(|| "y".to_string(), |k| k.to_string());
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(
                format!("\"{}\"", target.name),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("?"),
        ]),
        Line::styled(
            paths::display_path(&target.path),
            Style::default().fg(theme.muted),
        ),
        Line::raw(""),
        Line::styled(
            "The directory and everything in it will be removed. This cannot be undone.",
            Style::default().fg(theme.warning),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(confirm_key, bold),
            Span::raw(" to delete, any other key to cancel"),
        ]),
    ];

    Dialog::new(lines)
        .title("Confirm delete")
        .border_color(theme.warning)
        .render(f, area);
}
