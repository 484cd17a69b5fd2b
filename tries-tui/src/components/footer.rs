use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tries_core::{config::KeysConfig, state::Mode};

/// `(key, description)` pairs for the commands shown in `mode`, skipping
/// commands that have been unbound.
fn hints(mode: &Mode, keys: &KeysConfig) -> Vec<(String, &'static str)> {
    let keymap = keys.keymap_for_mode(mode);
    mode.footer_commands()
        .iter()
        .filter_map(|command| {
            KeysConfig::find_key(&keymap, command).map(|key| (key.to_string(), command.description()))
        })
        .collect()
}

pub fn draw(f: &mut Frame, area: Rect, mode: &Mode, keys: &KeysConfig, theme: &Theme) {
    let key_style = Style::default().fg(theme.hint).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.muted);

    let mut spans = vec![Span::raw(" ")];
    for (idx, (key, description)) in hints(mode, keys).into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", text_style));
        }
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {description}"), text_style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tries_core::config::Command;

    #[test]
    fn test_browsing_hints() {
        let hints = hints(&Mode::Browsing, &KeysConfig::default());
        let descriptions: Vec<_> = hints.iter().map(|(_, d)| *d).collect();
        assert_eq!(descriptions, vec!["down", "select", "new", "delete", "quit"]);
        assert!(hints.contains(&("enter".to_string(), "select")));
    }

    #[test]
    fn test_naming_hints() {
        let mode = Mode::NamingNew {
            buffer: String::new(),
        };
        let hints = hints(&mode, &KeysConfig::default());
        let descriptions: Vec<_> = hints.iter().map(|(_, d)| *d).collect();
        assert_eq!(descriptions, vec!["select", "cancel"]);
    }

    #[test]
    fn test_unbound_command_is_hidden() {
        let mut keys = KeysConfig::default();
        keys.browse = HashMap::new();
        keys.browse.insert("enter".parse().unwrap(), Command::Confirm);
        let hints = hints(&Mode::Browsing, &keys);
        assert!(!hints.iter().any(|(_, d)| *d == "new"));
        assert!(!hints.iter().any(|(_, d)| *d == "delete"));
        // the general layer still provides quit
        assert!(hints.iter().any(|(_, d)| *d == "quit"));
    }
}
