use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const PLACEHOLDER: &str = "Type to search, or a name or repo URL to create...";

/// The part of `text` that fits in `max_width` columns with room for the
/// cursor after it. Returns the byte offset the visible tail starts at and
/// the cursor column relative to the input area.
fn visible_tail(text: &str, max_width: u16) -> (usize, u16) {
    let room = usize::from(max_width.saturating_sub(1));
    let mut start = text.len();
    let mut width = 0;

    for (idx, grapheme) in text.grapheme_indices(true).rev() {
        let w = grapheme.width();
        if width + w > room {
            break;
        }
        width += w;
        start = idx;
    }

    (start, u16::try_from(width).unwrap_or(u16::MAX))
}

pub fn draw(f: &mut Frame, area: Rect, title: &str, text: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);

    let (content, cursor_col) = if text.is_empty() {
        let placeholder = Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        );
        (Line::from(placeholder), 0)
    } else {
        let (start, cursor_col) = visible_tail(text, inner.width);
        (Line::from(Span::raw(&text[start..])), cursor_col)
    };

    f.render_widget(Paragraph::new(content).block(block), area);
    if inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x.saturating_add(cursor_col), inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use tries_core::config::ThemeConfig;

    #[test]
    fn test_short_text_is_fully_visible() {
        assert_eq!(visible_tail("redis", 10), (0, 5));
        assert_eq!(visible_tail("", 10), (0, 0));
    }

    #[test]
    fn test_long_text_keeps_the_tail() {
        let text = "hello world";
        let (start, col) = visible_tail(text, 5);
        assert_eq!(&text[start..], "orld");
        assert_eq!(col, 4);
    }

    #[test]
    fn test_wide_graphemes_are_not_split() {
        let text = "A👩‍💻B";
        let (start, col) = visible_tail(text, 3);
        assert_eq!(&text[start..], "B");
        assert_eq!(col, 1);

        let (start, col) = visible_tail(text, 4);
        assert_eq!(&text[start..], "👩‍💻B");
        assert_eq!(col, 3);
    }

    #[test]
    fn test_zero_width_area() {
        assert_eq!(visible_tail("abc", 0), (3, 0));
    }

    #[test]
    fn test_draw_shows_placeholder_then_query() {
        let theme = Theme::from_config(&ThemeConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();

        terminal
            .draw(|f| draw(f, f.area(), "tries", "", &theme))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Type to search"));

        terminal
            .draw(|f| draw(f, f.area(), "tries", "redis", &theme))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("redis"));
        assert!(!text.contains("Type to search"));
        terminal.backend_mut().assert_cursor_position((6, 1));
    }
}
