use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use std::time::SystemTime;
use tries_core::{
    catalog::{self, CatalogEntry},
    score,
    state::{CreateRow, Picker},
};
use unicode_width::UnicodeWidthStr;

const HIGHLIGHT_SYMBOL: &str = "▸ ";
const DATE_PREFIX_LEN: usize = "YYYY-MM-DD-".len();

/// Name spans: the date prefix muted, matched characters in the accent colour.
fn name_spans<'a>(name: &str, query: &str, theme: &Theme) -> Vec<Span<'a>> {
    let matched = score::highlight_positions(name, query);
    let prefix_len = if score::has_date_prefix(name) {
        DATE_PREFIX_LEN
    } else {
        0
    };

    let base = Style::default();
    let muted = Style::default().fg(theme.muted);
    let hit = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = Vec::new();
    let mut run = String::new();
    let mut run_style = base;

    for (idx, c) in name.chars().enumerate() {
        let style = if matched.contains(&idx) {
            hit
        } else if idx < prefix_len {
            muted
        } else {
            base
        };
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    spans
}

fn entry_line<'a>(
    entry: &CatalogEntry,
    query: &str,
    now: SystemTime,
    width: usize,
    theme: &Theme,
) -> Line<'a> {
    let meta = format!(
        "{}, {:.1}",
        catalog::relative_time(entry.accessed_at, now),
        entry.score
    );
    let mut spans = name_spans(&entry.name, query, theme);
    let used = entry.name.width() + meta.width();
    let gap = width.saturating_sub(used).max(1);
    spans.push(Span::raw(" ".repeat(gap)));
    spans.push(Span::styled(meta, Style::default().fg(theme.muted)));
    Line::from(spans)
}

fn create_line<'a>(row: CreateRow, theme: &Theme) -> Line<'a> {
    let label = Style::default().fg(theme.success);
    match row {
        CreateRow::Prompt => Line::from(Span::styled("Create new experiment...", label)),
        CreateRow::Create(name) => Line::from(vec![
            Span::styled("Create: ", label),
            Span::raw(name),
        ]),
        CreateRow::Clone { repo, .. } => Line::from(vec![
            Span::styled("Clone: ", Style::default().fg(theme.secondary)),
            Span::raw(repo),
        ]),
    }
}

pub fn draw(f: &mut Frame, area: Rect, picker: &Picker, now: SystemTime, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} of {} ", picker.ranked.len(), picker.entries.len()))
        .border_style(Style::default().fg(theme.border));
    let row_width = usize::from(block.inner(area).width).saturating_sub(HIGHLIGHT_SYMBOL.width());

    let mut items: Vec<ListItem> = picker
        .ranked
        .iter()
        .map(|entry| ListItem::new(entry_line(entry, &picker.query, now, row_width, theme)))
        .collect();
    items.push(ListItem::new(create_line(picker.create_row(), theme)));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut list_state = ListState::default();
    list_state.select(Some(picker.cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::{path::PathBuf, time::Duration};
    use tries_core::{config::ThemeConfig, state::Clock};

    fn theme() -> Theme {
        Theme::from_config(&ThemeConfig::default())
    }

    fn clock() -> Clock {
        Clock {
            now: SystemTime::UNIX_EPOCH + Duration::from_secs(1_755_648_000),
            today: "2025-08-20".into(),
        }
    }

    fn entry(name: &str, hours_ago: u64) -> CatalogEntry {
        let at = clock().now - Duration::from_secs(hours_ago * 3600);
        CatalogEntry {
            name: name.into(),
            path: PathBuf::from("/base").join(name),
            created_at: at,
            accessed_at: at,
            score: 0.0,
        }
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn render(picker: &Picker, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| draw(f, f.area(), picker, clock().now, &theme()))
            .unwrap();
        rows(terminal.backend().buffer())
    }

    #[test]
    fn test_name_spans_split_prefix_and_matches() {
        let spans = name_spans("2025-08-14-redis", "rd", &theme());
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["2025-08-14-", "r", "e", "d", "is"]);
        assert_eq!(spans[0].style.fg, Some(theme().muted));
        assert_eq!(spans[1].style.fg, Some(theme().accent));
        assert_eq!(spans[2].style.fg, None);
    }

    #[test]
    fn test_name_spans_match_inside_prefix() {
        let spans = name_spans("2025-08-14-x", "2", &theme());
        assert_eq!(spans[0].content, "2");
        assert_eq!(spans[0].style.fg, Some(theme().accent));
        assert_eq!(spans[1].content, "025-08-14-");
        assert_eq!(spans[1].style.fg, Some(theme().muted));
    }

    #[test]
    fn test_rows_show_time_and_score_right_aligned() {
        let mut picker = Picker::new(
            PathBuf::from("/base"),
            vec![entry("2025-08-14-redis", 3)],
            "",
            &clock(),
        );
        picker.ranked[0].score = 4.3;
        let lines = render(&picker, 50, 5);

        assert!(lines[1].contains("2025-08-14-redis"), "{lines:?}");
        assert!(lines[1].trim_end().ends_with("3h ago, 4.3│"), "{lines:?}");
        assert!(lines[2].contains("Create new experiment..."), "{lines:?}");
    }

    #[test]
    fn test_create_row_reflects_query() {
        let picker = Picker::new(PathBuf::from("/base"), vec![], "redis pool", &clock());
        let lines = render(&picker, 50, 4);
        assert!(lines[1].contains("Create: redis-pool"), "{lines:?}");

        let picker = Picker::new(PathBuf::from("/base"), vec![], "gh:acme/widgets", &clock());
        let lines = render(&picker, 50, 4);
        assert!(lines[1].contains("Clone: widgets"), "{lines:?}");
    }

    #[test]
    fn test_cursor_stays_visible_when_scrolled() {
        let entries: Vec<_> = (0..10).map(|i| entry(&format!("entry-{i}"), i)).collect();
        let mut picker = Picker::new(PathBuf::from("/base"), entries, "", &clock());
        picker.cursor = picker.create_row_index();

        let lines = render(&picker, 50, 5);
        assert!(lines[3].contains("▸ Create new experiment..."), "{lines:?}");
    }
}
