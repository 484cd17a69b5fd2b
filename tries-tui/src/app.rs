use crate::{components, keymap, theme::Theme};
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
};
use std::{io::Stderr, time::Duration};
use tries_core::{
    action::Action,
    config::KeysConfig,
    event::Event,
    keyboard::KeyEvent,
    state::{Clock, Picker, transition},
};

/// The picker draws to stderr so stdout stays free for the selected path.
pub type StderrTerminal = Terminal<CrosstermBackend<Stderr>>;

const POLL_INTERVAL: Duration = Duration::from_millis(80);
const TITLE: &str = "tries";

/// Drive the picker until it produces an action or the user quits.
pub fn run(
    terminal: &mut StderrTerminal,
    mut picker: Picker,
    theme: &Theme,
    keys: &KeysConfig,
) -> anyhow::Result<Action> {
    loop {
        let clock = Clock::system();
        terminal.draw(|f| draw(f, &picker, &clock, keys, theme))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Some(event) = to_picker_event(event::read()?, &picker, keys) else {
            continue;
        };

        let (next, action) = transition(picker, event, &Clock::system());
        picker = next;
        if picker.is_finished() {
            log::debug!("Picker finished with {action:?}");
            return Ok(action);
        }
    }
}

/// Key presses go through the key map; pasted text is offered as one input.
fn to_picker_event(event: TermEvent, picker: &Picker, keys: &KeysConfig) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            KeyEvent::from_crossterm(key).and_then(|key| keymap::resolve_event(key, picker, keys))
        }
        TermEvent::Paste(text) => Some(Event::Input(text)),
        _ => None,
    }
}

pub fn draw(f: &mut Frame, picker: &Picker, clock: &Clock, keys: &KeysConfig, theme: &Theme) {
    let [search_area, list_area, error_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(u16::from(picker.error.is_some())),
        Constraint::Length(1),
    ])
    .areas(f.area());

    components::search_bar::draw(f, search_area, TITLE, &picker.query, theme);
    components::entry_list::draw(f, list_area, picker, clock.now, theme);
    components::error_bar::draw(f, error_area, picker, theme);
    components::footer::draw(f, footer_area, &picker.mode, keys, theme);

    components::new_name::draw(f, &picker.mode, &clock.today, theme);
    components::confirm_delete::draw(f, f.area(), &picker.mode, keys, theme);
}
