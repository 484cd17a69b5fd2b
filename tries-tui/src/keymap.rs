use tries_core::{
    config::{Command, KeysConfig},
    event::Event,
    keyboard::KeyEvent,
    state::{Mode, Picker},
};

/// Resolve a key press into a picker event for the current mode.
///
/// Bound keys become commands. Unbound printable keys become text input,
/// except while confirming a delete, where every unbound key cancels.
pub fn resolve_event(key: KeyEvent, picker: &Picker, keys: &KeysConfig) -> Option<Event> {
    let keymap = keys.keymap_for_mode(&picker.mode);
    if let Some(command) = keymap.get(&key) {
        return Some(Event::Command(command.clone()));
    }

    match picker.mode {
        Mode::ConfirmingDelete { .. } => Some(Event::Command(Command::Cancel)),
        Mode::Browsing | Mode::NamingNew { .. } => {
            key.typed_char().map(|c| Event::Input(c.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::SystemTime;
    use tries_core::{catalog::CatalogEntry, state::Clock};

    fn picker(mode: Mode) -> Picker {
        let clock = Clock {
            now: SystemTime::UNIX_EPOCH,
            today: "2025-08-20".into(),
        };
        let mut picker = Picker::new(PathBuf::from("/base"), vec![], "", &clock);
        picker.mode = mode;
        picker
    }

    fn key(s: &str) -> KeyEvent {
        s.parse().unwrap()
    }

    fn confirming() -> Mode {
        Mode::ConfirmingDelete {
            target: CatalogEntry {
                name: "x".into(),
                path: PathBuf::from("/base/x"),
                created_at: SystemTime::UNIX_EPOCH,
                accessed_at: SystemTime::UNIX_EPOCH,
                score: 0.0,
            },
        }
    }

    #[test]
    fn test_bound_key_becomes_command() {
        let keys = KeysConfig::default();
        assert_eq!(
            resolve_event(key("C-n"), &picker(Mode::Browsing), &keys),
            Some(Event::Command(Command::QuickNew))
        );
    }

    #[test]
    fn test_plain_char_becomes_input() {
        let keys = KeysConfig::default();
        assert_eq!(
            resolve_event(key("q"), &picker(Mode::Browsing), &keys),
            Some(Event::Input("q".into()))
        );
        assert_eq!(
            resolve_event(
                key("space"),
                &picker(Mode::NamingNew {
                    buffer: String::new()
                }),
                &keys
            ),
            Some(Event::Input(" ".into()))
        );
    }

    #[test]
    fn test_unbound_chord_is_ignored() {
        let keys = KeysConfig::default();
        assert_eq!(resolve_event(key("A-x"), &picker(Mode::Browsing), &keys), None);
        assert_eq!(resolve_event(key("left"), &picker(Mode::Browsing), &keys), None);
    }

    #[test]
    fn test_confirm_delete_only_y_confirms() {
        let keys = KeysConfig::default();
        let p = picker(confirming());
        assert_eq!(
            resolve_event(key("y"), &p, &keys),
            Some(Event::Command(Command::Confirm))
        );
        assert_eq!(
            resolve_event(key("Y"), &p, &keys),
            Some(Event::Command(Command::Confirm))
        );
        for other in ["n", "enter", "esc", "C-c", "left"] {
            assert_eq!(
                resolve_event(key(other), &p, &keys),
                Some(Event::Command(Command::Cancel)),
                "{other}"
            );
        }
    }
}
