use crate::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use crate::state::Mode;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Commands that can be bound to keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// No-op: explicitly unbinds a key (removes inherited/default binding)
    Noop,

    Quit,

    // List movement
    MoveUp,
    MoveDown,

    // Text editing (search query or new-name buffer)
    DeleteBackwardChar,
    ClearInput,

    // Picker commands
    QuickNew,
    DeleteEntry,

    // Generic confirm/cancel
    Confirm,
    Cancel,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noop" | "none" | "unbound" => Ok(Command::Noop),
            "quit" => Ok(Command::Quit),
            "move_up" => Ok(Command::MoveUp),
            "move_down" => Ok(Command::MoveDown),
            "delete_backward_char" => Ok(Command::DeleteBackwardChar),
            "clear_input" => Ok(Command::ClearInput),
            "quick_new" => Ok(Command::QuickNew),
            "delete_entry" => Ok(Command::DeleteEntry),
            "confirm" => Ok(Command::Confirm),
            "cancel" => Ok(Command::Cancel),
            _ => Err(format!("Unknown command: {s}")),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Command::Noop => "noop",
            Command::Quit => "quit",
            Command::MoveUp => "move_up",
            Command::MoveDown => "move_down",
            Command::DeleteBackwardChar => "delete_backward_char",
            Command::ClearInput => "clear_input",
            Command::QuickNew => "quick_new",
            Command::DeleteEntry => "delete_entry",
            Command::Confirm => "confirm",
            Command::Cancel => "cancel",
        };
        write!(f, "{s}")
    }
}

impl Command {
    /// Short label used in the footer hints
    pub fn description(&self) -> &'static str {
        match self {
            Command::Noop => "unbound",
            Command::Quit => "quit",
            Command::MoveUp => "up",
            Command::MoveDown => "down",
            Command::DeleteBackwardChar => "delete char",
            Command::ClearInput => "clear",
            Command::QuickNew => "new",
            Command::DeleteEntry => "delete",
            Command::Confirm => "select",
            Command::Cancel => "cancel",
        }
    }
}

/// Key bindings for a specific layer/mode
pub type KeyMap = HashMap<KeyEvent, Command>;

/// Complete key binding configuration, composed from reusable layers.
#[derive(Debug, Clone)]
pub struct KeysConfig {
    pub general: KeyMap,
    pub text_edit: KeyMap,
    pub list_navigation: KeyMap,
    pub browse: KeyMap,
    pub naming: KeyMap,
    pub confirm_delete: KeyMap,
}

/// Intermediate structure for deserializing key bindings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysConfigRaw {
    #[serde(default)]
    general: HashMap<String, String>,
    #[serde(default)]
    text_edit: HashMap<String, String>,
    #[serde(default)]
    list_navigation: HashMap<String, String>,
    #[serde(default)]
    browse: HashMap<String, String>,
    #[serde(default)]
    naming: HashMap<String, String>,
    #[serde(default)]
    confirm_delete: HashMap<String, String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeysConfig {
    pub fn new() -> Self {
        Self {
            general: Self::default_general(),
            text_edit: Self::default_text_edit(),
            list_navigation: Self::default_list_navigation(),
            browse: Self::default_browse(),
            naming: Self::default_naming(),
            confirm_delete: Self::default_confirm_delete(),
        }
    }

    /// Build the effective keymap for a given mode using precedence:
    /// general < shared layers < mode-specific.
    ///
    /// Confirming a delete deliberately sees only its own layer, so every key
    /// not bound there (including the general quit chord) cancels.
    pub fn keymap_for_mode(&self, mode: &Mode) -> KeyMap {
        let mut combined = KeyMap::new();

        match mode {
            Mode::Browsing => {
                Self::apply_layer(&mut combined, &self.general);
                Self::apply_layer(&mut combined, &self.text_edit);
                Self::apply_layer(&mut combined, &self.list_navigation);
                Self::apply_layer(&mut combined, &self.browse);
            }
            Mode::NamingNew { .. } => {
                Self::apply_layer(&mut combined, &self.general);
                Self::apply_layer(&mut combined, &self.text_edit);
                Self::apply_layer(&mut combined, &self.naming);
            }
            Mode::ConfirmingDelete { .. } => {
                Self::apply_layer(&mut combined, &self.confirm_delete);
            }
        }

        combined
    }

    /// Find the first key bound to a given command in a keymap.
    pub fn find_key(keymap: &KeyMap, command: &Command) -> Option<KeyEvent> {
        // Prefer unmodified keys, and lowercase over uppercase characters
        keymap
            .iter()
            .filter(|(_, cmd)| *cmd == command)
            .map(|(key, _)| *key)
            .min_by_key(|key| {
                let uppercase = matches!(key.code, KeyCode::Char(c) if c.is_uppercase());
                (key.modifiers, uppercase, key.code)
            })
    }

    fn apply_layer(base: &mut KeyMap, layer: &KeyMap) {
        for (key, command) in layer {
            if *command == Command::Noop {
                base.remove(key);
            } else {
                base.insert(*key, command.clone());
            }
        }
    }

    fn bind(map: &mut KeyMap, code: KeyCode, modifiers: KeyModifiers, command: Command) {
        map.insert(KeyEvent::new(code, modifiers), command);
    }

    fn default_general() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(
            &mut map,
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            Command::Quit,
        );
        map
    }

    fn default_text_edit() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(
            &mut map,
            KeyCode::Backspace,
            KeyModifiers::NONE,
            Command::DeleteBackwardChar,
        );
        Self::bind(
            &mut map,
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
            Command::ClearInput,
        );
        map
    }

    fn default_list_navigation() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(&mut map, KeyCode::Up, KeyModifiers::NONE, Command::MoveUp);
        Self::bind(
            &mut map,
            KeyCode::Down,
            KeyModifiers::NONE,
            Command::MoveDown,
        );
        Self::bind(
            &mut map,
            KeyCode::Char('p'),
            KeyModifiers::CONTROL,
            Command::MoveUp,
        );
        Self::bind(
            &mut map,
            KeyCode::Char('k'),
            KeyModifiers::CONTROL,
            Command::MoveUp,
        );
        Self::bind(
            &mut map,
            KeyCode::Char('j'),
            KeyModifiers::CONTROL,
            Command::MoveDown,
        );
        map
    }

    fn default_browse() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(
            &mut map,
            KeyCode::Enter,
            KeyModifiers::NONE,
            Command::Confirm,
        );
        Self::bind(
            &mut map,
            KeyCode::Char('n'),
            KeyModifiers::CONTROL,
            Command::QuickNew,
        );
        Self::bind(
            &mut map,
            KeyCode::Char('d'),
            KeyModifiers::CONTROL,
            Command::DeleteEntry,
        );
        Self::bind(
            &mut map,
            KeyCode::Delete,
            KeyModifiers::NONE,
            Command::DeleteEntry,
        );
        Self::bind(&mut map, KeyCode::Esc, KeyModifiers::NONE, Command::Quit);
        map
    }

    fn default_naming() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(
            &mut map,
            KeyCode::Enter,
            KeyModifiers::NONE,
            Command::Confirm,
        );
        Self::bind(&mut map, KeyCode::Esc, KeyModifiers::NONE, Command::Cancel);
        Self::bind(
            &mut map,
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            Command::Cancel,
        );
        map
    }

    fn default_confirm_delete() -> KeyMap {
        let mut map = KeyMap::new();
        Self::bind(
            &mut map,
            KeyCode::Char('y'),
            KeyModifiers::NONE,
            Command::Confirm,
        );
        Self::bind(
            &mut map,
            KeyCode::Char('Y'),
            KeyModifiers::NONE,
            Command::Confirm,
        );
        map
    }

    /// Parse a string representation of keybindings into a `KeyMap`
    fn parse_keymap(raw_map: &HashMap<String, String>) -> Result<KeyMap, String> {
        let mut keymap = KeyMap::new();
        for (key_str, command_str) in raw_map {
            let key_event =
                KeyEvent::from_str(key_str).map_err(|e| format!("Invalid key '{key_str}': {e}"))?;
            let command = Command::from_str(command_str)
                .map_err(|e| format!("Invalid command '{command_str}': {e}"))?;
            keymap.insert(key_event, command);
        }
        Ok(keymap)
    }

    /// Merge user configuration with defaults.
    ///
    /// Keep `Noop` values so higher-precedence layers can explicitly unbind inherited mappings.
    fn from_raw(raw: &KeysConfigRaw) -> Result<Self, String> {
        let mut config = Self::default();

        config.general.extend(Self::parse_keymap(&raw.general)?);
        config.text_edit.extend(Self::parse_keymap(&raw.text_edit)?);
        config
            .list_navigation
            .extend(Self::parse_keymap(&raw.list_navigation)?);
        config.browse.extend(Self::parse_keymap(&raw.browse)?);
        config.naming.extend(Self::parse_keymap(&raw.naming)?);
        config
            .confirm_delete
            .extend(Self::parse_keymap(&raw.confirm_delete)?);

        Ok(config)
    }
}

impl<'de> Deserialize<'de> for KeysConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = KeysConfigRaw::deserialize(deserializer)?;
        KeysConfig::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use std::{path::PathBuf, time::SystemTime};

    fn empty_raw() -> KeysConfigRaw {
        KeysConfigRaw {
            general: HashMap::new(),
            text_edit: HashMap::new(),
            list_navigation: HashMap::new(),
            browse: HashMap::new(),
            naming: HashMap::new(),
            confirm_delete: HashMap::new(),
        }
    }

    fn confirming() -> Mode {
        Mode::ConfirmingDelete {
            target: CatalogEntry {
                name: "x".into(),
                path: PathBuf::from("/tmp/x"),
                created_at: SystemTime::UNIX_EPOCH,
                accessed_at: SystemTime::UNIX_EPOCH,
                score: 0.0,
            },
        }
    }

    #[test]
    fn test_command_from_str() {
        assert_eq!(Command::from_str("quit").unwrap(), Command::Quit);
        assert_eq!(
            Command::from_str("quick_new").unwrap(),
            Command::QuickNew
        );
        assert!(Command::from_str("open_repo").is_err());
    }

    #[test]
    fn test_command_display_round_trip() {
        for command in [
            Command::Quit,
            Command::MoveUp,
            Command::ClearInput,
            Command::DeleteEntry,
            Command::Cancel,
        ] {
            assert_eq!(Command::from_str(&command.to_string()).unwrap(), command);
        }
    }

    #[test]
    fn test_browsing_defaults() {
        let map = KeysConfig::default().keymap_for_mode(&Mode::Browsing);
        let key = |s: &str| s.parse::<KeyEvent>().unwrap();
        assert_eq!(map.get(&key("enter")), Some(&Command::Confirm));
        assert_eq!(map.get(&key("C-n")), Some(&Command::QuickNew));
        assert_eq!(map.get(&key("C-d")), Some(&Command::DeleteEntry));
        assert_eq!(map.get(&key("delete")), Some(&Command::DeleteEntry));
        assert_eq!(map.get(&key("C-k")), Some(&Command::MoveUp));
        assert_eq!(map.get(&key("C-j")), Some(&Command::MoveDown));
        assert_eq!(map.get(&key("C-u")), Some(&Command::ClearInput));
        assert_eq!(map.get(&key("esc")), Some(&Command::Quit));
        assert_eq!(map.get(&key("C-c")), Some(&Command::Quit));
        // plain characters are left for the search query
        assert_eq!(map.get(&key("q")), None);
    }

    #[test]
    fn test_naming_overrides_general_quit() {
        let map = KeysConfig::default().keymap_for_mode(&Mode::NamingNew {
            buffer: String::new(),
        });
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map.get(&ctrl_c), Some(&Command::Cancel));
        assert_eq!(map.get(&"down".parse().unwrap()), None);
    }

    #[test]
    fn test_confirm_delete_only_binds_y() {
        let map = KeysConfig::default().keymap_for_mode(&confirming());
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"y".parse().unwrap()), Some(&Command::Confirm));
        assert_eq!(map.get(&"Y".parse().unwrap()), Some(&Command::Confirm));
        assert_eq!(map.get(&"C-c".parse().unwrap()), None);
    }

    #[test]
    fn test_parse_invalid_key() {
        let mut raw_map = HashMap::new();
        raw_map.insert("C-nope".to_string(), "quit".to_string());
        assert!(KeysConfig::parse_keymap(&raw_map).is_err());
    }

    #[test]
    fn test_parse_invalid_command() {
        let mut raw_map = HashMap::new();
        raw_map.insert("C-c".to_string(), "launch".to_string());
        assert!(KeysConfig::parse_keymap(&raw_map).is_err());
    }

    #[test]
    fn test_mode_precedence_more_specific_wins() {
        let mut raw = empty_raw();
        raw.browse.insert("C-c".to_string(), "quick_new".to_string());

        let config = KeysConfig::from_raw(&raw).unwrap();
        let map = config.keymap_for_mode(&Mode::Browsing);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map.get(&ctrl_c), Some(&Command::QuickNew));
    }

    #[test]
    fn test_noop_can_unbind_inherited_mapping() {
        let mut raw = empty_raw();
        raw.browse.insert("C-u".to_string(), "noop".to_string());

        let config = KeysConfig::from_raw(&raw).unwrap();
        let map = config.keymap_for_mode(&Mode::Browsing);
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(map.get(&ctrl_u), None, "C-u should be unbound");

        let naming = config.keymap_for_mode(&Mode::NamingNew {
            buffer: String::new(),
        });
        assert_eq!(naming.get(&ctrl_u), Some(&Command::ClearInput));
    }

    #[test]
    fn test_find_key_reverse_lookup() {
        let keymap = KeysConfig::default().keymap_for_mode(&Mode::Browsing);
        assert_eq!(
            KeysConfig::find_key(&keymap, &Command::QuickNew),
            Some(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeysConfig::find_key(&keymap, &Command::Cancel), None);
        assert_eq!(
            KeysConfig::find_key(&keymap, &Command::Quit),
            Some(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
        );

        let confirming = KeysConfig::default().confirm_delete;
        assert_eq!(
            KeysConfig::find_key(&confirming, &Command::Confirm),
            Some(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE))
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: KeysConfig = toml::from_str(
            r#"
[browse]
"C-x" = "delete_entry"
"#,
        )
        .unwrap();
        let map = config.keymap_for_mode(&Mode::Browsing);
        assert_eq!(
            map.get(&"C-x".parse().unwrap()),
            Some(&Command::DeleteEntry)
        );
    }
}
