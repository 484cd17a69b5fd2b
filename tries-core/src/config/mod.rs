pub mod keys;

use crate::constants::{APP_NAME, DEFAULT_CLONE_TIMEOUT, DEFAULT_SHELL};
use crate::paths::expand_tilde;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub use keys::{Command, KeysConfig};

pub fn config_dir() -> Option<PathBuf> {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return Some(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
        dirs::home_dir().map(|home| home.join(".config").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        dirs::config_dir().map(|dir| dir.join(APP_NAME))
    }
}

pub fn default_config_file() -> Result<PathBuf> {
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .context("Unable to determine the config directory")
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the experiments. Supports `~` for the home directory:
    /// ```toml
    /// path = "~/src/tries"
    /// ```
    pub path: Option<String>,

    /// Shell to start inside the selected directory. Falls back to `$SHELL`.
    pub shell: Option<String>,

    #[serde(default)]
    pub clone: CloneConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Key binding configuration.
    /// To unbind an inherited key mapping, assign it to `noop`.
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CloneConfig {
    /// Seconds before a running clone is killed and its directory removed.
    #[serde(default = "CloneConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl CloneConfig {
    fn default_timeout_secs() -> u64 {
        DEFAULT_CLONE_TIMEOUT.as_secs()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Cursor row and matched characters (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_accent",
        deserialize_with = "deserialize_color"
    )]
    pub accent: ThemeColor,
    /// Search prompt (default: "cyan").
    #[serde(
        default = "ThemeConfig::default_secondary",
        deserialize_with = "deserialize_color"
    )]
    pub secondary: ThemeColor,
    /// The create/clone row (default: "green").
    #[serde(
        default = "ThemeConfig::default_success",
        deserialize_with = "deserialize_color"
    )]
    pub success: ThemeColor,
    /// Error color (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
    /// Delete confirmation (default: "red").
    #[serde(
        default = "ThemeConfig::default_warning",
        deserialize_with = "deserialize_color"
    )]
    pub warning: ThemeColor,
    /// Date prefixes, timestamps and scores (default: "darkgray").
    #[serde(
        default = "ThemeConfig::default_muted",
        deserialize_with = "deserialize_color"
    )]
    pub muted: ThemeColor,
    /// Border color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_border",
        deserialize_with = "deserialize_color"
    )]
    pub border: ThemeColor,
    /// Key hints in the footer (default: "blue").
    #[serde(
        default = "ThemeConfig::default_hint",
        deserialize_with = "deserialize_color"
    )]
    pub hint: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Self::default_accent(),
            secondary: Self::default_secondary(),
            success: Self::default_success(),
            error: Self::default_error(),
            warning: Self::default_warning(),
            muted: Self::default_muted(),
            border: Self::default_border(),
            hint: Self::default_hint(),
        }
    }
}

impl ThemeConfig {
    fn default_accent() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_secondary() -> ThemeColor {
        ThemeColor::Named(NamedColor::Cyan)
    }
    fn default_success() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_warning() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Named(NamedColor::DarkGray)
    }
    fn default_border() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_hint() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
}

impl NamedColor {
    /// All named colours in alphabetical order, as accepted by the config parser.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("darkgray", NamedColor::DarkGray),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("magenta", NamedColor::Magenta),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
            Self::DarkGray => "darkgray",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#')
            && hex.len() == 6
            && hex.is_ascii()
        {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase().replace(['-', '_'], "");
        let lookup = match lower.as_str() {
            "grey" => "gray",
            "darkgrey" => "darkgray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey, darkgray) or hex (#rrggbb)"
        ))
    })
}

impl Config {
    /// Base directory, preferring a non-empty environment override over the config file.
    pub fn resolved_base_path(&self, env_override: Option<&str>) -> Option<PathBuf> {
        env_override
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .or_else(|| self.path.as_deref().map(str::trim).filter(|p| !p.is_empty()))
            .and_then(expand_tilde)
    }

    pub fn resolved_shell(&self, env_shell: Option<&str>) -> String {
        self.shell
            .as_deref()
            .or(env_shell)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SHELL)
            .to_string()
    }
}

/// A parsed config file, noting whether it was in the old one-line format.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub file: PathBuf,
    pub legacy: bool,
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Older releases stored nothing but the base path, on a single line.
fn parse_legacy(contents: &str) -> Option<String> {
    let trimmed = contents.trim();
    if trimmed.is_empty() || trimmed.lines().count() != 1 {
        return None;
    }
    Some(trimmed.to_string())
}

/// Load the config file. A missing file yields the defaults.
pub fn load_config(config_override: Option<&Path>) -> Result<LoadedConfig> {
    let file = match config_override {
        Some(path) => path.to_path_buf(),
        None => default_config_file()?,
    };
    if !file.exists() {
        return Ok(LoadedConfig {
            config: Config::default(),
            file,
            legacy: false,
        });
    }

    let contents = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read config file {}", file.display()))?;
    // Only text that is not TOML at all can be the old format
    if toml::from_str::<toml::Table>(&contents).is_err()
        && let Some(path) = parse_legacy(&contents)
    {
        log::info!("Treating {} as a legacy plain-text config", file.display());
        return Ok(LoadedConfig {
            config: Config {
                path: Some(path),
                ..Config::default()
            },
            file,
            legacy: true,
        });
    }

    let config = load_config_from_str(&contents)
        .with_context(|| format!("Invalid config file {}", file.display()))?;
    Ok(LoadedConfig {
        config,
        file,
        legacy: false,
    })
}

/// Write `path` and `shell` into the config file, keeping any other settings already there.
pub fn save_settings(file: &Path, path: &str, shell: Option<&str>) -> Result<()> {
    let mut table = match fs::read_to_string(file) {
        Ok(contents) => toml::from_str::<toml::Table>(&contents).unwrap_or_default(),
        Err(_) => toml::Table::new(),
    };
    table.insert("path".to_string(), toml::Value::String(path.to_string()));
    match shell {
        Some(shell) => {
            table.insert("shell".to_string(), toml::Value::String(shell.to_string()));
        }
        None => {
            table.remove("shell");
        }
    }

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let serialized = toml::to_string(&table).context("Failed to serialize config")?;
    fs::write(file, serialized)
        .with_context(|| format!("Failed to write config file {}", file.display()))?;
    log::info!("Saved config to {}", file.display());
    Ok(())
}
