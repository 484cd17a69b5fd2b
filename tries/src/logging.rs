use std::path::PathBuf;
use std::str::FromStr;
use tries_core::constants::APP_NAME;

const LOG_FILE_NAME: &str = "tries.log";

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub const LOG_LEVEL_ENV: &str = "TRIES_LOG";
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

pub fn cache_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        if let Ok(xdg_cache_home) = std::env::var("XDG_CACHE_HOME")
            && !xdg_cache_home.is_empty()
        {
            return Some(PathBuf::from(xdg_cache_home).join(APP_NAME));
        }
        dirs::home_dir().map(|home| home.join(".cache").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        Some(
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_NAME),
        )
    }
}

pub fn default_log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

/// Level named by `value`, or the default when unset or unrecognised.
pub fn level_from(value: Option<&str>) -> log::LevelFilter {
    value
        .and_then(|v| log::LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<()> {
    if level == log::LevelFilter::Off {
        return Ok(());
    }
    let log_file = default_log_file()
        .ok_or_else(|| anyhow::anyhow!("Unable to determine the cache directory"))?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("tries logging initialised (level={level})");
    Ok(())
}
