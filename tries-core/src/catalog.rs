use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

/// One existing experiment directory directly under the base path.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub path: PathBuf,
    /// Birth time where the platform reports one, otherwise the modification time.
    pub created_at: SystemTime,
    /// Modification time, refreshed by [`touch`] whenever the entry is selected.
    pub accessed_at: SystemTime,
    /// Relevance against the current query; zero until ranked.
    pub score: f64,
}

/// List the immediate subdirectories of `base`, ordered by name.
///
/// An unreadable base directory is the same as an empty one.
pub fn scan(base: &Path) -> Vec<CatalogEntry> {
    let read_dir = match fs::read_dir(base) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            log::debug!("Cannot read {}: {e}", base.display());
            return Vec::new();
        }
    };

    let mut entries: Vec<CatalogEntry> = read_dir
        .filter_map(Result::ok)
        .filter_map(|dir_entry| {
            let path = dir_entry.path();
            // follows symlinks so linked experiment folders are listed too
            let metadata = fs::metadata(&path).ok()?;
            if !metadata.is_dir() {
                return None;
            }
            let name = dir_entry.file_name().to_str()?.to_string();
            let accessed_at = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            let created_at = metadata.created().unwrap_or(accessed_at);
            Some(CatalogEntry {
                name,
                path,
                created_at,
                accessed_at,
                score: 0.0,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Mark a directory as just used by setting its modification time to `now`.
pub fn touch(path: &Path, now: SystemTime) -> std::io::Result<()> {
    fs::File::open(path)?.set_modified(now)
}

/// Short human form of how long ago `then` was, e.g. `5m ago`.
pub fn relative_time(then: SystemTime, now: SystemTime) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    let secs = now
        .duration_since(then)
        .unwrap_or(Duration::ZERO)
        .as_secs();

    if secs < 10 {
        "just now".to_string()
    } else if secs < HOUR {
        format!("{}m ago", secs / MINUTE)
    } else if secs < DAY {
        format!("{}h ago", secs / HOUR)
    } else if secs < 30 * DAY {
        format!("{}d ago", secs / DAY)
    } else if secs < 365 * DAY {
        format!("{}mo ago", secs / (30 * DAY))
    } else {
        format!("{}y ago", secs / (365 * DAY))
    }
}
