use std::time::Duration;

pub const APP_NAME: &str = "tries";

/// Environment variable that overrides the configured base directory.
pub const BASE_PATH_ENV: &str = "TRIES_PATH";

/// Version-control executable used for clones.
pub const GIT_PROGRAM: &str = "git";

/// Hard wall-clock deadline for a clone.
pub const DEFAULT_CLONE_TIMEOUT: Duration = Duration::from_secs(120);

/// Folder name used when nothing usable can be derived from a clone URL.
pub const FALLBACK_REPO_DIR_NAME: &str = "repo";

/// Upper bound for `-2`, `-3`, ... suffixes when a target directory already exists.
pub const DIR_DEDUP_MAX_ATTEMPTS: u32 = 1000;

pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Default base directory offered on first run, relative to the home directory.
pub const DEFAULT_BASE_DIR: &str = "src/tries";
