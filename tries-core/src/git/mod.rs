pub mod cli;
pub mod mock;
pub mod provider;

pub use cli::CliGitProvider;
pub use provider::GitProvider;

use crate::{naming, repo_url};
use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    #[error("{0} is not installed or not on PATH")]
    ToolMissing(String),
    #[error("failed to create {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("clone timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("clone failed: {0}")]
    CloneFailed(String),
}

/// Where a clone of `canonical_url` made on `date` should go: `{date}-{repo}`
/// under `base`, with `-2`, `-3`, ... appended if that is taken.
pub fn clone_target(base: &Path, canonical_url: &str, date: &str) -> anyhow::Result<PathBuf> {
    let name = format!("{date}-{}", repo_url::derive_folder_name(canonical_url));
    naming::unique_dir(base, &name)
}

/// Resolve a repository reference given outside the picker to its canonical
/// URL and a free target directory.
pub fn plan_clone(input: &str, base: &Path, date: &str) -> anyhow::Result<(String, PathBuf)> {
    let Some(url) = repo_url::recognize(input) else {
        anyhow::bail!("not a recognised repository URL: {}", input.trim());
    };
    let target = clone_target(base, &url, date)?;
    Ok((url, target))
}
