use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
    time::{Duration, SystemTime},
};
use tries_core::{
    action::Action,
    catalog,
    git::{self, GitProvider},
    naming, paths,
};

pub type CliResult<T> = Result<T, CliError>;

/// A failure to report on stderr, with the process exit code it maps to.
#[derive(Debug)]
pub struct CliError {
    message: String,
    code: u8,
}

impl CliError {
    /// Something went wrong while doing what was asked.
    pub fn operation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    /// The configuration could not be read or written.
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u8 {
        self.code
    }
}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::operation(format!("{value:#}"))
    }
}

pub fn print_error(error: &CliError) {
    eprintln!("Error: {}", error.message());
}

fn touch(path: &Path) {
    if let Err(e) = catalog::touch(path, SystemTime::now()) {
        log::warn!("Failed to update access time of {}: {e}", path.display());
    }
}

/// Carry out the side effect of a finished picker session. Returns the
/// directory to hand off to, or `None` when the user quit.
pub fn perform(
    action: Action,
    git: &dyn GitProvider,
    clone_timeout: Duration,
) -> CliResult<Option<PathBuf>> {
    match action {
        Action::NoAction => Ok(None),
        Action::EnterDirectory { path } => {
            touch(&path);
            Ok(Some(path))
        }
        Action::CreateDirectory { path } => {
            fs::create_dir_all(&path).map_err(|e| {
                CliError::operation(format!("Failed to create {}: {e}", path.display()))
            })?;
            log::info!("Created {}", path.display());
            touch(&path);
            Ok(Some(path))
        }
        Action::CloneRepository { url, path } => {
            eprintln!("Cloning {url} into {}...", paths::display_path(&path));
            git.shallow_clone(&url, &path, clone_timeout)
                .map_err(|e| CliError::operation(e.to_string()))?;
            Ok(Some(path))
        }
    }
}

/// `tries --clone <url>`: clone straight into the base directory.
pub fn cmd_clone(
    input: &str,
    base: &Path,
    git: &dyn GitProvider,
    clone_timeout: Duration,
) -> CliResult<PathBuf> {
    let (url, path) = git::plan_clone(input, base, &naming::today())?;
    perform(
        Action::CloneRepository { url, path },
        git,
        clone_timeout,
    )?
    .ok_or_else(|| CliError::operation("clone produced no directory"))
}

/// Print `path` for the calling shell, or start `shell` inside it.
pub fn hand_off(path: &Path, select_only: bool, shell: &str) -> CliResult<()> {
    if select_only {
        println!("{}", path.display());
        return Ok(());
    }

    eprintln!(
        "Entering {} (exit the shell to return)",
        paths::display_path(path)
    );
    log::info!("Starting {shell} in {}", path.display());
    let status = Command::new(shell)
        .current_dir(path)
        .status()
        .map_err(|e| CliError::operation(format!("Failed to start shell {shell}: {e}")))?;
    if !status.success() {
        log::debug!("Shell exited with {status}");
    }
    Ok(())
}
