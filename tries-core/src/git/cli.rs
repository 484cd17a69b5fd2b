use super::{CloneError, provider::GitProvider};
use crate::constants::GIT_PROGRAM;
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Clones by running the `git` executable found on `PATH`.
pub struct CliGitProvider {
    program: PathBuf,
}

impl Default for CliGitProvider {
    fn default() -> Self {
        Self::with_program(GIT_PROGRAM)
    }
}

impl CliGitProvider {
    /// Use a different executable in place of `git`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

fn remove_partial(target: &Path) {
    match fs::remove_dir_all(target) {
        Ok(()) => log::info!("Removed partial clone at {}", target.display()),
        Err(e) => log::warn!("Failed to remove partial clone at {}: {e}", target.display()),
    }
}

enum Outcome {
    Succeeded,
    Failed(String),
    TimedOut,
}

/// Block until `child` exits or `deadline` passes, whichever comes first.
/// On the deadline the child is killed and reaped before returning.
fn wait_until(child: &mut Child, deadline: Instant) -> Outcome {
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => return Outcome::Succeeded,
            Ok(Some(status)) => return Outcome::Failed(format!("git exited with {status}")),
            Ok(None) => {}
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Outcome::Failed(format!("failed to wait for git: {e}"));
            }
        }

        let now = Instant::now();
        if now >= deadline {
            if let Err(e) = child.kill() {
                log::warn!("Failed to kill clone process {}: {e}", child.id());
            }
            let _ = child.wait();
            return Outcome::TimedOut;
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

impl GitProvider for CliGitProvider {
    fn shallow_clone(
        &self,
        url: &str,
        target: &Path,
        timeout: Duration,
    ) -> Result<(), CloneError> {
        let program = which::which(&self.program)
            .map_err(|_| CloneError::ToolMissing(self.program.display().to_string()))?;

        fs::create_dir_all(target).map_err(|source| CloneError::DirectoryCreateFailed {
            path: target.to_path_buf(),
            source,
        })?;

        log::info!("Cloning {url} into {}", target.display());
        let deadline = Instant::now() + timeout;
        let mut child = match Command::new(&program)
            .args(["clone", "--depth", "1", url])
            .arg(target)
            .stdin(Stdio::null())
            .stdout(io::stderr())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                remove_partial(target);
                return Err(CloneError::CloneFailed(format!("failed to start git: {e}")));
            }
        };

        match wait_until(&mut child, deadline) {
            Outcome::Succeeded => {
                log::info!("Cloned {url}");
                Ok(())
            }
            Outcome::Failed(message) => {
                log::warn!("Clone of {url} failed: {message}");
                remove_partial(target);
                Err(CloneError::CloneFailed(message))
            }
            Outcome::TimedOut => {
                log::warn!("Clone of {url} timed out after {}s", timeout.as_secs());
                remove_partial(target);
                Err(CloneError::Timeout(timeout))
            }
        }
    }
}
