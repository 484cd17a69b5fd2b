use super::{CloneError, provider::GitProvider};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

/// Records clone requests instead of running git. Succeeds by creating the
/// target directory unless `clone_result` holds a canned result.
#[derive(Default)]
pub struct MockGitProvider {
    pub clone_result: Mutex<Option<Result<(), CloneError>>>,
    pub clone_calls: Mutex<Vec<(String, PathBuf)>>,
}

impl GitProvider for MockGitProvider {
    fn shallow_clone(
        &self,
        url: &str,
        target: &Path,
        _timeout: Duration,
    ) -> Result<(), CloneError> {
        self.clone_calls
            .lock()
            .unwrap()
            .push((url.to_string(), target.to_path_buf()));

        if let Some(result) = self.clone_result.lock().unwrap().take() {
            return result;
        }
        fs::create_dir_all(target).map_err(|source| CloneError::DirectoryCreateFailed {
            path: target.to_path_buf(),
            source,
        })
    }
}
