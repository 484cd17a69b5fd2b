use super::CloneError;
use std::{path::Path, time::Duration};

pub trait GitProvider: Send + Sync {
    /// Shallow-clone `url` into `target`, giving up after `timeout`.
    ///
    /// `target` is created first and removed again on any failure after that.
    fn shallow_clone(&self, url: &str, target: &Path, timeout: Duration)
    -> Result<(), CloneError>;
}
