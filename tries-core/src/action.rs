use std::path::PathBuf;

/// Outcome of feeding one event to the picker.
///
/// Anything other than `NoAction` ends the session: the caller performs the
/// side effect and the picker ignores further input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Keep going (or, after a quit, leave without side effects).
    NoAction,
    EnterDirectory { path: PathBuf },
    CreateDirectory { path: PathBuf },
    CloneRepository { url: String, path: PathBuf },
}
