use crate::{
    action::Action,
    catalog::{self, CatalogEntry},
    config::keys::Command,
    event::{Event, is_valid_input, is_valid_input_char},
    git, naming, repo_url, score,
};
use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// The instant a transition happens, passed in so transitions are deterministic.
#[derive(Debug, Clone)]
pub struct Clock {
    pub now: SystemTime,
    /// `YYYY-MM-DD`, used as the prefix of new directory names.
    pub today: String,
}

impl Clock {
    pub fn system() -> Self {
        Self {
            now: SystemTime::now(),
            today: naming::today(),
        }
    }
}

/// What mode the picker is in
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browsing,
    /// Typing a name for a new directory
    NamingNew { buffer: String },
    /// Waiting for `y` before removing `target`
    ConfirmingDelete { target: CatalogEntry },
}

impl Mode {
    /// Commands to show in the footer bar, in display order.
    pub fn footer_commands(&self) -> &'static [Command] {
        match self {
            Mode::Browsing => &[
                Command::MoveDown,
                Command::Confirm,
                Command::QuickNew,
                Command::DeleteEntry,
                Command::Quit,
            ],
            Mode::NamingNew { .. } => &[Command::Confirm, Command::Cancel],
            Mode::ConfirmingDelete { .. } => &[Command::Confirm],
        }
    }
}

/// What the synthetic last row would do if chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRow {
    /// Empty query: ask for a name
    Prompt,
    /// Create a directory with this name
    Create(String),
    /// Clone `url` into a directory named after `repo`
    Clone { url: String, repo: String },
}

#[derive(Debug, Clone)]
pub struct Picker {
    pub base_path: PathBuf,
    /// Every entry of the last scan, in scan order
    pub entries: Vec<CatalogEntry>,
    /// Entries matching `query`, best first
    pub ranked: Vec<CatalogEntry>,
    pub query: String,
    /// Index into `ranked`; `ranked.len()` is the create row
    pub cursor: usize,
    pub mode: Mode,
    /// Transient status message, cleared by the next event
    pub error: Option<String>,
    finished: bool,
}

impl Picker {
    pub fn new(
        base_path: PathBuf,
        entries: Vec<CatalogEntry>,
        initial_query: &str,
        clock: &Clock,
    ) -> Self {
        let query: String = initial_query
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .filter(|&c| is_valid_input_char(c))
            .collect();
        let ranked = score::rank(&entries, &query, clock.now);
        Self {
            base_path,
            entries,
            ranked,
            query,
            cursor: 0,
            mode: Mode::Browsing,
            error: None,
            finished: false,
        }
    }

    /// Scan `base_path` and start browsing.
    pub fn load(base_path: &Path, initial_query: &str, clock: &Clock) -> Self {
        let entries = catalog::scan(base_path);
        Self::new(base_path.to_path_buf(), entries, initial_query, clock)
    }

    /// True once a terminal action was produced or the user quit.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn create_row_index(&self) -> usize {
        self.ranked.len()
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.ranked.get(self.cursor)
    }

    pub fn create_row(&self) -> CreateRow {
        if self.query.is_empty() {
            CreateRow::Prompt
        } else if let Some(url) = repo_url::recognize(&self.query) {
            let repo = repo_url::derive_folder_name(&url);
            CreateRow::Clone { url, repo }
        } else {
            CreateRow::Create(naming::slugify(&self.query))
        }
    }

    fn rerank(&mut self, clock: &Clock) {
        self.ranked = score::rank(&self.entries, &self.query, clock.now);
        self.cursor = 0;
    }

    fn finish(mut self, action: Action) -> (Self, Action) {
        self.finished = true;
        (self, action)
    }

    /// The create row was chosen, or quick-new was pressed.
    fn create_or_clone(mut self, clock: &Clock) -> (Self, Action) {
        if self.query.is_empty() {
            self.mode = Mode::NamingNew {
                buffer: String::new(),
            };
            return (self, Action::NoAction);
        }

        if let Some(url) = repo_url::recognize(&self.query) {
            return match git::clone_target(&self.base_path, &url, &clock.today) {
                Ok(path) => self.finish(Action::CloneRepository { url, path }),
                Err(e) => {
                    self.error = Some(e.to_string());
                    (self, Action::NoAction)
                }
            };
        }

        match naming::dated_name(&clock.today, &self.query) {
            Some(name) => {
                let path = self.base_path.join(name);
                self.finish(Action::CreateDirectory { path })
            }
            None => (self, Action::NoAction),
        }
    }

    fn browse(mut self, event: Event, clock: &Clock) -> (Self, Action) {
        match event {
            Event::Input(text) => {
                if is_valid_input(&text) {
                    self.query.push_str(&text);
                    self.rerank(clock);
                }
            }
            Event::Command(command) => match command {
                Command::MoveUp => self.cursor = self.cursor.saturating_sub(1),
                Command::MoveDown => {
                    self.cursor = (self.cursor + 1).min(self.create_row_index());
                }
                Command::DeleteBackwardChar => {
                    if self.query.pop().is_some() {
                        self.rerank(clock);
                    }
                }
                Command::ClearInput => {
                    self.query.clear();
                    self.rerank(clock);
                }
                Command::Confirm => {
                    if let Some(entry) = self.selected_entry() {
                        let path = entry.path.clone();
                        return self.finish(Action::EnterDirectory { path });
                    }
                    return self.create_or_clone(clock);
                }
                Command::QuickNew => return self.create_or_clone(clock),
                Command::DeleteEntry => {
                    if let Some(target) = self.selected_entry().cloned() {
                        self.mode = Mode::ConfirmingDelete { target };
                    }
                }
                Command::Quit => return self.finish(Action::NoAction),
                Command::Cancel | Command::Noop => {}
            },
        }
        (self, Action::NoAction)
    }

    fn name_new(mut self, mut buffer: String, event: Event, clock: &Clock) -> (Self, Action) {
        match event {
            Event::Input(text) => {
                if is_valid_input(&text) {
                    buffer.push_str(&text);
                }
            }
            Event::Command(command) => match command {
                Command::DeleteBackwardChar => {
                    buffer.pop();
                }
                Command::ClearInput => buffer.clear(),
                Command::Confirm => {
                    if let Some(name) = naming::dated_name(&clock.today, &buffer) {
                        let path = self.base_path.join(name);
                        return self.finish(Action::CreateDirectory { path });
                    }
                }
                Command::Cancel => return (self, Action::NoAction),
                Command::Quit => return self.finish(Action::NoAction),
                Command::MoveUp
                | Command::MoveDown
                | Command::QuickNew
                | Command::DeleteEntry
                | Command::Noop => {}
            },
        }
        self.mode = Mode::NamingNew { buffer };
        (self, Action::NoAction)
    }

    fn confirm_delete(mut self, target: &CatalogEntry, event: &Event, clock: &Clock) -> Self {
        if *event != Event::Command(Command::Confirm) {
            return self;
        }

        if let Err(e) = fs::remove_dir_all(&target.path) {
            log::warn!("Failed to delete {}: {e}", target.path.display());
            self.error = Some(format!("Failed to delete {}: {e}", target.name));
            return self;
        }
        log::info!("Deleted {}", target.path.display());

        self.entries = catalog::scan(&self.base_path);
        self.ranked = score::rank(&self.entries, &self.query, clock.now);
        self.cursor = self.cursor.min(self.create_row_index());
        self
    }
}

/// Feed one event to the picker.
///
/// Returns the next picker state and the action it produced. Once an action
/// other than `NoAction` has been produced, or the user quit, further events
/// are ignored.
pub fn transition(mut picker: Picker, event: Event, clock: &Clock) -> (Picker, Action) {
    if picker.finished {
        return (picker, Action::NoAction);
    }
    picker.error = None;

    match std::mem::replace(&mut picker.mode, Mode::Browsing) {
        Mode::Browsing => picker.browse(event, clock),
        Mode::NamingNew { buffer } => picker.name_new(buffer, event, clock),
        Mode::ConfirmingDelete { target } => {
            (picker.confirm_delete(&target, &event, clock), Action::NoAction)
        }
    }
}
