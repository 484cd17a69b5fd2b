pub mod action;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod event;
pub mod git;
pub mod keyboard;
pub mod naming;
pub mod paths;
pub mod repo_url;
pub mod score;
pub mod state;

// Re-export commonly used types at crate root
pub use action::Action;
pub use catalog::CatalogEntry;
pub use config::Config;
pub use event::Event;
pub use git::{CloneError, GitProvider};
pub use keyboard::KeyEvent;
pub use state::{Clock, Mode, Picker, transition};
