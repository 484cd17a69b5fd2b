pub mod app;
pub mod components;
pub mod keymap;
pub mod theme;

pub use app::{StderrTerminal, run};
pub use theme::Theme;
