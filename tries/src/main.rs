mod cli;
mod logging;
mod setup;

use clap::Parser;
use cli::{CliError, CliResult};
use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env, fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tries_core::{
    action::Action,
    config::{self, LoadedConfig},
    constants::BASE_PATH_ENV,
    git::CliGitProvider,
    paths,
    state::{Clock, Picker},
};
use tries_tui::{StderrTerminal, Theme};

#[derive(Parser)]
#[command(
    version,
    about = "Fuzzy picker for short-lived experiment directories",
    after_help = "Use `cd \"$(tries -s)\"` to change directory in the calling shell."
)]
struct Cli {
    /// Initial search; words are joined with '-'
    query: Vec<String>,

    /// Print the selected directory instead of starting a shell in it
    #[arg(short, long)]
    select_only: bool,

    /// Clone a repository into a new dated directory, bypassing the picker
    #[arg(short, long, value_name = "URL")]
    clone: Option<String>,

    /// Override path to config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = logging::level_from(env::var(logging::LOG_LEVEL_ENV).ok().as_deref());
    if let Err(e) = logging::setup_logging(level) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let loaded = match config::load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            cli::print_error(&CliError::config(format!("{e:#}")));
            return ExitCode::from(2);
        }
    };

    match run(&cli, loaded) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error.message());
            cli::print_error(&error);
            ExitCode::from(error.code())
        }
    }
}

fn run(cli: &Cli, loaded: LoadedConfig) -> CliResult<()> {
    let LoadedConfig {
        mut config,
        file,
        legacy,
    } = loaded;

    if legacy && let Some(path) = config.path.as_deref() {
        eprintln!(
            "Note: converting {} from the old plain-text format to TOML",
            file.display()
        );
        config::save_settings(&file, path, config.shell.as_deref())
            .map_err(|e| CliError::config(format!("{e:#}")))?;
    }

    let env_path = env::var(BASE_PATH_ENV).ok();
    let base = match config.resolved_base_path(env_path.as_deref()) {
        Some(base) => base,
        None => {
            let answers = first_run(&file)?;
            let base = paths::expand_tilde(&answers.path).ok_or_else(|| {
                CliError::config("Unable to determine the home directory".to_string())
            })?;
            config.path = Some(answers.path);
            config.shell = answers.shell;
            base
        }
    };
    fs::create_dir_all(&base).map_err(|e| {
        CliError::operation(format!("Failed to create {}: {e}", base.display()))
    })?;

    let git = CliGitProvider::default();
    let shell = config.resolved_shell(env::var("SHELL").ok().as_deref());

    if let Some(url) = &cli.clone {
        let path = cli::cmd_clone(url, &base, &git, config.clone.timeout())?;
        return cli::hand_off(&path, cli.select_only, &shell);
    }

    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return Err(CliError::operation("tries requires an interactive terminal"));
    }

    let picker = Picker::load(&base, &cli.query.join("-"), &Clock::system());
    let theme = Theme::from_config(&config.theme);
    let action = run_tui(picker, &theme, &config)?;

    match cli::perform(action, &git, config.clone.timeout())? {
        Some(path) => cli::hand_off(&path, cli.select_only, &shell),
        None => Ok(()),
    }
}

/// Prompt for the base directory on first use and save the answers.
fn first_run(file: &Path) -> CliResult<setup::FirstRun> {
    if !io::stdin().is_terminal() {
        return Err(CliError::config(format!(
            "No experiment directory configured. Set {BASE_PATH_ENV} or `path` in {}",
            file.display()
        )));
    }

    let answers = setup::prompt(&mut io::stdin().lock(), &mut io::stderr())?;
    config::save_settings(file, &answers.path, answers.shell.as_deref())
        .map_err(|e| CliError::config(format!("{e:#}")))?;
    eprintln!("Saved settings to {}", file.display());
    Ok(answers)
}

/// Restores the terminal when the picker exits, including by panic.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stderr(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            Show
        );
    }
}

fn setup_terminal() -> anyhow::Result<(StderrTerminal, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard;
    execute!(io::stderr(), EnterAlternateScreen, EnableBracketedPaste)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    Ok((terminal, guard))
}

fn run_tui(picker: Picker, theme: &Theme, config: &config::Config) -> CliResult<Action> {
    let (mut terminal, guard) = setup_terminal()?;
    let result = tries_tui::run(&mut terminal, picker, theme, &config.keys);
    drop(guard);
    Ok(result?)
}
