use anyhow::Result;
use std::io::{BufRead, Write};
use tries_core::constants::DEFAULT_BASE_DIR;

/// Answers collected by the first-run prompt.
#[derive(Debug, PartialEq, Eq)]
pub struct FirstRun {
    pub path: String,
    pub shell: Option<String>,
}

fn ask(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask where experiments should live and, optionally, which shell to start
/// in them. An empty answer (or end of input) takes the default.
pub fn prompt(input: &mut impl BufRead, output: &mut impl Write) -> Result<FirstRun> {
    let default_path = format!("~/{DEFAULT_BASE_DIR}");
    writeln!(output, "Welcome to tries! No experiment directory is configured yet.")?;

    let answer = ask(
        input,
        output,
        &format!("Where should experiments live? [{default_path}]: "),
    )?;
    let path = if answer.is_empty() { default_path } else { answer };

    let shell = loop {
        let answer = ask(
            input,
            output,
            "Shell to start in selected directories (empty for $SHELL): ",
        )?;
        if answer.is_empty() {
            break None;
        }
        match which::which(&answer) {
            Ok(_) => break Some(answer),
            Err(_) => writeln!(output, "'{answer}' was not found on PATH, try again.")?,
        }
    };

    Ok(FirstRun { path, shell })
}
