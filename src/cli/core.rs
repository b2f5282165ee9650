//! Core CLI dispatch and error reporting.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    cli::output,
    errors::{AmountError, CliError, StockError},
};

pub use crate::cli::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No document open. Use `doc new` first.")]
    NoDocument,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] StockError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<AmountError> for CommandError {
    fn from(err: AmountError) -> Self {
        CommandError::Core(err.into())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(&err);
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() || tokens[0].starts_with('#') {
            return Ok(LoopControl::Continue);
        }

        let raw = &tokens[0];
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode() == CliMode::Script {
            return Ok(true);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?;
        Ok(confirmed)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                tracing::warn!(command = ?self.last_command, %message, "rejected arguments");
                output::error(&message);
                output::info("Use `help <command>` for usage details.");
            }
            other => {
                tracing::warn!(command = ?self.last_command, error = %other, "command failed");
                output::error(other);
            }
        }
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static RUNS: AtomicUsize = AtomicUsize::new(0);
    let run = RUNS.fetch_add(1, Ordering::SeqCst);
    let home = std::env::temp_dir().join(format!(
        "gestion_stock_cli_{}_{}",
        std::process::id(),
        run
    ));
    let manager = crate::config::ConfigManager::with_base_dir(home)?;
    let mut app = ShellContext::with_config_manager(CliMode::Script, manager)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err),
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_commands_do_not_stop_the_script() {
        let app = process_script(&["spel 12", "spell 12"]).unwrap();
        assert_eq!(app.mode(), CliMode::Script);
        assert!(app.running);
        assert_eq!(app.last_command.as_deref(), Some("spell 12"));
    }

    #[test]
    fn exit_stops_processing() {
        let app = process_script(&["exit", "doc new invoice F-1"]).unwrap();
        assert!(!app.running);
        assert!(app.document.is_none());
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let app = process_script(&["", "   ", "# doc new invoice"]).unwrap();
        assert!(app.document.is_none());
        assert!(app.last_command.is_none());
    }
}
