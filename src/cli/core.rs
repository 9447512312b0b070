//! Shell context, dispatch and error plumbing for the booking CLI.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::booking::{BookingFlow, RawTripInput};
use crate::clock::SystemClock;
use crate::config::ConfigManager;
use crate::errors::BookingError;

use super::commands::{self, Availability};
use super::output;
use super::shell::parse_command_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Fatal shell errors; the process exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Booking(#[from] BookingError),
}

/// Per-command failures, reported and then the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub flow: BookingFlow,
    /// Current trip form contents; kept across submissions like a real form.
    pub form: RawTripInput,
    pub theme: ColorfulTheme,
}

impl ShellContext {
    /// Loads configuration and validates the catalog before the shell starts.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new();
        let config = manager.load()?;
        config.validate()?;
        let catalog = config.catalog()?;
        tracing::info!(
            vehicles = catalog.len(),
            locale = %config.locale,
            currency = %config.currency,
            "booking shell starting"
        );
        let flow = BookingFlow::with_parts(
            catalog,
            Box::new(SystemClock),
            Box::new(config.formatter()),
        );
        Ok(Self::with_flow(mode, flow))
    }

    pub fn with_flow(mode: CliMode, flow: BookingFlow) -> Self {
        Self {
            mode,
            flow,
            form: RawTripInput::new(),
            theme: ColorfulTheme::default(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("carhire [step {}]> ", self.flow.current_step().number())
    }

    /// Runs one input line. Blank lines and `#` comments are skipped.
    pub(crate) fn execute_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        if name.starts_with('#') {
            return Ok(LoopControl::Continue);
        }
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(name, &args)
    }

    /// Looks the command up and runs it when the current step allows it.
    fn dispatch(
        &mut self,
        name: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(command) = commands::find(name) else {
            self.suggest_command(name);
            return Ok(LoopControl::Continue);
        };

        let step = self.flow.current_step();
        if let Availability::Only(required) = command.availability {
            if required != step {
                tracing::debug!(command = command.name, ?step, "command unavailable on step");
                output::warning(format!(
                    "`{}` is only available on step {} (you are on step {}).",
                    command.name,
                    required.number(),
                    step.number()
                ));
                if required < step {
                    output::info("Use `back` to return to it.");
                }
                return Ok(LoopControl::Continue);
            }
        }

        match (command.handler)(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest_match(input, commands::names()) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        match super::io::confirm_action(&self.theme, "Exit booking shell?", true) {
            Ok(answer) => Ok(answer),
            Err(_) => Ok(true),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Io(err) => Err(CliError::Io(err)),
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}

/// Closest candidate within an edit distance of 3.
pub(crate) fn closest_match<'a>(
    input: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    let needle = input.to_ascii_lowercase();
    candidates
        .map(|candidate| (levenshtein(&needle, candidate), candidate))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}
