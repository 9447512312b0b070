use std::fmt;
use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};

use crate::booking::{Step, TripField};
use crate::cli::commands;
use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output;

pub const SCRIPT_ENV: &str = "CARHIRE_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "shell mode selected");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<BookingHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(BookingHelper {
        source: CompletionSource::from_context(context),
    }));

    output::info("Welcome! Type `trip` to start a booking or `help` for commands.");

    loop {
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        editor.add_history_entry(line.trim()).ok();

        let control = match context.execute_line(&line) {
            Ok(control) => control,
            Err(err) => {
                context.report_error(err)?;
                LoopControl::Continue
            }
        };
        if control == LoopControl::Exit {
            break;
        }

        // Step changes alter which commands complete.
        if let Some(helper) = editor.helper_mut() {
            helper.source = CompletionSource::from_context(context);
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        match context.execute_line(&line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

/// Completion candidates captured from the shell after each command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompletionSource {
    step_commands: Vec<&'static str>,
    vehicle_ids: Vec<String>,
}

impl CompletionSource {
    pub(crate) fn new(step: Step, vehicle_ids: Vec<String>) -> Self {
        Self {
            step_commands: commands::offered_on(step).map(|command| command.name).collect(),
            vehicle_ids,
        }
    }

    pub(crate) fn from_context(context: &ShellContext) -> Self {
        Self::new(
            context.flow.current_step(),
            context.flow.catalog().ids().map(str::to_string).collect(),
        )
    }

    /// Start offset of the word under the cursor and its candidates.
    ///
    /// The first word completes to commands offered on the current step,
    /// `select` to vehicle ids, `trip` to `field=` keys not yet assigned on
    /// the line, and `help` to any command.
    pub(crate) fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        let word = &prefix[start..];
        let mut earlier = prefix[..start].split_whitespace();

        let Some(command) = earlier.next() else {
            return (start, matching(self.step_commands.iter().copied(), word));
        };
        let earlier: Vec<&str> = earlier.collect();

        let candidates = match command.to_ascii_lowercase().as_str() {
            "select" if earlier.is_empty() => {
                matching(self.vehicle_ids.iter().map(String::as_str), word)
            }
            "help" if earlier.is_empty() => matching(commands::names(), word),
            "trip" if !word.contains('=') => {
                let keys: Vec<String> = TripField::ALL
                    .iter()
                    .filter(|field| !earlier.iter().any(|arg| assigns(arg, **field)))
                    .map(|field| format!("{}=", field.key()))
                    .collect();
                matching(keys.iter().map(String::as_str), word)
            }
            _ => Vec::new(),
        };
        (start, candidates)
    }
}

fn assigns(arg: &str, field: TripField) -> bool {
    arg.split_once('=')
        .is_some_and(|(name, _)| name.eq_ignore_ascii_case(field.key()))
}

fn matching<'a>(candidates: impl Iterator<Item = &'a str>, word: &str) -> Vec<String> {
    let needle = word.to_ascii_lowercase();
    candidates
        .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
        .map(str::to_string)
        .collect()
}

struct BookingHelper {
    source: CompletionSource,
}

impl Helper for BookingHelper {}

impl Completer for BookingHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.source.candidates(line, pos);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for BookingHelper {
    type Hint = String;
}

impl Highlighter for BookingHelper {}

impl Validator for BookingHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    shell_words::split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn source(step: Step) -> CompletionSource {
        CompletionSource::new(
            step,
            Catalog::builtin().ids().map(str::to_string).collect(),
        )
    }

    fn complete(source: &CompletionSource, line: &str) -> (usize, Vec<String>) {
        source.candidates(line, line.len())
    }

    #[test]
    fn quoted_values_stay_together() {
        let tokens = parse_command_line("trip startLocation='Gateway of India' hours=3").unwrap();
        assert_eq!(
            tokens,
            vec!["trip", "startLocation=Gateway of India", "hours=3"]
        );
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        assert!(parse_command_line("trip fullName='Asha").is_err());
    }

    #[test]
    fn first_word_offers_commands_for_the_step() {
        assert_eq!(complete(&source(Step::TripEntry), "s"), (0, vec!["status".to_string()]));
        assert_eq!(
            complete(&source(Step::VehicleSelection), "s"),
            (0, vec!["select".to_string(), "status".to_string()])
        );
        assert!(complete(&source(Step::Confirmation), "c").1.contains(&"catalog".to_string()));
        assert!(!complete(&source(Step::Confirmation), "c").1.contains(&"continue".to_string()));
    }

    #[test]
    fn select_completes_vehicle_ids() {
        let source = source(Step::VehicleSelection);
        assert_eq!(
            complete(&source, "select a"),
            (7, vec!["a6".to_string(), "a8".to_string()])
        );
        assert_eq!(complete(&source, "select a8 "), (10, Vec::new()));
    }

    #[test]
    fn trip_completes_unassigned_field_keys() {
        let source = source(Step::TripEntry);
        assert_eq!(
            complete(&source, "trip e"),
            (
                5,
                vec![
                    "email=".to_string(),
                    "endLocation=".to_string(),
                    "eventDate=".to_string(),
                ]
            )
        );
        assert_eq!(
            complete(&source, "trip email=a@b.co e"),
            (18, vec!["endLocation=".to_string(), "eventDate=".to_string()])
        );
        assert_eq!(complete(&source, "trip hours=").1, Vec::<String>::new());
    }

    #[test]
    fn help_completes_any_command() {
        let (_, candidates) = complete(&source(Step::TripEntry), "help con");
        assert_eq!(candidates, vec!["continue".to_string()]);
    }
}
