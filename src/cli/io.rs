use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CommandError;

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt for a text value, pre-filled with what the form last held. Blank
/// answers are allowed so validation can report them.
pub fn prompt_field(
    theme: &ColorfulTheme,
    prompt: &str,
    current: &str,
) -> Result<String, CommandError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if !current.is_empty() {
        input = input.with_initial_text(current);
    }
    input.interact_text().map_err(CommandError::from)
}
