//! Interactive prompts.

use dialoguer::{theme::ColorfulTheme, Input};
use std::io;

/// Error type for prompting.
#[derive(Debug)]
pub enum PromptError {
    /// IO error during prompting.
    Io(io::Error),
    /// User entered nothing or closed the input.
    Cancelled,
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptError::Io(e) => write!(f, "IO error: {e}"),
            PromptError::Cancelled => write!(f, "input cancelled by user"),
        }
    }
}

impl std::error::Error for PromptError {}

/// The words given on the command line, or a prompted line when there are
/// none. Empty input cancels.
pub fn title_or_prompt(words: &[String], label: &str) -> Result<String, PromptError> {
    let joined = words.join(" ");
    if !joined.trim().is_empty() {
        return Ok(joined.trim().to_string());
    }
    prompt_line(label)
}

/// Prompt for a single line. Empty input cancels.
pub fn prompt_line(label: &str) -> Result<String, PromptError> {
    let theme = ColorfulTheme::default();
    let value = Input::<String>::with_theme(&theme)
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(dialoguer_error_to_prompt_error)?;

    non_empty(value)
}

fn non_empty(value: String) -> Result<String, PromptError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(PromptError::Cancelled)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Convert dialoguer error to our PromptError.
fn dialoguer_error_to_prompt_error(e: dialoguer::Error) -> PromptError {
    match e {
        dialoguer::Error::IO(io_err) => {
            if io_err.kind() == io::ErrorKind::UnexpectedEof {
                PromptError::Cancelled
            } else {
                PromptError::Io(io_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_joined_without_prompting() {
        let words = vec!["Hello".to_string(), "World".to_string()];
        assert_eq!(title_or_prompt(&words, "Title").unwrap(), "Hello World");
    }

    #[test]
    fn blank_input_cancels() {
        assert!(matches!(non_empty("   ".into()), Err(PromptError::Cancelled)));
        assert_eq!(non_empty(" x ".into()).unwrap(), "x");
    }
}
