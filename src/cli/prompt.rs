//! Terminal input behind a small trait so the session can be driven by scripts in tests.

use crate::error::{Result, VaultError};
use dialoguer::{Input, Password};
use std::io;
use zeroize::Zeroizing;

pub trait Prompt {
    /// Read one line of visible input, trimmed.
    fn line(&mut self, prompt: &str) -> Result<String>;

    /// Read a secret without echo.
    fn secret(&mut self, prompt: &str) -> Result<Zeroizing<String>>;

    /// Read a new secret twice and require both entries to match.
    fn new_secret(&mut self, prompt: &str) -> Result<Zeroizing<String>>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn line(&mut self, prompt: &str) -> Result<String> {
        (**self).line(prompt)
    }

    fn secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        (**self).secret(prompt)
    }

    fn new_secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        (**self).new_secret(prompt)
    }
}

/// Interactive prompts on the controlling terminal.
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn line(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(term_error)?;
        Ok(value.trim().to_string())
    }

    fn secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(term_error)
    }

    fn new_secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        Password::new()
            .with_prompt(prompt)
            .with_confirmation("Repeat it", "The two entries do not match")
            .allow_empty_password(false)
            .interact()
            .map(Zeroizing::new)
            .map_err(term_error)
    }
}

/// An interrupted read ends the session like Ctrl-C does.
fn term_error(err: dialoguer::Error) -> VaultError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
            VaultError::Interrupted
        }
        dialoguer::Error::IO(e) => VaultError::Terminal(e),
    }
}

/// Strict yes/no parsing: `y`, `yes`, `+` and `n`, `no`, `-`, case-insensitive.
pub fn parse_choice(token: &str) -> Result<bool> {
    match token.trim().to_lowercase().as_str() {
        "y" | "yes" | "+" => Ok(true),
        "n" | "no" | "-" => Ok(false),
        other => Err(VaultError::InvalidChoice(format!(
            "'{}' (answer y/yes/+ or n/no/-)",
            other
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_tokens() {
        for token in ["y", "YES", "+", " Yes ", "Y"] {
            assert!(parse_choice(token).unwrap(), "{token}");
        }
    }

    #[test]
    fn test_negative_tokens() {
        for token in ["n", "No", "-", " NO "] {
            assert!(!parse_choice(token).unwrap(), "{token}");
        }
    }

    #[test]
    fn test_unrecognized_token_is_invalid_choice() {
        for token in ["maybe", "", "yep", "1"] {
            assert!(matches!(
                parse_choice(token),
                Err(VaultError::InvalidChoice(_))
            ));
        }
    }

    #[test]
    fn test_interrupted_read_maps_to_interrupted() {
        let err = term_error(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::Interrupted,
            "read interrupted",
        )));
        assert!(matches!(err, VaultError::Interrupted));
    }

    #[test]
    fn test_scripted_prompt_runs_dry() {
        let mut prompt = scripted::ScriptedPrompt::new(["one"]);
        assert_eq!(prompt.line("q").unwrap(), "one");
        assert!(matches!(prompt.line("q"), Err(VaultError::Interrupted)));
        assert_eq!(prompt.asked.len(), 2);
    }
}
