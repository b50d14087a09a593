//! Interactive confirmation gate for risky field mutations.
//!
//! The gate is the pipeline's only suspension point: it blocks on a line of
//! input until the answer is a clear yes or no. The prompt is an injected
//! port so pipeline logic stays testable without a terminal.

use crate::error::{LightboxError, Result};
use crate::nouns::Field;
use std::io::{BufRead, Write};

/// Line-based prompt port.
pub trait LinePrompt {
    /// Show a message without a trailing newline (the caret prompt style).
    fn show(&mut self, message: &str);
    /// Read one line of input.
    fn read_line(&mut self) -> std::io::Result<String>;
}

/// Production prompt bound to stdout/stdin.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl LinePrompt for ConsolePrompt {
    fn show(&mut self, message: &str) {
        let mut out = std::io::stdout();
        let _ = out.write_all(message.as_bytes());
        let _ = out.flush();
    }

    fn read_line(&mut self) -> std::io::Result<String> {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Gate states: the machine stays in `Prompting` until the input is decisive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Prompting,
    Confirmed,
    Aborted { input: String },
}

/// Advance the gate on one line of input. Case is normalized; surrounding
/// whitespace is ignored.
pub fn advance(input: &str) -> GateState {
    let answer = input.trim().to_lowercase();
    match answer.as_str() {
        "yes" | "y" => GateState::Confirmed,
        "no" | "n" => GateState::Aborted { input: answer },
        _ => GateState::Prompting,
    }
}

/// Warn about the restricted field and block until the user decides.
///
/// `"yes"`/`"y"` proceeds; `"no"`/`"n"` aborts the run with a message echoing
/// exactly what was typed; anything else re-prompts.
pub fn confirm_restricted_field(prompt: &mut dyn LinePrompt, field: &Field) -> Result<()> {
    let message = format!(
        "Warning: You are inserting keywords into a restricted field type ({}).\n\
         \x20    Keywords are sorted in alphabetical order.\n\
         \x20    All file keywords will be created as options but only the first one \
         will be displayed in the field.\n\
         Continue? (Yes/no)\n> ",
        field.field_display_type
    );
    let retry = "\nInvalid input. Please enter \"yes\" or \"no\".\n> ";

    prompt.show(&message);
    loop {
        let line = prompt.read_line().map_err(|e| LightboxError::Prompt {
            message: e.to_string(),
        })?;
        match advance(&line) {
            GateState::Confirmed => return Ok(()),
            GateState::Aborted { input } => return Err(LightboxError::UserAbort { input }),
            GateState::Prompting => prompt.show(retry),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::LinePrompt;

    /// Prompt fed from a fixed script of answers.
    pub struct ScriptedPrompt {
        pub answers: Vec<String>,
        pub shown: Vec<String>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().rev().map(|s| s.to_string()).collect(),
                shown: Vec::new(),
            }
        }
    }

    impl LinePrompt for ScriptedPrompt {
        fn show(&mut self, message: &str) {
            self.shown.push(message.to_string());
        }

        fn read_line(&mut self) -> std::io::Result<String> {
            self.answers.pop().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "script exhausted")
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::ScriptedPrompt;
    use super::*;
    use crate::error::LightboxError;

    fn restricted_field() -> Field {
        Field {
            id: 3,
            name: "Project Type".into(),
            field_display_type: "suggestion".into(),
            alive: None,
            protected: None,
        }
    }

    #[test]
    fn test_advance_normalizes_case_and_whitespace() {
        assert_eq!(advance("  YES \n"), GateState::Confirmed);
        assert_eq!(advance("Y"), GateState::Confirmed);
        assert_eq!(advance("No"), GateState::Aborted { input: "no".into() });
        assert_eq!(advance("maybe"), GateState::Prompting);
        assert_eq!(advance(""), GateState::Prompting);
    }

    #[test]
    fn test_yes_confirms() {
        let mut prompt = ScriptedPrompt::new(&["yes"]);
        assert!(confirm_restricted_field(&mut prompt, &restricted_field()).is_ok());
        assert_eq!(prompt.shown.len(), 1);
    }

    #[test]
    fn test_no_aborts_with_echo() {
        let mut prompt = ScriptedPrompt::new(&["n"]);
        let err = confirm_restricted_field(&mut prompt, &restricted_field()).unwrap_err();
        match err {
            LightboxError::UserAbort { input } => assert_eq!(input, "n"),
            other => panic!("expected UserAbort, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let mut prompt = ScriptedPrompt::new(&["sure", "whatever", "yes"]);
        assert!(confirm_restricted_field(&mut prompt, &restricted_field()).is_ok());
        // Initial warning plus two retry messages.
        assert_eq!(prompt.shown.len(), 3);
        assert!(prompt.shown[1].contains("Invalid input"));
    }
}
