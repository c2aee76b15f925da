//! Operator input and output.

use dialoguer::Input;

use crate::error::TerminalError;

/// Line-oriented terminal used by the selection flow.
pub trait Terminal {
    /// Show `text` and block until the operator enters one line.
    fn prompt(&mut self, text: &str) -> Result<String, TerminalError>;

    /// Print a line for the operator.
    fn show(&mut self, text: &str);
}

/// Terminal on the process's stderr/stdin via dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerTerminal;

impl DialoguerTerminal {
    pub fn new() -> Self {
        Self
    }
}

impl Terminal for DialoguerTerminal {
    fn prompt(&mut self, text: &str) -> Result<String, TerminalError> {
        Input::<String>::new()
            .with_prompt(text)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| match e {
                dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                    TerminalError::Closed
                }
                dialoguer::Error::IO(io) => TerminalError::Io(io.to_string()),
            })
    }

    fn show(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Whether an answer to a yes/no question means yes.
///
/// Only `y` and `yes` (any case, surrounding whitespace ignored) count.
pub fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
