//! Interactive commit message selection.
//!
//! The flow is an explicit state machine. [`SelectionController::step`]
//! performs at most one operator read and returns the next state, so every
//! retry and terminal edge can be driven on its own.
//!
//! ```text
//! Presenting ──► ChoosingNumber ──► Confirming ──► SigningChoice ──► Done
//!     │               │   ▲              │
//!     │               ▼   │ (invalid)    ▼
//!     └──────────► ManualEntry ──────► Cancelled
//! ```

pub mod terminal;

pub use terminal::{DialoguerTerminal, Terminal, is_yes};

use tracing::{debug, warn};

use crate::commit::CommitRequest;
use crate::error::TerminalError;
use crate::suggest::CommitCandidate;

/// Where manual entry was entered from; decides where a blank line goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualOrigin {
    /// Picked the "write my own" menu option.
    Menu,
    /// No candidates existed and the operator accepted the manual offer.
    NoCandidates,
}

/// Selection states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Presenting,
    ChoosingNumber,
    ManualEntry(ManualOrigin),
    Confirming(String),
    SigningChoice(String),
    Done(CommitRequest),
    Cancelled,
}

impl SelectionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SelectionState::Done(_) | SelectionState::Cancelled)
    }
}

/// Final result of the selection flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Commit(CommitRequest),
    Cancelled,
}

/// Drives the operator through candidate choice, confirmation, and signing.
pub struct SelectionController<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
    candidates: &'a [CommitCandidate],
}

impl<'a, T: Terminal + ?Sized> SelectionController<'a, T> {
    pub fn new(terminal: &'a mut T, candidates: &'a [CommitCandidate]) -> Self {
        Self {
            terminal,
            candidates,
        }
    }

    /// Run from `Presenting` until a terminal state.
    ///
    /// A failed read ends the flow as cancelled; nothing is committed.
    pub fn run(&mut self) -> SelectionOutcome {
        let mut state = SelectionState::Presenting;
        loop {
            state = match self.step(state) {
                Ok(SelectionState::Done(request)) => return SelectionOutcome::Commit(request),
                Ok(SelectionState::Cancelled) => return SelectionOutcome::Cancelled,
                Ok(next) => next,
                Err(e) => {
                    warn!("Selection aborted: {}", e);
                    self.terminal.show(&format!("Input unavailable ({}). Cancelled.", e));
                    return SelectionOutcome::Cancelled;
                }
            };
        }
    }

    /// Advance one transition.
    pub fn step(
        &mut self,
        state: SelectionState,
    ) -> Result<SelectionState, TerminalError> {
        debug!("Selection state: {:?}", state);
        let next = match state {
            SelectionState::Presenting => self.present()?,
            SelectionState::ChoosingNumber => self.choose_number()?,
            SelectionState::ManualEntry(origin) => self.manual_entry(origin)?,
            SelectionState::Confirming(message) => self.confirm(message)?,
            SelectionState::SigningChoice(message) => self.signing_choice(message)?,
            terminal @ (SelectionState::Done(_) | SelectionState::Cancelled) => terminal,
        };
        Ok(next)
    }

    fn present(&mut self) -> Result<SelectionState, TerminalError> {
        if self.candidates.is_empty() {
            let answer = self
                .terminal
                .prompt("No suggestions available. Write a commit message manually? (y/n)")?;
            return Ok(if is_yes(&answer) {
                SelectionState::ManualEntry(ManualOrigin::NoCandidates)
            } else {
                SelectionState::Cancelled
            });
        }

        self.terminal.show("Suggested commit messages:");
        for (idx, candidate) in self.candidates.iter().enumerate() {
            self.terminal.show(&format!("  {}. {}", idx + 1, candidate));
        }
        let n = self.candidates.len();
        self.terminal.show(&format!("  {}. Write my own message", n + 1));
        self.terminal.show(&format!("  {}. Cancel", n + 2));
        Ok(SelectionState::ChoosingNumber)
    }

    fn choose_number(&mut self) -> Result<SelectionState, TerminalError> {
        let n = self.candidates.len();
        let answer = self.terminal.prompt(&format!("Choose an option (1-{})", n + 2))?;

        match answer.trim().parse::<usize>() {
            Ok(choice) if (1..=n).contains(&choice) => Ok(SelectionState::Confirming(
                self.candidates[choice - 1].as_str().to_string(),
            )),
            Ok(choice) if choice == n + 1 => Ok(SelectionState::ManualEntry(ManualOrigin::Menu)),
            Ok(choice) if choice == n + 2 => Ok(SelectionState::Cancelled),
            _ => {
                self.terminal.show(&format!(
                    "Invalid choice '{}'. Enter a number from 1 to {}.",
                    answer.trim(),
                    n + 2
                ));
                Ok(SelectionState::ChoosingNumber)
            }
        }
    }

    fn manual_entry(
        &mut self,
        origin: ManualOrigin,
    ) -> Result<SelectionState, TerminalError> {
        let answer = self.terminal.prompt("Commit message")?;
        let message = answer.trim();
        if !message.is_empty() {
            return Ok(SelectionState::Confirming(message.to_string()));
        }

        self.terminal.show("The commit message cannot be empty.");
        Ok(match origin {
            ManualOrigin::Menu => SelectionState::ManualEntry(ManualOrigin::Menu),
            ManualOrigin::NoCandidates => SelectionState::Presenting,
        })
    }

    fn confirm(&mut self, message: String) -> Result<SelectionState, TerminalError> {
        self.terminal.show(&format!("Commit message:\n  {}", message));
        let answer = self.terminal.prompt("Commit with this message? (y/n)")?;
        Ok(if is_yes(&answer) {
            SelectionState::SigningChoice(message)
        } else {
            SelectionState::Cancelled
        })
    }

    fn signing_choice(
        &mut self,
        message: String,
    ) -> Result<SelectionState, TerminalError> {
        let answer = self.terminal.prompt("Sign the commit? (y/N)")?;
        let sign = is_yes(&answer);
        Ok(match CommitRequest::new(message, sign) {
            Some(request) => SelectionState::Done(request),
            None => SelectionState::Cancelled,
        })
    }
}
