//! The commit flow: staged diff → suggestions → selection → commit.
//!
//! Every in-flow failure is reported to the operator through the terminal and
//! returned as a [`FlowOutcome`]; nothing here aborts the process.

use tracing::info;

use crate::commit::{
    CommitExecutor, CommitResult, DEFAULT_MAX_DIFF_CHARS, DiffSource, DiffSourceError,
    FailureClassifier,
};
use crate::git::VersionControl;
use crate::llm::TextGenerator;
use crate::select::{SelectionController, SelectionOutcome, Terminal};
use crate::suggest::{SuggestionDiagnostic, SuggestionGenerator};

/// Settings for one run of the flow, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub max_diff_chars: usize,
    pub classifier: FailureClassifier,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
            classifier: FailureClassifier::default(),
        }
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum FlowOutcome {
    /// The staged diff could not be read.
    DiffUnavailable(DiffSourceError),
    /// Nothing is staged; no generation or commit happened.
    NoStagedChanges,
    /// The operator cancelled; no commit was attempted.
    Cancelled,
    /// A commit was attempted with this result.
    Committed(CommitResult),
}

/// Collaborators for the commit flow, constructed once by the caller.
pub struct CommitFlow<'a, V, G, T>
where
    V: VersionControl,
    G: TextGenerator + ?Sized,
    T: Terminal + ?Sized,
{
    vcs: &'a V,
    llm: &'a G,
    terminal: &'a mut T,
    config: &'a FlowConfig,
}

impl<'a, V, G, T> CommitFlow<'a, V, G, T>
where
    V: VersionControl,
    G: TextGenerator + ?Sized,
    T: Terminal + ?Sized,
{
    pub fn new(vcs: &'a V, llm: &'a G, terminal: &'a mut T, config: &'a FlowConfig) -> Self {
        Self {
            vcs,
            llm,
            terminal,
            config,
        }
    }

    /// Run the flow once.
    pub async fn run(&mut self) -> FlowOutcome {
        // Step 1: Read staged changes
        let diff = match DiffSource::new(self.vcs, self.config.max_diff_chars).fetch() {
            Ok(Some(diff)) => diff,
            Ok(None) => {
                self.terminal
                    .show("No staged changes. Stage files with `git add` first.");
                return FlowOutcome::NoStagedChanges;
            }
            Err(e) => {
                self.terminal.show(&format!("Error: {}", e));
                return FlowOutcome::DiffUnavailable(e);
            }
        };

        // Step 2: Ask for suggestions
        self.terminal.show("Generating commit message suggestions...");
        let suggestions = SuggestionGenerator::new(self.llm).generate(&diff).await;
        if let Some(diagnostic) = &suggestions.diagnostic {
            let line = match diagnostic {
                SuggestionDiagnostic::FormatMismatch => diagnostic.to_string(),
                _ => format!("Error: {}", diagnostic),
            };
            self.terminal.show(&line);
        }

        // Step 3: Let the operator choose
        let outcome =
            SelectionController::new(&mut *self.terminal, &suggestions.candidates).run();
        let request = match outcome {
            SelectionOutcome::Commit(request) => request,
            SelectionOutcome::Cancelled => {
                self.terminal.show("Commit cancelled.");
                return FlowOutcome::Cancelled;
            }
        };

        // Step 4: Commit
        info!("Committing (sign={})", request.sign());
        let result = CommitExecutor::new(self.vcs, &self.config.classifier).execute(&request);
        match &result {
            CommitResult::Success => self.terminal.show(&format!("✓ {}", request.message())),
            other => self.terminal.show(&format!("Error: {}", other)),
        }
        if matches!(result, CommitResult::SigningFailed(_)) {
            self.terminal
                .show("Check your signing setup (gpg.program, user.signingkey) or commit unsigned.");
        }

        FlowOutcome::Committed(result)
    }
}
