//! Commit message suggestions from the text generator.

pub mod parse;
pub mod prompt;

pub use parse::{CommitCandidate, SuggestionDiagnostic, Suggestions, parse_suggestions};
pub use prompt::{SUGGESTION_COUNT, build_suggestion_prompt};

use tracing::{debug, warn};

use crate::commit::DiffText;
use crate::llm::TextGenerator;

/// Turns a staged diff into commit candidates with one generator call.
pub struct SuggestionGenerator<'a, G: TextGenerator + ?Sized> {
    llm: &'a G,
}

impl<'a, G: TextGenerator + ?Sized> SuggestionGenerator<'a, G> {
    pub fn new(llm: &'a G) -> Self {
        Self { llm }
    }

    /// Generate suggestions for `diff`.
    ///
    /// Never fails: a generator error becomes an empty list with a
    /// [`SuggestionDiagnostic::GenerationFailed`] diagnostic.
    pub async fn generate(&self, diff: &DiffText) -> Suggestions {
        let prompt = build_suggestion_prompt(diff);
        debug!("Suggestion prompt length: {} chars", prompt.len());

        let response = match self.llm.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Generation failed: {}", e.detail());
                return Suggestions::failed(e.summary());
            }
        };

        debug!("Raw generator response: {}", response);
        let suggestions = parse_suggestions(&response);
        if let Some(diagnostic) = &suggestions.diagnostic {
            warn!("{}", diagnostic);
        }
        suggestions
    }
}
