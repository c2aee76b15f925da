//! Classification of free-form commit failure text.
//!
//! git has no structured error channel for `git commit`, so failures are
//! sorted by matching phrases against its output. The phrases live in a
//! [`PhraseTable`] that can be replaced from a JSON file.

use std::path::Path;

use regex_lite::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Case-insensitive patterns used to recognize commit failure kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseTable {
    pub nothing_to_commit: Vec<String>,
    pub signing_failed: Vec<String>,
}

impl Default for PhraseTable {
    fn default() -> Self {
        let owned = |phrases: &[&str]| phrases.iter().map(|p| p.to_string()).collect();
        Self {
            nothing_to_commit: owned(&["nothing to commit", "no changes added", "not staged"]),
            signing_failed: owned(&[
                "gpg failed to sign",
                "failed to sign",
                "signing failed",
                "secret key not available",
                "no secret key",
                "cannot run gpg",
                "error: gpg",
                "unusable secret key",
                "ssh-keygen",
            ]),
        }
    }
}

impl PhraseTable {
    /// Load a phrase table from a JSON file.
    ///
    /// Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path).map_err(ClassifierError::ReadFailed)?;
        serde_json::from_str(&content).map_err(ClassifierError::ParseFailed)
    }
}

/// Outcome of matching failure text against the phrase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    NothingToCommit,
    SigningFailed,
    Other,
}

/// Compiled [`PhraseTable`].
#[derive(Debug, Clone)]
pub struct FailureClassifier {
    nothing_to_commit: Vec<Regex>,
    signing_failed: Vec<Regex>,
}

impl FailureClassifier {
    pub fn new(table: &PhraseTable) -> Result<Self, ClassifierError> {
        Ok(Self {
            nothing_to_commit: compile_all(&table.nothing_to_commit)?,
            signing_failed: compile_all(&table.signing_failed)?,
        })
    }

    /// Classify commit failure `detail`.
    ///
    /// Nothing-to-commit phrases win over signing phrases. Signing phrases only
    /// count when signing was requested.
    pub fn classify(&self, detail: &str, sign_requested: bool) -> FailureClass {
        if self.nothing_to_commit.iter().any(|re| re.is_match(detail)) {
            return FailureClass::NothingToCommit;
        }
        if sign_requested && self.signing_failed.iter().any(|re| re.is_match(detail)) {
            return FailureClass::SigningFailed;
        }
        FailureClass::Other
    }
}

impl Default for FailureClassifier {
    fn default() -> Self {
        Self::new(&PhraseTable::default()).expect("default phrase table compiles")
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ClassifierError> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ClassifierError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
        })
        .collect()
}
