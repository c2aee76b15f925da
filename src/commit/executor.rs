//! Final commit step: re-check the index, commit, classify the result.

use std::fmt;

use tracing::{debug, info};

use crate::commit::classify::{FailureClass, FailureClassifier};
use crate::git::{CommitFailure, CommitFailureKind, CommitOptions, VersionControl};

/// A confirmed commit: non-empty message plus signing choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    message: String,
    sign: bool,
}

impl CommitRequest {
    /// Build a request, returning `None` for a blank message.
    pub fn new(message: impl Into<String>, sign: bool) -> Option<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return None;
        }
        Some(Self { message, sign })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sign(&self) -> bool {
        self.sign
    }
}

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitResult {
    Success,
    NothingToCommit,
    SigningFailed(String),
    OtherFailure(String),
}

impl CommitResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CommitResult::Success)
    }
}

impl fmt::Display for CommitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitResult::Success => write!(f, "Committed"),
            CommitResult::NothingToCommit => write!(f, "Nothing to commit: no staged changes"),
            CommitResult::SigningFailed(detail) => write!(f, "Commit signing failed: {}", detail),
            CommitResult::OtherFailure(detail) => write!(f, "Commit failed: {}", detail),
        }
    }
}

/// Runs the commit operation for a confirmed [`CommitRequest`].
pub struct CommitExecutor<'a, V: VersionControl> {
    vcs: &'a V,
    classifier: &'a FailureClassifier,
}

impl<'a, V: VersionControl> CommitExecutor<'a, V> {
    pub fn new(vcs: &'a V, classifier: &'a FailureClassifier) -> Self {
        Self { vcs, classifier }
    }

    /// Commit `request`, re-checking the index first.
    ///
    /// When nothing is staged the commit operation is not invoked at all.
    pub fn execute(&self, request: &CommitRequest) -> CommitResult {
        match self.vcs.staged_status() {
            Ok(status) if status.staged_file_count == 0 => {
                info!("Index became empty before commit");
                return CommitResult::NothingToCommit;
            }
            Ok(status) => debug!("{} staged files before commit", status.staged_file_count),
            Err(e) => return CommitResult::OtherFailure(e.to_string()),
        }

        let options = CommitOptions {
            sign: request.sign(),
        };
        match self.vcs.commit(request.message(), options) {
            Ok(()) => CommitResult::Success,
            Err(failure) => self.classify(failure, request.sign()),
        }
    }

    fn classify(&self, failure: CommitFailure, sign_requested: bool) -> CommitResult {
        let class = match failure.kind {
            Some(CommitFailureKind::NothingToCommit) => FailureClass::NothingToCommit,
            Some(CommitFailureKind::Signing) => FailureClass::SigningFailed,
            Some(CommitFailureKind::Other) => FailureClass::Other,
            None => self.classifier.classify(&failure.detail, sign_requested),
        };
        debug!("Commit failure classified as {:?}: {}", class, failure.detail);

        match class {
            FailureClass::NothingToCommit => CommitResult::NothingToCommit,
            FailureClass::SigningFailed => CommitResult::SigningFailed(failure.detail),
            FailureClass::Other => CommitResult::OtherFailure(failure.detail),
        }
    }
}
