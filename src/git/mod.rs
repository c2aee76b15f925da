//! Version-control collaborator: the trait the commit flow talks to and its
//! git-backed implementation.

pub mod diff;
pub mod repository;

pub use diff::{StagedPatch, collect_staged_patch, count_staged_files};
pub use repository::GitRepository;

use crate::error::GitError;

/// Snapshot of the index relative to HEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedStatus {
    pub staged_file_count: usize,
}

/// Options passed through to the commit operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOptions {
    pub sign: bool,
}

/// Structured reason a commit failed, when the collaborator can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitFailureKind {
    NothingToCommit,
    Signing,
    Other,
}

/// A failed commit operation.
///
/// `kind` is `None` when the collaborator only produced free-form text;
/// callers then fall back to phrase matching on `detail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFailure {
    pub kind: Option<CommitFailureKind>,
    pub detail: String,
}

impl CommitFailure {
    pub fn unclassified(detail: impl Into<String>) -> Self {
        Self {
            kind: None,
            detail: detail.into(),
        }
    }

    pub fn classified(kind: CommitFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            detail: detail.into(),
        }
    }
}

/// Operations the commit flow needs from version control.
///
/// This abstraction allows swapping the real repository for fakes in tests.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Whether the configured working directory is a repository root.
    fn is_repository_root(&self) -> bool;

    /// The configured working directory, for operator messages.
    fn location(&self) -> String;

    /// Full staged diff in unified patch form (empty when nothing is staged).
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Count of staged files.
    fn staged_status(&self) -> Result<StagedStatus, GitError>;

    /// Commit the index with the given message.
    fn commit(&self, message: &str, options: CommitOptions) -> Result<(), CommitFailure>;
}
