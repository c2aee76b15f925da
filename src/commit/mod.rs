//! Reading staged changes and turning a confirmed message into a commit.

pub mod classify;
pub mod executor;
pub mod source;

pub use classify::{FailureClass, FailureClassifier, PhraseTable};
pub use executor::{CommitExecutor, CommitRequest, CommitResult};
pub use source::{DEFAULT_MAX_DIFF_CHARS, DiffSource, DiffSourceError, DiffText};
