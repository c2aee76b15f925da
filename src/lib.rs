//! commitwise - A CLI tool that suggests commit messages for staged changes.
//!
//! # Overview
//!
//! commitwise reads the staged diff of a git repository, asks an AI CLI
//! (Claude Code or Codex) for conventional commit message suggestions, lets
//! the operator pick or write one, and commits it with `git commit`,
//! optionally signed.

pub mod claude;
pub mod codex;
pub mod commit;
pub mod error;
pub mod flow;
pub mod git;
pub mod llm;
pub mod select;
pub mod suggest;

// Re-export commonly used types
pub use commit::{CommitRequest, CommitResult, DiffText, FailureClassifier, PhraseTable};
pub use error::{ClaudeError, ClassifierError, CodexError, GitError, TerminalError};
pub use flow::{CommitFlow, FlowConfig, FlowOutcome};
pub use git::{GitRepository, VersionControl};
pub use llm::{CliGenerator, LlmProviderError, Provider, TextGenerator};
pub use select::{DialoguerTerminal, SelectionOutcome, Terminal};
pub use suggest::{CommitCandidate, Suggestions};
