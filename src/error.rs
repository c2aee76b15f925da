//! Error types for commitwise modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to read staged status: {0}")]
    StatusFailed(#[source] git2::Error),
}

/// Errors from Claude CLI operations.
#[derive(Error, Debug)]
pub enum ClaudeError {
    #[error("Claude Code CLI not found. Install with: npm install -g @anthropic-ai/claude-code")]
    NotInstalled,

    #[error("Claude Code CLI failed to execute: {0}")]
    ExecutionFailed(String),

    #[error("Failed to spawn Claude process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Claude process timed out after {0} seconds")]
    Timeout(u64),

    #[error("Claude CLI exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

/// Errors from Codex CLI operations.
#[derive(Error, Debug)]
pub enum CodexError {
    #[error(
        "Codex CLI not found. Install with: npm install -g @openai/codex (then run `codex` or set CODEX_API_KEY)"
    )]
    NotInstalled,

    #[error("Failed to spawn Codex process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Codex process timed out after {0} seconds")]
    Timeout(u64),

    #[error("Codex CLI exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

/// Errors from reading operator input.
#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Input stream closed")]
    Closed,

    #[error("Terminal I/O error: {0}")]
    Io(String),
}

/// Errors from loading the commit failure phrase table.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to read phrase table: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to parse phrase table: {0}")]
    ParseFailed(#[source] serde_json::Error),

    #[error("Invalid phrase pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
