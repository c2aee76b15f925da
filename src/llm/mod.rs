//! Text-generation collaborator: provider selection and the single-call
//! generator used for commit suggestions.

use std::fmt;

use async_trait::async_trait;
use clap::ValueEnum;

use crate::claude;
use crate::codex;
use crate::error::{ClaudeError, CodexError};

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Provider {
    #[default]
    Claude,
    Codex,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Claude => "Claude",
            Provider::Codex => "Codex",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-specific error wrapper.
#[derive(Debug)]
pub enum LlmProviderError {
    Claude(ClaudeError),
    Codex(CodexError),
}

impl LlmProviderError {
    pub fn provider(&self) -> Provider {
        match self {
            LlmProviderError::Claude(_) => Provider::Claude,
            LlmProviderError::Codex(_) => Provider::Codex,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            LlmProviderError::Claude(err) => summarize_claude_error(err),
            LlmProviderError::Codex(err) => summarize_codex_error(err),
        }
    }

    pub fn detail(&self) -> String {
        match self {
            LlmProviderError::Claude(err) => err.to_string(),
            LlmProviderError::Codex(err) => err.to_string(),
        }
    }
}

impl fmt::Display for LlmProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for LlmProviderError {}

impl From<ClaudeError> for LlmProviderError {
    fn from(err: ClaudeError) -> Self {
        LlmProviderError::Claude(err)
    }
}

impl From<CodexError> for LlmProviderError {
    fn from(err: CodexError) -> Self {
        LlmProviderError::Codex(err)
    }
}

/// Produces free-form text for a prompt.
///
/// This abstraction allows replacing the provider subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issue one generation request. Implementations must not retry.
    async fn generate(&self, prompt: &str) -> Result<String, LlmProviderError>;
}

/// Generator that runs the selected provider's CLI once per request.
#[derive(Debug, Clone, Copy)]
pub struct CliGenerator {
    provider: Provider,
}

impl CliGenerator {
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Verify the provider CLI is installed and runs.
    pub async fn check_installed(&self) -> Result<(), LlmProviderError> {
        match self.provider {
            Provider::Claude => claude::check_claude_installed().await.map_err(Into::into),
            Provider::Codex => codex::check_codex_installed().await.map_err(Into::into),
        }
    }
}

#[async_trait]
impl TextGenerator for CliGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmProviderError> {
        match self.provider {
            Provider::Claude => claude::generate_text(prompt).await.map_err(Into::into),
            Provider::Codex => codex::run_codex(prompt).await.map_err(Into::into),
        }
    }
}

fn summarize_claude_error(err: &ClaudeError) -> String {
    match err {
        ClaudeError::NotInstalled => "Claude CLI not found".to_string(),
        ClaudeError::ExecutionFailed(_) => "Claude CLI reported an error".to_string(),
        ClaudeError::SpawnFailed(_) => "Failed to start Claude CLI".to_string(),
        ClaudeError::Timeout(secs) => format!("Claude timed out after {}s", secs),
        ClaudeError::NonZeroExit { code, .. } => format!("Claude CLI exited with code {}", code),
    }
}

fn summarize_codex_error(err: &CodexError) -> String {
    match err {
        CodexError::NotInstalled => "Codex CLI not found".to_string(),
        CodexError::SpawnFailed(_) => "Failed to start Codex CLI".to_string(),
        CodexError::Timeout(secs) => format!("Codex timed out after {}s", secs),
        CodexError::NonZeroExit { code, .. } => format!("Codex CLI exited with code {}", code),
    }
}
