//! Unwrapping the Claude CLI JSON envelope into plain answer text.

use serde::Deserialize;
use tracing::debug;

use crate::error::ClaudeError;

use super::subprocess::run_claude;

/// Claude CLI JSON envelope when using --output-format json
#[derive(Deserialize)]
struct ClaudeCliResponse {
    #[serde(default)]
    result: String,
    #[serde(default)]
    is_error: bool,
}

/// Run Claude once and return the text of its answer.
pub async fn generate_text(prompt: &str) -> Result<String, ClaudeError> {
    let response = run_claude(prompt).await?;
    parse_claude_response(&response)
}

/// Extract the answer text from Claude's stdout.
///
/// Falls back to the raw stdout when it is not an envelope, so older CLI
/// versions that print plain text still work.
pub(crate) fn parse_claude_response(response: &str) -> Result<String, ClaudeError> {
    match serde_json::from_str::<ClaudeCliResponse>(response) {
        Ok(envelope) if envelope.is_error => Err(ClaudeError::ExecutionFailed(envelope.result)),
        Ok(envelope) => Ok(envelope.result),
        Err(e) => {
            debug!("Claude output is not a JSON envelope ({}), using it as-is", e);
            Ok(response.to_string())
        }
    }
}
