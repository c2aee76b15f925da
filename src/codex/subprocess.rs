//! Codex CLI spawning.

use std::env;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::CodexError;

/// Environment variable that opts in to a subprocess timeout (seconds).
const TIMEOUT_ENV_VAR: &str = "COMMITWISE_CODEX_TIMEOUT";

/// Get the configured timeout, if any.
///
/// Same rules as the Claude variant: unset, empty, zero, or invalid values
/// mean no limit.
fn get_timeout() -> Option<Duration> {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                warn!("Invalid {} value '{}', running without a timeout", TIMEOUT_ENV_VAR, v);
                None
            }
        },
        _ => None,
    }
}

/// Check if Codex CLI is installed and accessible.
pub async fn check_codex_installed() -> Result<(), CodexError> {
    if which::which("codex").is_err() {
        return Err(CodexError::NotInstalled);
    }

    let version_check = Command::new("codex")
        .arg("--version")
        .output()
        .await
        .map_err(CodexError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(CodexError::NotInstalled);
    }

    Ok(())
}

/// Run `codex exec <prompt>` and return the free-form text response.
pub async fn run_codex(prompt: &str) -> Result<String, CodexError> {
    let mut cmd = Command::new("codex");
    cmd.arg("exec")
        .arg(prompt)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("Running codex with a {} char prompt", prompt.len());

    let output = match get_timeout() {
        Some(limit) => timeout(limit, cmd.output())
            .await
            .map_err(|_| CodexError::Timeout(limit.as_secs()))?,
        None => cmd.output().await,
    }
    .map_err(CodexError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(CodexError::NonZeroExit { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
