//! Claude CLI spawning.

use std::env;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::ClaudeError;

/// Environment variable that opts in to a subprocess timeout (seconds).
const TIMEOUT_ENV_VAR: &str = "COMMITWISE_CLAUDE_TIMEOUT";

/// Get the configured timeout, if any.
///
/// Reads from COMMITWISE_CLAUDE_TIMEOUT. Unset or empty means the call waits
/// for the CLI to finish. Logs a warning and waits without a limit if the
/// variable holds an invalid value (non-numeric, negative, or zero).
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

/// Check if Claude Code CLI is installed and accessible.
///
/// Uses the `which` crate for cross-platform executable detection.
pub async fn check_claude_installed() -> Result<(), ClaudeError> {
    if which::which("claude").is_err() {
        return Err(ClaudeError::NotInstalled);
    }

    // Verify it actually runs (check version)
    let version_check = Command::new("claude")
        .arg("--version")
        .output()
        .await
        .map_err(ClaudeError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(ClaudeError::NotInstalled);
    }

    Ok(())
}

/// Run Claude CLI with a prompt and return its stdout.
///
/// Uses the -p flag for prompt and --output-format json, so stdout is the CLI's
/// JSON envelope rather than the bare answer.
pub async fn run_claude(prompt: &str) -> Result<String, ClaudeError> {
    let mut cmd = Command::new("claude");
    cmd.arg("-p")
        .arg(prompt)
        .arg("--output-format")
        .arg("json")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("Running claude with a {} char prompt", prompt.len());

    let output = match get_timeout() {
        Some(limit) => timeout(limit, cmd.output())
            .await
            .map_err(|_| ClaudeError::Timeout(limit.as_secs()))?,
        None => cmd.output().await,
    }
    .map_err(ClaudeError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(ClaudeError::NonZeroExit { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_timeout_unset_means_no_limit() {
        temp_env::with_var_unset(TIMEOUT_ENV_VAR, || {
            assert_eq!(get_timeout(), None);
        });
    }

    #[test]
    fn test_get_timeout_from_env() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("60"), || {
            assert_eq!(get_timeout(), Some(Duration::from_secs(60)));
        });
    }

    #[test]
    fn test_get_timeout_invalid_env_means_no_limit() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("not_a_number"), || {
            assert_eq!(get_timeout(), None);
        });
    }

    #[test]
    fn test_get_timeout_zero_means_no_limit() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("0"), || {
            assert_eq!(get_timeout(), None);
        });
    }

    #[test]
    fn test_get_timeout_empty_env_means_no_limit() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some(""), || {
            assert_eq!(get_timeout(), None);
        });
    }
}
