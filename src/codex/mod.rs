//! Codex CLI integration.

pub mod subprocess;

pub use subprocess::{check_codex_installed, run_codex};
