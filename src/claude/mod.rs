//! Claude CLI integration.

pub mod response;
pub mod subprocess;

pub use response::generate_text;
pub use subprocess::{check_claude_installed, run_claude};
