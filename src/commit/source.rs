//! Staged diff retrieval for the commit flow.

use thiserror::Error;
use tracing::warn;

use crate::error::GitError;
use crate::git::VersionControl;

/// Default maximum characters of diff text handed to the generator.
pub const DEFAULT_MAX_DIFF_CHARS: usize = 30_000;

/// Non-empty staged diff text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffText {
    text: String,
    truncated: bool,
}

impl DiffText {
    /// Wrap diff text, returning `None` when it is blank.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            truncated: false,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the diff was cut to fit the size limit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Cut the text to at most `max_chars` characters.
    ///
    /// Returns `None` when nothing but whitespace is left.
    pub(crate) fn truncate_to(mut self, max_chars: usize) -> Option<Self> {
        if let Some((end, _)) = self.text.char_indices().nth(max_chars) {
            self.text.truncate(end);
            self.truncated = true;
        }
        if self.text.trim().is_empty() {
            return None;
        }
        Some(self)
    }
}

/// Why the staged diff could not be read.
#[derive(Error, Debug)]
pub enum DiffSourceError {
    #[error("{0} is not the root of a git repository")]
    NotARepository(String),

    #[error("Could not read staged changes: {0}")]
    Transport(String),
}

/// Reads the staged diff through the version-control collaborator.
pub struct DiffSource<'a, V: VersionControl> {
    vcs: &'a V,
    max_chars: usize,
}

impl<'a, V: VersionControl> DiffSource<'a, V> {
    pub fn new(vcs: &'a V, max_chars: usize) -> Self {
        Self { vcs, max_chars }
    }

    /// Fetch the staged diff.
    ///
    /// `Ok(None)` means nothing is staged; errors are never retried.
    pub fn fetch(&self) -> Result<Option<DiffText>, DiffSourceError> {
        if !self.vcs.is_repository_root() {
            return Err(DiffSourceError::NotARepository(self.vcs.location()));
        }

        let raw = self.vcs.staged_diff().map_err(|e| match e {
            GitError::NotARepository(path) => DiffSourceError::NotARepository(path),
            other => DiffSourceError::Transport(other.to_string()),
        })?;

        let Some(diff) = DiffText::new(raw) else {
            return Ok(None);
        };

        let Some(diff) = diff.truncate_to(self.max_chars) else {
            warn!("Staged diff is blank within the {} char limit", self.max_chars);
            return Ok(None);
        };
        if diff.is_truncated() {
            warn!("Staged diff truncated to {} chars", self.max_chars);
        }
        Ok(Some(diff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockVersionControl;

    fn vcs_with_diff(diff: &'static str) -> MockVersionControl {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository_root().return_const(true);
        vcs.expect_staged_diff().returning(move || Ok(diff.to_string()));
        vcs
    }

    #[test]
    fn test_non_root_is_repository_error_without_reading_diff() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository_root().return_const(false);
        vcs.expect_location().return_const("/work/sub".to_string());
        vcs.expect_staged_diff().never();

        match DiffSource::new(&vcs, DEFAULT_MAX_DIFF_CHARS).fetch() {
            Err(e @ DiffSourceError::NotARepository(_)) => {
                assert_eq!(e.to_string(), "/work/sub is not the root of a git repository");
            }
            other => panic!("Expected NotARepository, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_diff_is_absent() {
        let vcs = vcs_with_diff("");
        assert_eq!(DiffSource::new(&vcs, 100).fetch().unwrap(), None);
    }

    #[test]
    fn test_whitespace_diff_is_absent() {
        let vcs = vcs_with_diff("\n  \n");
        assert_eq!(DiffSource::new(&vcs, 100).fetch().unwrap(), None);
    }

    #[test]
    fn test_diff_is_returned_verbatim() {
        let vcs = vcs_with_diff("+x\n");
        let diff = DiffSource::new(&vcs, 100).fetch().unwrap().unwrap();
        assert_eq!(diff.as_str(), "+x\n");
        assert!(!diff.is_truncated());
    }

    #[test]
    fn test_long_diff_is_truncated_on_char_boundary() {
        let vcs = vcs_with_diff("+ééééé\n");
        let diff = DiffSource::new(&vcs, 4).fetch().unwrap().unwrap();
        assert_eq!(diff.as_str(), "+ééé");
        assert!(diff.is_truncated());
    }

    #[test]
    fn test_limit_counts_chars_not_bytes() {
        let vcs = vcs_with_diff("+ééé");
        let diff = DiffSource::new(&vcs, 4).fetch().unwrap().unwrap();
        assert_eq!(diff.as_str(), "+ééé");
        assert!(!diff.is_truncated());
    }

    #[test]
    fn test_zero_limit_leaves_no_diff() {
        let vcs = vcs_with_diff("+x\n");
        assert_eq!(DiffSource::new(&vcs, 0).fetch().unwrap(), None);
    }

    #[test]
    fn test_truncation_to_whitespace_leaves_no_diff() {
        let vcs = vcs_with_diff("  \n+x\n");
        assert_eq!(DiffSource::new(&vcs, 3).fetch().unwrap(), None);
    }

    #[test]
    fn test_git_failure_is_transport_error() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository_root().return_const(true);
        vcs.expect_staged_diff().returning(|| {
            Err(GitError::DiffFailed(git2::Error::from_str("index locked")))
        });

        match DiffSource::new(&vcs, 100).fetch() {
            Err(DiffSourceError::Transport(detail)) => assert!(detail.contains("index locked")),
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }
}
