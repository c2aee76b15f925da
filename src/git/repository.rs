//! git-backed [`VersionControl`] implementation.
//!
//! Diff and status queries go through git2. The commit itself shells out to the
//! system `git` binary so the user's hooks, identity, and signing setup
//! (`gpg.program`, `gpg.format`, `user.signingkey`) all apply.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;
use tracing::debug;

use super::diff::{collect_staged_patch, count_staged_files};
use super::{CommitFailure, CommitFailureKind, CommitOptions, StagedStatus, VersionControl};
use crate::error::GitError;

/// A working directory that may or may not be a git repository root.
pub struct GitRepository {
    workdir: PathBuf,
    repo: Option<Repository>,
}

impl GitRepository {
    /// Open `workdir` as a repository root.
    ///
    /// Never fails: a directory that is not a repository root is remembered as
    /// such and reported by [`VersionControl::is_repository_root`].
    pub fn open(workdir: impl AsRef<Path>) -> Self {
        let workdir = workdir.as_ref().to_path_buf();
        let repo = match Repository::open(&workdir) {
            Ok(repo) => Some(repo),
            Err(e) => {
                debug!("{} is not a repository root: {}", workdir.display(), e);
                None
            }
        };
        Self { workdir, repo }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn repo(&self) -> Result<&Repository, GitError> {
        self.repo
            .as_ref()
            .ok_or_else(|| GitError::NotARepository(self.workdir.display().to_string()))
    }
}

impl VersionControl for GitRepository {
    fn is_repository_root(&self) -> bool {
        self.repo.is_some()
    }

    fn location(&self) -> String {
        self.workdir.display().to_string()
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        let patch = collect_staged_patch(self.repo()?)?;
        if !patch.files.is_empty() {
            debug!("Staged files: {}", patch.files.join(", "));
        }
        Ok(patch.text)
    }

    fn staged_status(&self) -> Result<StagedStatus, GitError> {
        let staged_file_count = count_staged_files(self.repo()?)?;
        Ok(StagedStatus { staged_file_count })
    }

    fn commit(&self, message: &str, options: CommitOptions) -> Result<(), CommitFailure> {
        let mut args = vec!["commit", "-m", message];
        if options.sign {
            args.push("-S");
        }
        run_git(&self.workdir, &args)
    }
}

/// Run a git command in `workdir`, returning its combined output on failure.
///
/// git prints "nothing to commit" on stdout and signing errors on stderr, so
/// both streams go into the failure detail.
fn run_git(workdir: &Path, args: &[&str]) -> Result<(), CommitFailure> {
    let output = Command::new("git")
        .arg("-C")
        .arg(workdir)
        .args(args)
        .output()
        .map_err(|e| {
            CommitFailure::classified(
                CommitFailureKind::Other,
                format!("Failed to run git {}: {}", args.first().unwrap_or(&""), e),
            )
        })?;

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = [stderr.trim(), stdout.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CommitFailure::unclassified(detail));
    }

    Ok(())
}
