//! Staged diff collection using git2.

use git2::{Delta, Diff, DiffFormat, ErrorCode, Repository, Tree};
use tracing::debug;

use crate::error::GitError;

/// A staged patch with per-file and line statistics.
#[derive(Debug, Clone, Default)]
pub struct StagedPatch {
    pub text: String,
    pub files: Vec<String>,
    pub additions: usize,
    pub deletions: usize,
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// so the first commit's staged files diff against the empty tree.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, git2::Error> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    Ok(Some(head_ref.peel_to_tree()?))
}

/// Diff HEAD against the index (what `git diff --cached` shows).
fn staged_diff(repo: &Repository) -> Result<Diff<'_>, git2::Error> {
    let head_tree = resolve_head_tree(repo)?;
    repo.diff_tree_to_index(head_tree.as_ref(), None, None)
}

/// Collect the staged patch text.
///
/// Unstaged and untracked files are never included.
pub fn collect_staged_patch(repo: &Repository) -> Result<StagedPatch, GitError> {
    let diff = staged_diff(repo).map_err(GitError::DiffFailed)?;

    let mut patch = StagedPatch {
        files: changed_paths(&diff),
        ..Default::default()
    };

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        match origin {
            '+' => patch.additions += 1,
            '-' => patch.deletions += 1,
            _ => {}
        }

        let content = String::from_utf8_lossy(line.content());

        if origin == '+' || origin == '-' || origin == ' ' {
            patch.text.push(origin);
        }
        patch.text.push_str(&content);
        true
    })
    .map_err(GitError::DiffFailed)?;

    debug!(
        "Staged patch: {} files, {} additions, {} deletions",
        patch.files.len(),
        patch.additions,
        patch.deletions
    );

    Ok(patch)
}

/// Count files with staged changes.
pub fn count_staged_files(repo: &Repository) -> Result<usize, GitError> {
    let diff = staged_diff(repo).map_err(GitError::StatusFailed)?;
    Ok(diff
        .deltas()
        .filter(|d| d.status() != Delta::Unmodified)
        .count())
}

fn changed_paths(diff: &Diff<'_>) -> Vec<String> {
    diff.deltas()
        .filter_map(|delta| {
            delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().to_string())
        })
        .collect()
}
