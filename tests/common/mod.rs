//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::Path;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use commitwise::error::{ClaudeError, GitError, TerminalError};
use commitwise::git::{CommitFailure, CommitOptions, StagedStatus, VersionControl};
use commitwise::llm::{LlmProviderError, TextGenerator};
use commitwise::select::Terminal;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    ///
    /// The repository gets a local identity and signing disabled so `git
    /// commit` works regardless of the host's global config.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config.set_bool("commit.gpgsign", false).expect("Failed to set commit.gpgsign");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Point `gpg.program` at a command that always fails, so `git commit -S`
    /// reports a signing error.
    pub fn break_signing(&self) {
        let mut config = self.repo.config().expect("Failed to open repo config");
        config.set_str("gpg.program", "false").expect("Failed to set gpg.program");
        config.set_str("gpg.format", "openpgp").expect("Failed to set gpg.format");
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write test file");
    }

    /// Write and stage a file.
    pub fn stage(&self, name: &str, content: &str) {
        self.write(name, content);
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Stage a file and commit it through git2. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        self.stage(name, content);
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Summary line of the HEAD commit, if any.
    pub fn head_summary(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        let commit = head.peel_to_commit().ok()?;
        commit.summary().map(String::from)
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let Ok(mut walk) = self.repo.revwalk() else {
            return 0;
        };
        if walk.push_head().is_err() {
            return 0;
        }
        walk.count()
    }
}

/// Terminal that replays scripted answers and records everything it sees.
///
/// Running out of answers behaves like a closed input stream.
#[derive(Default)]
pub struct ScriptedTerminal {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub shown: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn saw(&self, needle: &str) -> bool {
        self.shown.iter().any(|line| line.contains(needle))
    }
}

impl Terminal for ScriptedTerminal {
    fn prompt(&mut self, text: &str) -> Result<String, TerminalError> {
        self.prompts.push(text.to_string());
        self.answers.pop_front().ok_or(TerminalError::Closed)
    }

    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

/// In-memory version control that records commit calls.
pub struct RecordingVcs {
    pub is_root: bool,
    pub diff: String,
    pub staged_files: usize,
    pub failure: Option<CommitFailure>,
    pub diff_calls: Cell<usize>,
    pub commits: RefCell<Vec<(String, CommitOptions)>>,
}

impl RecordingVcs {
    pub fn with_diff(diff: &str) -> Self {
        Self {
            is_root: true,
            diff: diff.to_string(),
            staged_files: if diff.trim().is_empty() { 0 } else { 1 },
            failure: None,
            diff_calls: Cell::new(0),
            commits: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_with(mut self, failure: CommitFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn commit_count(&self) -> usize {
        self.commits.borrow().len()
    }
}

impl VersionControl for RecordingVcs {
    fn is_repository_root(&self) -> bool {
        self.is_root
    }

    fn location(&self) -> String {
        "/work/project".to_string()
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        self.diff_calls.set(self.diff_calls.get() + 1);
        Ok(self.diff.clone())
    }

    fn staged_status(&self) -> Result<StagedStatus, GitError> {
        Ok(StagedStatus {
            staged_file_count: self.staged_files,
        })
    }

    fn commit(&self, message: &str, options: CommitOptions) -> Result<(), CommitFailure> {
        self.commits.borrow_mut().push((message.to_string(), options));
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

/// Generator returning a fixed response and counting calls.
pub struct CannedGenerator {
    response: Result<String, String>,
    calls: std::sync::atomic::AtomicUsize,
}

impl CannedGenerator {
    pub fn ok(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: Default::default(),
        }
    }

    /// Generator whose every call fails as a Claude execution error.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Default::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmProviderError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ClaudeError::ExecutionFailed(message.clone()).into()),
        }
    }
}
