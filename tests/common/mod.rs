//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature, Time};

use herald::error::{GitError, PromptError};
use herald::git::{CommandOutput, GitExecutor};
use herald::prompt::Prompter;
use herald::template::RandomSource;

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
    clock: RefCell<i64>,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self {
            dir,
            repo,
            clock: RefCell::new(1_700_000_000),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a commit as "Test User".
    pub fn commit(&self, message: &str) -> Oid {
        self.commit_as(message, "Test User", "test@example.com")
    }

    /// Create a commit with the given author. Each commit is one minute
    /// after the previous one so time ordering is deterministic.
    pub fn commit_as(&self, message: &str, name: &str, email: &str) -> Oid {
        let seconds = {
            let mut clock = self.clock.borrow_mut();
            *clock += 60;
            *clock
        };
        let sig = Signature::new(name, email, &Time::new(seconds, 0))
            .expect("Failed to create signature");

        let file_path = self.dir.path().join("test.txt");
        std::fs::write(&file_path, format!("{}\n{}", message, seconds))
            .expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new("test.txt")).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }
}

/// One scripted answer for [`ScriptedPrompter`].
#[derive(Debug, Clone)]
pub enum Answer {
    Input(&'static str),
    Select(usize),
    MultiSelect(Vec<usize>),
    Confirm(bool),
    Editor(&'static str),
}

/// Prompter that replays a fixed list of answers in order and records the
/// questions it was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    pub asked: RefCell<Vec<String>>,
    pub shown: RefCell<Vec<String>>,
    pub warnings: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            ..Default::default()
        }
    }

    fn next(&self, prompt: &str) -> Answer {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("No scripted answer left for prompt {:?}", prompt))
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, _default: Option<String>) -> Result<String, PromptError> {
        match self.next(prompt) {
            Answer::Input(s) => Ok(s.to_string()),
            other => panic!("Expected input answer for {:?}, got {:?}", prompt, other),
        }
    }

    fn select(&self, prompt: &str, _items: &[String], _default: usize) -> Result<usize, PromptError> {
        match self.next(prompt) {
            Answer::Select(i) => Ok(i),
            other => panic!("Expected select answer for {:?}, got {:?}", prompt, other),
        }
    }

    fn multi_select(
        &self,
        prompt: &str,
        _items: &[String],
        _defaults: &[bool],
    ) -> Result<Vec<usize>, PromptError> {
        match self.next(prompt) {
            Answer::MultiSelect(v) => Ok(v),
            other => panic!("Expected multi-select answer for {:?}, got {:?}", prompt, other),
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, PromptError> {
        match self.next(prompt) {
            Answer::Confirm(b) => Ok(b),
            other => panic!("Expected confirm answer for {:?}, got {:?}", prompt, other),
        }
    }

    fn editor(&self, initial: &str) -> Result<String, PromptError> {
        match self.next(initial) {
            Answer::Editor(s) => Ok(s.to_string()),
            other => panic!("Expected editor answer, got {:?}", other),
        }
    }

    fn show(&self, text: &str) {
        self.shown.borrow_mut().push(text.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}

/// In-memory git executor. Responses are matched by argument prefix; any
/// other command succeeds with empty output.
#[derive(Default)]
pub struct FakeGit {
    responses: Vec<(Vec<String>, CommandOutput)>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, prefix: &[&str], stdout: &str) -> Self {
        self.responses.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: 0,
            },
        ));
        self
    }

    pub fn fail(mut self, prefix: &[&str], stderr: &str) -> Self {
        self.responses.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            CommandOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_code: 1,
            },
        ));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Calls whose first argument is `subcommand`.
    pub fn calls_to(&self, subcommand: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|c| c.first().is_some_and(|a| a == subcommand))
            .collect()
    }
}

#[async_trait]
impl GitExecutor for FakeGit {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, GitError> {
        self.calls.lock().expect("calls lock").push(args.to_vec());

        let output = self
            .responses
            .iter()
            .find(|(prefix, _)| args.starts_with(prefix))
            .map(|(_, out)| out.clone())
            .unwrap_or(CommandOutput {
                stdout: String::new(),
                stderr: String::new(),
                exit_code: 0,
            });
        Ok(output)
    }
}

/// Deterministic [`RandomSource`].
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn next_below(&mut self, upper: u32) -> u32 {
        self.0 % upper
    }
}
