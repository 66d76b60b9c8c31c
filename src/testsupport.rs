//! Shared test fixtures: temp dirs and scripted stand-ins for the completion
//! service, process runner, user interaction, and render sink.

use crate::api::CompletionService;
use crate::error::{ApiError, ExecError};
use crate::exec::{ExecOutput, ProcessRunner};
use crate::types::{CompletionChoice, CompletionRequest, CompletionResponse};
use crate::ui::{Interaction, RenderSink};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "askgpt-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

// ---------------------------------------------------------------------------
// Render sink
// ---------------------------------------------------------------------------

/// Render sink that records every call by channel.
#[derive(Debug, Default)]
pub struct RecordingSink {
    answers: Mutex<Vec<String>>,
    command_outputs: Mutex<Vec<String>>,
    infos: Mutex<Vec<String>>,
    details: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn answers(&self) -> Vec<String> {
        self.answers.lock().unwrap().clone()
    }

    pub fn command_outputs(&self) -> Vec<String> {
        self.command_outputs.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn details(&self) -> Vec<String> {
        self.details.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl RenderSink for RecordingSink {
    fn answer(&self, content: &str) {
        self.answers.lock().unwrap().push(content.to_string());
    }

    fn command_output(&self, content: &str) {
        self.command_outputs.lock().unwrap().push(content.to_string());
    }

    fn info(&self, text: &str) {
        self.infos.lock().unwrap().push(text.to_string());
    }

    fn detail(&self, text: &str) {
        self.details.lock().unwrap().push(text.to_string());
    }

    fn warn(&self, msg: &str) {
        self.warnings.lock().unwrap().push(msg.to_string());
    }

    fn error(&self, msg: &str) {
        self.errors.lock().unwrap().push(msg.to_string());
    }
}

// ---------------------------------------------------------------------------
// Completion service
// ---------------------------------------------------------------------------

/// Completion service that replays a fixed script, one entry per call.
///
/// `Ok(texts)` yields one choice per text; calls past the end of the script
/// fail.
#[derive(Debug)]
pub struct ScriptedService {
    script: Mutex<VecDeque<Result<Vec<String>, ApiError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedService {
    pub fn new(script: Vec<Result<Vec<String>, ApiError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Succeed once per answer, in order.
    pub fn answering<const N: usize>(answers: [&str; N]) -> Self {
        Self::new(
            answers
                .iter()
                .map(|a| Ok(vec![a.to_string()]))
                .collect(),
        )
    }

    /// Fail `failures` times with HTTP 503, then answer once.
    pub fn failing_then(failures: usize, answer: &str) -> Self {
        let mut script: Vec<Result<Vec<String>, ApiError>> = (0..failures)
            .map(|_| Err(ApiError::Status(503, "overloaded".into())))
            .collect();
        script.push(Ok(vec![answer.to_string()]));
        Self::new(script)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::InvalidResponse("script exhausted".into())));
        next.map(|texts| CompletionResponse {
            id: Some("cmpl-test".into()),
            choices: texts
                .into_iter()
                .enumerate()
                .map(|(index, text)| CompletionChoice {
                    text,
                    index: index as u32,
                    finish_reason: Some("stop".into()),
                })
                .collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Process runner
// ---------------------------------------------------------------------------

/// Runner that returns a canned result and records commands.
#[derive(Debug)]
pub struct FakeRunner {
    result: ExecOutput,
    commands: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn ok(output: &str, exit_code: i32) -> Self {
        Self {
            result: ExecOutput {
                output: output.to_string(),
                exit_code: Some(exit_code),
            },
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, command: &str) -> Result<ExecOutput, ExecError> {
        self.commands.lock().unwrap().push(command.to_string());
        Ok(self.result.clone())
    }
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

/// Interaction that answers from scripted queues and records questions.
#[derive(Debug)]
pub struct ScriptedInteraction {
    choices: Mutex<VecDeque<char>>,
    edits: Mutex<VecDeque<Option<String>>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedInteraction {
    pub fn new<const N: usize, const M: usize>(
        choices: [char; N],
        edits: [Option<&str>; M],
    ) -> Self {
        Self {
            choices: Mutex::new(choices.into_iter().collect()),
            edits: Mutex::new(edits.into_iter().map(|e| e.map(str::to_string)).collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Interaction for ScriptedInteraction {
    fn choose(&self, question: &str, choices: &[char], _default: char) -> Result<char, ExecError> {
        self.questions.lock().unwrap().push(question.to_string());
        let answer = self
            .choices
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for `{question}`"));
        assert!(
            choices.contains(&answer),
            "scripted answer `{answer}` is not valid for `{question}`"
        );
        Ok(answer)
    }

    fn edit(&self, _text: &str) -> Result<Option<String>, ExecError> {
        Ok(self
            .edits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted edit left")))
    }
}
