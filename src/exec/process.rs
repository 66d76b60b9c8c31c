//! Shell process execution with stderr folded into stdout.

use crate::config::ExecConfig;
use crate::error::ExecError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Captured result of one shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Combined stdout/stderr, lossily decoded as UTF-8.
    pub output: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a command string through a shell.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &str) -> Result<ExecOutput, ExecError>;
}

/// Local `<shell> -c` runner with an optional timeout.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            shell: shell.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ExecConfig) -> Self {
        Self::new(config.shell.clone(), config.timeout())
    }
}

#[async_trait]
impl ProcessRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<ExecOutput, ExecError> {
        // `exec 2>&1` points the shell's stderr at its stdout pipe, so both
        // streams interleave in the order the command wrote them.
        let script = format!("exec 2>&1\n{command}");
        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(script)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ExecError::Spawn)?;
        tracing::info!(shell = %self.shell, %command, "running command");

        let waited = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => match timeout(limit, waited).await {
                Ok(result) => result.map_err(ExecError::Spawn)?,
                Err(_) => {
                    tracing::warn!(%command, limit_secs = limit.as_secs(), "command timed out");
                    return Err(ExecError::TimedOut(limit));
                }
            },
            None => waited.await.map_err(ExecError::Spawn)?,
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        // Only populated if the shell failed before the redirect took effect.
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        let exit_code = output.status.code();
        tracing::debug!(?exit_code, bytes = text.len(), "command finished");
        Ok(ExecOutput {
            output: text,
            exit_code,
        })
    }
}
