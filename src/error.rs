//! Unified error types for askgpt.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors from the completion service boundary.
#[derive(Debug)]
pub enum ApiError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the API.
    Status(u16, String),
    /// The service answered 2xx but the payload was unusable.
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status code when this error came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code, _) => Some(*code),
            _ => None,
        }
    }

    /// True for HTTP 429 responses.
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code, body) => write!(f, "status {code}: {body}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors from the transcript store.
#[derive(Debug)]
pub enum StoreError {
    /// The subject was empty after trimming.
    EmptySubject,
    /// Filesystem failure on a transcript path.
    Io(PathBuf, std::io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubject => write!(f, "subject is empty"),
            Self::Io(path, e) => write!(f, "{}: {e}", path.display()),
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// ExecError
// ---------------------------------------------------------------------------

/// Errors from running a command or an editor.
#[derive(Debug)]
pub enum ExecError {
    /// The shell process could not be started or awaited.
    Spawn(std::io::Error),
    /// The command outlived `exec.timeout_secs`.
    TimedOut(Duration),
    /// The editor failed or exited unsuccessfully.
    Editor(String),
    /// Reading the user's answer from the terminal failed.
    Input(std::io::Error),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to run command: {e}"),
            Self::TimedOut(limit) => {
                write!(f, "command timed out after {}s", limit.as_secs_f64())
            }
            Self::Editor(msg) => write!(f, "editor: {msg}"),
            Self::Input(e) => write!(f, "input: {e}"),
        }
    }
}

impl std::error::Error for ExecError {}

// ---------------------------------------------------------------------------
// QueryError (top-level)
// ---------------------------------------------------------------------------

/// Advice shown when every attempt of a query failed.
pub const RETRY_EXHAUSTED_ADVICE: &str =
    "Too many requests. Please wait a few minutes and try again";

/// Top-level error type for one `query` invocation.
#[derive(Debug)]
pub enum QueryError {
    /// The caller supplied no subject.
    NoSubjectProvided,
    /// The requested scenario is not in the scenario table.
    UnknownScenario(String),
    Store(StoreError),
    /// Every attempt failed; `last` is the final failure.
    RetryExhausted { attempts: u32, last: ApiError },
    Exec(ExecError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSubjectProvided => write!(f, "No subject provided"),
            Self::UnknownScenario(name) => write!(f, "unknown scenario `{name}`"),
            Self::Store(e) => write!(f, "transcript: {e}"),
            Self::RetryExhausted { attempts, last } => write!(
                f,
                "{RETRY_EXHAUSTED_ADVICE} ({attempts} attempt(s) failed, last error: {last})"
            ),
            Self::Exec(e) => write!(f, "execute: {e}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<StoreError> for QueryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmptySubject => Self::NoSubjectProvided,
            other => Self::Store(other),
        }
    }
}

impl From<ExecError> for QueryError {
    fn from(e: ExecError) -> Self {
        Self::Exec(e)
    }
}
