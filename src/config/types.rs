//! Configuration data model.
//!
//! This module holds struct definitions plus default values. Source discovery
//! and environment precedence live in `loader`, `sources`, and `env`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{
    builtin_scenarios, CONVERSATIONS_DIR_NAME, DEFAULT_AI_PROMPT, DEFAULT_API_BASE_URL,
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_FILE_EXTENSION, DEFAULT_MAX_RETRIES, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_RETRY_DELAY_SECS, DEFAULT_RETRY_MAX_DELAY_SECS,
    DEFAULT_RETRY_MULTIPLIER, DEFAULT_SHELL, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
    DEFAULT_USER_PROMPT,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub query: QueryConfig,
    pub retry: RetryConfig,
    pub storage: StorageConfig,
    pub exec: ExecConfig,
    pub display: DisplayConfig,
    /// Scenario name → bootstrap text.
    pub scenarios: BTreeMap<String, String>,
    /// Directory holding the global config, credentials, and (by default)
    /// conversations. Resolved by the loader, never read from the file.
    #[serde(skip)]
    pub config_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            query: QueryConfig::default(),
            retry: RetryConfig::default(),
            storage: StorageConfig::default(),
            exec: ExecConfig::default(),
            display: DisplayConfig::default(),
            scenarios: builtin_scenarios(),
            config_dir: PathBuf::new(),
        }
    }
}

impl Config {
    /// Directory containing one transcript file per subject.
    pub fn conversations_dir(&self) -> PathBuf {
        self.storage
            .conversations_dir
            .clone()
            .unwrap_or_else(|| self.config_dir.join(CONVERSATIONS_DIR_NAME))
    }

    /// Look up a scenario bootstrap by exact name.
    pub fn scenario(&self, name: &str) -> Option<&str> {
        self.scenarios.get(name).map(String::as_str)
    }
}

/// Completion-service connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Resolved API key. Never echoed by `show config`.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Name of an environment variable holding the key.
    pub api_key_env: Option<String>,
    /// Optional `OpenAI-Organization` header value.
    pub organization: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            api_key: String::new(),
            api_key_env: None,
            organization: None,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Default sampling parameters and turn markers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    /// Marker prefixing user turns; also a stop sequence.
    pub user_prompt: String,
    /// Marker prefixing AI turns; also a stop sequence.
    pub ai_prompt: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: DEFAULT_TOP_P,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            user_prompt: DEFAULT_USER_PROMPT.into(),
            ai_prompt: DEFAULT_AI_PROMPT.into(),
        }
    }
}

/// Backoff settings for `query --retry`. Delays are in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub retry_delay: f64,
    pub retry_multiplier: f64,
    pub retry_max_delay: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY_SECS,
            retry_multiplier: DEFAULT_RETRY_MULTIPLIER,
            retry_max_delay: DEFAULT_RETRY_MAX_DELAY_SECS,
        }
    }
}

/// Where transcripts live on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides `<config_dir>/conversations` when set.
    pub conversations_dir: Option<PathBuf>,
    /// Suffix appended to the sanitized subject, dot included.
    pub file_extension: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            conversations_dir: None,
            file_extension: DEFAULT_FILE_EXTENSION.into(),
        }
    }
}

/// Settings for running AI-suggested commands.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecConfig {
    pub shell: String,
    /// Upper bound on one command's runtime; unbounded when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.into(),
            timeout_secs: None,
        }
    }
}

impl ExecConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Display preferences.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub show_disclaimer: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_disclaimer: true,
        }
    }
}
