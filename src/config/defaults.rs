//! Default configuration constants and built-in scenarios.
//!
//! Keeping defaults in one module lets the typed config, the embedded
//! template, and tests agree on the same literals.

use std::collections::BTreeMap;

/// Embedded default `askgpt.toml` template written on first run.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/askgpt.toml");
/// Directory name under the platform config root.
pub(super) const APP_DIR_NAME: &str = "askgpt";
/// Config file name, both local and global.
pub(super) const CONFIG_FILE_NAME: &str = "askgpt.toml";
/// Credentials file stored next to the global config.
pub(super) const CREDENTIALS_FILE_NAME: &str = "credentials";
/// Subdirectory of the config dir that holds transcripts.
pub(super) const CONVERSATIONS_DIR_NAME: &str = "conversations";

pub(super) const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub(super) const DEFAULT_API_TIMEOUT_SECS: u64 = 120;
/// Completions-endpoint model used when nothing else is configured.
pub(super) const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
pub(super) const DEFAULT_TEMPERATURE: f64 = 0.0;
pub(super) const DEFAULT_MAX_TOKENS: u32 = 1024;
pub(super) const DEFAULT_TOP_P: f64 = 1.0;
pub(super) const DEFAULT_USER_PROMPT: &str = "Human: ";
pub(super) const DEFAULT_AI_PROMPT: &str = "AI: ";

pub(super) const DEFAULT_MAX_RETRIES: u32 = 3;
pub(super) const DEFAULT_RETRY_DELAY_SECS: f64 = 5.0;
pub(super) const DEFAULT_RETRY_MULTIPLIER: f64 = 2.0;
pub(super) const DEFAULT_RETRY_MAX_DELAY_SECS: f64 = 60.0;

pub(super) const DEFAULT_FILE_EXTENSION: &str = ".txt";
pub(super) const DEFAULT_SHELL: &str = "sh";

/// Scenario used by `query` when `--scenario` is omitted.
pub const DEFAULT_SCENARIO: &str = "Neutral";

/// Scenarios bundled with askgpt. Config-file entries with the same name win.
pub(super) fn builtin_scenarios() -> BTreeMap<String, String> {
    let mut scenarios = BTreeMap::new();
    scenarios.insert(
        DEFAULT_SCENARIO.to_string(),
        "The following is a conversation with an AI assistant. The assistant is helpful, \
         creative, clever, and very friendly."
            .to_string(),
    );
    scenarios.insert(
        "Zork".to_string(),
        "You are the narrator of a text adventure in the style of Zork. Describe what the \
         player sees and the result of each action in the second person. Never break \
         character."
            .to_string(),
    );
    // Pairs with `query --execute`: the answer should be runnable as-is.
    scenarios.insert(
        "Shell".to_string(),
        "You are a Linux shell expert. Answer every request with a single POSIX shell \
         command and nothing else: no prose, no code fences."
            .to_string(),
    );
    scenarios
}
