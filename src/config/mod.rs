//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`ASKGPT_API_KEY`, `ASKGPT_BASE_URL`,
//!    `ASKGPT_MODEL`, `ASKGPT_API_TIMEOUT_SECS`)
//! 2. TOML file specified via `--config`
//! 3. `./askgpt.toml` in the current directory
//! 4. `$ASKGPT_CONFIG_DIR/askgpt.toml`, else `$XDG_CONFIG_HOME/askgpt/askgpt.toml`
//!    (or `~/.config/askgpt/askgpt.toml`)
//! 5. Built-in defaults
//!
//! The resolved [`Config`] is passed explicitly to every component; there is
//! no process-wide config state.

mod credentials;
mod defaults;
mod env;
mod init;
mod loader;
mod sources;
mod types;

pub use credentials::{credentials_path, save_credentials, Credentials};
pub use defaults::DEFAULT_SCENARIO;
pub use init::{config_root_dir, default_config_dir, ensure_default_global_config};
pub use loader::load_config;
pub use types::{
    ApiConfig, Config, DisplayConfig, ExecConfig, QueryConfig, RetryConfig, StorageConfig,
};

use crate::error::ConfigError;

/// Render the effective configuration as TOML (`show config`).
///
/// The API key is never included.
pub fn render_config_toml(config: &Config) -> Result<String, ConfigError> {
    toml::to_string_pretty(config)
        .map_err(|e| ConfigError::Invalid(format!("failed to render config: {e}")))
}
