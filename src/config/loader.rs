//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::credentials::{credentials_path, Credentials};
use super::defaults::builtin_scenarios;
use super::env::{apply_runtime_env_overrides, resolve_api_key};
use super::init::{config_root_dir, resolve_config_dir};
use super::sources::{read_config_text_with_sources, ConfigSource};
use super::Config;

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let config_dir = resolve_config_dir(&env_lookup, &config_root)?;
    let (config_text, source) =
        read_config_text_with_sources(path_override, &config_dir, &read_file)?;
    match &source {
        ConfigSource::Explicit(path) | ConfigSource::Global(path) => {
            tracing::debug!(path = %path.display(), "loaded config file");
        }
        ConfigSource::Local => tracing::debug!("loaded ./askgpt.toml"),
        ConfigSource::BuiltInDefaults => tracing::debug!("no config file found; using defaults"),
    }

    let mut config: Config = toml::from_str(&config_text)?;
    config.config_dir = config_dir;
    for (name, bootstrap) in builtin_scenarios() {
        config.scenarios.entry(name).or_insert(bootstrap);
    }

    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    let stored = read_file(&credentials_path(&config.config_dir))
        .ok()
        .and_then(|text| Credentials::parse(&text));
    resolve_api_key(&mut config, &env_lookup, stored);
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.query.user_prompt.is_empty() || config.query.ai_prompt.is_empty() {
        return Err(ConfigError::Invalid(
            "query.user_prompt and query.ai_prompt must not be empty".into(),
        ));
    }
    if config.query.user_prompt == config.query.ai_prompt {
        return Err(ConfigError::Invalid(
            "query.user_prompt and query.ai_prompt must differ".into(),
        ));
    }
    let retry = &config.retry;
    if !(retry.retry_delay >= 0.0 && retry.retry_delay.is_finite()) {
        return Err(ConfigError::Invalid(format!(
            "retry.retry_delay must be a non-negative number of seconds, got {}",
            retry.retry_delay
        )));
    }
    if !(retry.retry_multiplier >= 1.0 && retry.retry_multiplier.is_finite()) {
        return Err(ConfigError::Invalid(format!(
            "retry.retry_multiplier must be at least 1.0, got {}",
            retry.retry_multiplier
        )));
    }
    if !(retry.retry_max_delay >= 0.0 && retry.retry_max_delay.is_finite()) {
        return Err(ConfigError::Invalid(format!(
            "retry.retry_max_delay must be a non-negative number of seconds, got {}",
            retry.retry_max_delay
        )));
    }
    Ok(())
}
