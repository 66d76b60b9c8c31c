//! Environment overrides and API key resolution.
//!
//! `ASKGPT_*` variables take precedence over file values.

use crate::error::ConfigError;

use super::credentials::Credentials;
use super::Config;

pub(super) const ENV_API_KEY: &str = "ASKGPT_API_KEY";
pub(super) const ENV_BASE_URL: &str = "ASKGPT_BASE_URL";
pub(super) const ENV_MODEL: &str = "ASKGPT_MODEL";
pub(super) const ENV_API_TIMEOUT_SECS: &str = "ASKGPT_API_TIMEOUT_SECS";
pub(super) const ENV_CONFIG_DIR: &str = "ASKGPT_CONFIG_DIR";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup(ENV_BASE_URL)) {
        config.api.base_url = url;
    }
    if let Some(model) = non_empty(env_lookup(ENV_MODEL)) {
        config.query.model = model;
    }
    if let Some(timeout) = non_empty(env_lookup(ENV_API_TIMEOUT_SECS)) {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_API_TIMEOUT_SECS} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.api.timeout_secs = parsed.max(1);
    }
    Ok(())
}

/// Fill `config.api.api_key` (and the organization, when unset) from the
/// first available source: `ASKGPT_API_KEY`, the file's `api_key`, the
/// variable named by `api_key_env`, then the stored credentials.
pub(super) fn resolve_api_key<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
    stored: Option<Credentials>,
) where
    FEnv: Fn(&str) -> Option<String>,
{
    let from_env = non_empty(env_lookup(ENV_API_KEY));
    let from_file = non_empty(Some(config.api.api_key.clone()));
    let from_named_env = config
        .api
        .api_key_env
        .as_deref()
        .and_then(|name| non_empty(env_lookup(name)));

    if let Some(key) = from_env.or(from_file).or(from_named_env) {
        config.api.api_key = key;
        return;
    }
    if let Some(credentials) = stored {
        config.api.api_key = credentials.api_key;
        if config.api.organization.is_none() {
            config.api.organization = credentials.organization;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
