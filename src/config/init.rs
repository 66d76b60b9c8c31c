//! Config-path helpers and default config initialization.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
use super::env::ENV_CONFIG_DIR;

/// Platform config root (`$XDG_CONFIG_HOME`, else `~/.config`).
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

/// Resolve the askgpt config directory from `ASKGPT_CONFIG_DIR` or the
/// platform config root.
pub(super) fn resolve_config_dir<FEnv, FRoot>(
    env_lookup: &FEnv,
    config_root: &FRoot,
) -> Result<PathBuf, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(dir) = env_lookup(ENV_CONFIG_DIR).filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(dir.trim()));
    }
    config_root()
        .map(|root| root.join(APP_DIR_NAME))
        .ok_or_else(|| {
            ConfigError::Invalid(format!(
                "unable to resolve a config directory; set {ENV_CONFIG_DIR}"
            ))
        })
}

/// Default global config directory (`~/.config/askgpt`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    resolve_config_dir(&|name| std::env::var(name).ok(), &config_root_dir)
}

/// Ensure `<config_dir>/askgpt.toml` exists, writing the template if absent.
///
/// Returns the config path.
pub fn ensure_default_global_config() -> Result<PathBuf, ConfigError> {
    let path = default_config_dir()?.join(CONFIG_FILE_NAME);
    ensure_config_at_path(&path)?;
    Ok(path)
}

pub(super) fn ensure_config_at_path(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // create_new avoids clobbering an existing file if another process won the race.
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())?;
            tracing::info!(path = %path.display(), "wrote default config");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(ConfigError::Io(e)),
    }
}
