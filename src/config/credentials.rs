//! Stored API credentials (`<config_dir>/credentials`).
//!
//! The file holds a single `api_key:organization` line; the organization part
//! may be empty.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::CREDENTIALS_FILE_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub organization: Option<String>,
}

impl Credentials {
    /// Parse the on-disk `key:org` form. Blank keys yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let line = text.lines().next()?.trim();
        let (key, org) = match line.split_once(':') {
            Some((key, org)) => (key.trim(), org.trim()),
            None => (line, ""),
        };
        if key.is_empty() {
            return None;
        }
        Some(Self {
            api_key: key.to_string(),
            organization: (!org.is_empty()).then(|| org.to_string()),
        })
    }

    fn serialize(&self) -> String {
        format!(
            "{}:{}",
            self.api_key,
            self.organization.as_deref().unwrap_or_default()
        )
    }
}

pub fn credentials_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CREDENTIALS_FILE_NAME)
}

/// Write credentials with owner-only permissions, replacing any previous file.
pub fn save_credentials(config_dir: &Path, credentials: &Credentials) -> Result<PathBuf, ConfigError> {
    if credentials.api_key.trim().is_empty() {
        return Err(ConfigError::Invalid("API key must not be empty".into()));
    }
    std::fs::create_dir_all(config_dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(config_dir, std::fs::Permissions::from_mode(0o700));
    }

    let path = credentials_path(config_dir);
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&path)?;
    file.write_all(credentials.serialize().as_bytes())?;
    #[cfg(unix)]
    {
        // `mode` only applies on creation; an older file keeps its bits.
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
    }
    tracing::debug!(path = %path.display(), "saved credentials");
    Ok(path)
}
