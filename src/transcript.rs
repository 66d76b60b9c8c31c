//! Plain-text transcripts, one append-only file per subject.
//!
//! Files live at `<conversations_dir>/<sanitized subject><extension>` and
//! hold alternating `<user marker>...` / `<ai marker>...` lines. A missing
//! file is an empty conversation.

use crate::config::Config;
use crate::error::StoreError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A filesystem-safe conversation name.
///
/// ASCII alphanumerics, `-` and `_` are kept; every other character becomes
/// `_`. Construction fails when nothing remains after trimming.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subject(String);

impl Subject {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptySubject);
        }
        Ok(Self(sanitize_name(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Filesystem-backed transcript storage.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    dir: PathBuf,
    extension: String,
}

impl TranscriptStore {
    /// `extension` is appended verbatim, so include the leading dot.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.conversations_dir(),
            config.storage.file_extension.clone(),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, subject: &Subject) -> PathBuf {
        self.dir.join(format!("{}{}", subject.as_str(), self.extension))
    }

    pub fn exists(&self, subject: &Subject) -> bool {
        self.path_for(subject).is_file()
    }

    /// Full transcript text, or `""` when nothing has been saved yet.
    pub fn read(&self, subject: &Subject) -> Result<String, StoreError> {
        let path = self.path_for(subject);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(StoreError::Io(path, e)),
        }
    }

    /// Append `text` and a newline, creating the file (and directory) if needed.
    pub fn append(&self, subject: &Subject, text: &str) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let path = self.path_for(subject);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::Io(path.clone(), e))?;
        // One write call per line keeps each turn contiguous on disk.
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        file.write_all(line.as_bytes())
            .map_err(|e| StoreError::Io(path.clone(), e))?;
        tracing::debug!(subject = %subject, bytes = line.len(), "appended transcript line");
        Ok(())
    }

    /// Overwrite the whole transcript (used by `edit`).
    pub fn replace(&self, subject: &Subject, content: &str) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let path = self.path_for(subject);
        // Temp-then-rename so an interrupted write leaves the old transcript intact.
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, content).map_err(|e| StoreError::Io(tmp_path.clone(), e))?;
        fs::rename(&tmp_path, &path).map_err(|e| StoreError::Io(path.clone(), e))?;
        tracing::debug!(subject = %subject, "replaced transcript");
        Ok(())
    }

    /// Saved subject names, sorted. A missing directory yields an empty list.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(self.dir.clone(), e)),
        };
        let mut subjects = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io(self.dir.clone(), e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(stem) = name.strip_suffix(self.extension.as_str()) {
                if !stem.is_empty() {
                    subjects.push(stem.to_string());
                }
            }
        }
        subjects.sort();
        Ok(subjects)
    }

    /// Remove one transcript. Returns `false` when it did not exist.
    pub fn delete(&self, subject: &Subject) -> Result<bool, StoreError> {
        let removed = remove_if_present(&self.path_for(subject))?;
        if removed {
            tracing::info!(subject = %subject, "deleted transcript");
        }
        Ok(removed)
    }

    /// Remove every listed transcript file; returns how many were deleted.
    ///
    /// Files are removed by their on-disk name, so names that would sanitize
    /// differently (e.g. `my chat.txt`) are removed too.
    pub fn delete_all(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for name in self.list()? {
            let path = self.dir.join(format!("{name}{}", self.extension));
            if remove_if_present(&path)? {
                removed += 1;
            }
        }
        tracing::info!(removed, "deleted all transcripts");
        Ok(removed)
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io(self.dir.clone(), e))
    }
}

fn remove_if_present(path: &Path) -> Result<bool, StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::Io(path.to_path_buf(), e)),
    }
}
