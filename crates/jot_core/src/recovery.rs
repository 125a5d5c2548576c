//! Crash-recovery snapshot files, one per window label.

use crate::error::{HostError, HostResult};
use crate::text::is_blank;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Location of the recovery snapshot for a single window.
///
/// Snapshots are plain UTF-8 files. Whitespace-only content is never stored:
/// writing it removes the file instead, so an empty editor never triggers a
/// recovery prompt on the next start.
#[derive(Debug, Clone)]
pub struct RecoveryStore {
    dir: PathBuf,
    path: PathBuf,
}

/// Keep only characters that are safe in a file name.
///
/// # Returns
/// `label` restricted to ASCII alphanumerics, `_` and `-`.
pub fn sanitize_window_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn recovery_file_name(window_label: &str) -> String {
    let sanitized = sanitize_window_label(window_label);
    if sanitized.is_empty() || sanitized == "main" {
        "recovery_main.txt".to_string()
    } else {
        format!("recovery_{}.txt", sanitized)
    }
}

impl RecoveryStore {
    /// Build a store rooted at `dir` for the window named `window_label`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>, window_label: &str) -> Self {
        let dir = dir.into();
        let path = dir.join(recovery_file_name(window_label));
        Self { dir, path }
    }

    /// Path of the snapshot file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `content` as the current snapshot.
    ///
    /// Whitespace-only content removes any existing snapshot. Non-empty content
    /// is written to a uniquely named sibling temp file and renamed into place.
    /// Concurrent writers never share a temp path, and a crash mid-write never
    /// leaves a truncated snapshot behind.
    ///
    /// # Errors
    /// Returns [`HostError::Recovery`] when the directory cannot be created or
    /// the file cannot be written.
    pub fn write(&self, content: &str) -> HostResult<()> {
        if is_blank(content) {
            if self.clear()? {
                debug!(path = %self.path.display(), "removed empty recovery snapshot");
            }
            return Ok(());
        }

        fs::create_dir_all(&self.dir).map_err(|err| {
            HostError::Recovery(format!("Failed to create recovery directory: {}", err))
        })?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|err| {
            HostError::Recovery(format!("Failed to create recovery temp file: {}", err))
        })?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| {
                HostError::Recovery(format!("Failed to write recovery snapshot: {}", err))
            })?;
        tmp.persist(&self.path).map_err(|err| {
            HostError::Recovery(format!("Failed to commit recovery snapshot: {}", err.error))
        })?;
        Ok(())
    }

    /// Load the stored snapshot, if any.
    ///
    /// Unreadable files are logged and reported as missing; a recovery check
    /// must never fail startup.
    ///
    /// # Returns
    /// `Some(content)` when a non-blank snapshot exists.
    pub fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) if is_blank(&content) => {
                debug!(path = %self.path.display(), "recovery snapshot exists but is empty");
                None
            }
            Ok(content) => {
                debug!(
                    path = %self.path.display(),
                    chars = content.chars().count(),
                    "found recovery snapshot"
                );
                Some(content)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read recovery snapshot");
                None
            }
        }
    }

    /// Delete the snapshot file.
    ///
    /// # Returns
    /// `true` when a file was removed, `false` when none existed.
    ///
    /// # Errors
    /// Returns [`HostError::Recovery`] when the file exists but cannot be removed.
    pub fn clear(&self) -> HostResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(HostError::Recovery(format!(
                "Failed to clear recovery file: {}",
                err
            ))),
        }
    }
}
