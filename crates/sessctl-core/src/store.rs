//! Durable session storage.
//!
//! Stores the session token and the encoded user record in
//! `<home>/session.json` with restricted permissions (0600). Both entries are
//! plain strings: the token is stored raw and the user record is stored as a
//! JSON-encoded string, mirroring the two entries the session controller
//! owns. A file with only one of the two entries counts as no session.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// On-disk document. Both fields optional so a half-written or manually
/// edited file can still be read.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

/// A complete stored session: raw token plus the JSON-encoded user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub user: String,
}

/// File-backed session store. The session controller is its only writer.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by a specific file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the standard `<home>/session.json` location.
    pub fn at_default() -> Self {
        Self::new(paths::session_path())
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the stored session.
    ///
    /// Returns `None` when the file is missing, when either entry is absent,
    /// or when the file itself is not valid JSON (a corrupt file is treated
    /// as no session rather than an error).
    pub fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let file: SessionFile = match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "session file is corrupt");
                return Ok(None);
            }
        };

        match (file.token, file.user) {
            (Some(token), Some(user)) => Ok(Some(StoredSession { token, user })),
            _ => Ok(None),
        }
    }

    /// Saves both session entries, creating the parent directory if needed.
    /// The file is written with 0600 permissions on Unix.
    pub fn save(&self, token: &str, user: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let file = SessionFile {
            token: Some(token.to_string()),
            user: Some(user.to_string()),
        };
        let contents =
            serde_json::to_string_pretty(&file).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut out = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            out.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the durable session. Idempotent: a missing file is fine.
    /// Returns true if a session file was actually removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}
