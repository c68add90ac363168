//! Session persistence
//!
//! The signed-in session is stored as JSON between invocations. Commands load
//! it once and pass it along explicitly.

use anyhow::{Context, Result, bail};
use bca_core::domain::session::Session;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session, `None` when nobody is signed in
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;
        let session = serde_json::from_str(&data)
            .with_context(|| format!("Corrupt session file {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Loads the stored session or fails with a hint to sign in
    pub fn require(&self) -> Result<Session> {
        match self.load()? {
            Some(session) => Ok(session),
            None => bail!("Not signed in. Run `bca login` first."),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    /// Removes the stored session; returns whether one existed
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove session file {}", self.path.display()))?;
        Ok(true)
    }
}
