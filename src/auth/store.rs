//! Session persistence
//!
//! The stand-in for browser local storage: one JSON document holding the
//! signed-in session, or nothing.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::auth::models::Session;
use crate::error::{AdminError, Result};

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Session kept in a JSON file on disk
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AdminError::Session(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if !session.token.is_empty() => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(e) => {
                // A corrupt file is treated as signed out rather than fatal.
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AdminError::Session(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let body = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, body).map_err(|e| {
            AdminError::Session(format!("failed to write {}: {e}", self.path.display()))
        })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AdminError::Session(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-process store, used by tests and short-lived embeddings
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.inner.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.lock() = None;
        Ok(())
    }
}
