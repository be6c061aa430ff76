//! Durable single-slot persistence for the session token.
//! One token, one slot. Written on successful login, removed on logout or
//! when a restored token turns out to be dead.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;

pub trait TokenStore: Send + Sync {
    /// Previously saved token, if any. Unreadable or empty slots count as absent.
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<()>;
    /// Remove the slot. Removing an already-empty slot is fine.
    fn clear(&self);
}

/// File-backed store: the token is the file's entire contents.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("create token directory")?;
        }
        fs::write(&self.path, token).context("write token file")
    }

    fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// In-memory store for tests and embedders without a filesystem slot.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.slot.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.slot.lock() = None;
    }
}
