//! File-backed session store and the in-memory session context.
//!
//! The store is the only place session state touches disk: the logged-in
//! user (`user.json`) and per-sale client extras (`sale-extra-{id}.json`).
//! Writes go to a temp file in the same directory and are persisted over the
//! target, so an interrupted write never leaves a half-written file behind.

use crate::config;
use crate::error::Result;
use crate::models::{SaleExtra, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const USER_FILE: &str = "user.json";
const SALE_EXTRA_PREFIX: &str = "sale-extra-";

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The session context handed to whatever needs to know who is logged in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    /// Load the session from the store. A missing or corrupt file yields a
    /// logged-out session.
    pub fn load(store: &SessionStore) -> Self {
        Self {
            user: store.load_user(),
        }
    }

    /// Write the session back to the store, removing the user file when
    /// logged out.
    pub fn save(&self, store: &SessionStore) -> Result<()> {
        match &self.user {
            Some(user) => store.save_user(user),
            None => store.clear_user(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// JSON key-value files in a session directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Directory where session files are stored.
    pub dir: PathBuf,
}

impl SessionStore {
    /// Open a store, creating the directory if needed.
    ///
    /// If `dir` is `None`, uses [`config::default_session_dir`].
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_session_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn load_user(&self) -> Option<User> {
        self.read(USER_FILE)
    }

    pub fn save_user(&self, user: &User) -> Result<()> {
        self.write(USER_FILE, user)?;
        info!(user_id = user.id, role = %user.role, "session saved");
        Ok(())
    }

    pub fn clear_user(&self) -> Result<()> {
        self.remove(USER_FILE)
    }

    pub fn save_sale_extra(&self, sale_id: i64, extra: &SaleExtra) -> Result<()> {
        self.write(&sale_extra_file(sale_id), extra)
    }

    pub fn load_sale_extra(&self, sale_id: i64) -> Option<SaleExtra> {
        self.read(&sale_extra_file(sale_id))
    }

    pub fn remove_sale_extra(&self, sale_id: i64) -> Result<()> {
        self.remove(&sale_extra_file(sale_id))
    }

    /// Remove all session files and recreate the directory.
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read and parse a file; corrupt files are deleted and read as absent.
    fn read<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.path(name);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt session file, removing");
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.persist(self.path(name))?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        remove_if_exists(&self.path(name))
    }
}

fn sale_extra_file(sale_id: i64) -> String {
    format!("{SALE_EXTRA_PREFIX}{sale_id}.json")
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
