//! Local persistence for bird records and their photos.
//!
//! Each user has their own directory under the storage root:
//!
//! ```text
//! <root>/<user>/
//!   records.sqlite       # One row per bird record
//!   photos/<sha256>.zst  # zstd-compressed photo bytes, keyed by content hash
//! ```

mod photos;
mod records;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;
use uuid::Uuid;

use crate::identity;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("record not found: {0}")]
    RecordNotFound(Uuid),

    #[error("invalid user: {0}")]
    InvalidUser(String),

    #[error("not a supported image (JPEG, PNG, GIF or WebP): {0}")]
    NotAnImage(String),

    #[error("photo not found: {0}")]
    PhotoNotFound(String),

    #[error("corrupt data: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS records (
        id        TEXT PRIMARY KEY,
        name      TEXT NOT NULL,
        photo     TEXT,
        saved_at  TEXT NOT NULL,
        document  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS records_photo ON records (photo);
";

/// Local file-based storage for per-user record collections.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory holding one user's records and photos.
    fn user_dir(&self, user: &str) -> Result<PathBuf> {
        identity::validate_user(user).map_err(StorageError::InvalidUser)?;
        Ok(self.root.join(user))
    }

    /// Opens the user's database, creating it and its schema on first use.
    fn open_db(&self, user: &str) -> Result<Connection> {
        let dir = self.user_dir(user)?;
        fs::create_dir_all(&dir)?;
        let conn = Connection::open(dir.join("records.sqlite"))?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }

    fn photos_dir(&self, user: &str) -> Result<PathBuf> {
        Ok(self.user_dir(user)?.join("photos"))
    }
}
