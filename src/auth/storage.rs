//! Token persistence across two storage areas. A single `TokenStore` owns both
//! the session area and the persistent area so the pair can only ever live in
//! one of them: every save clears the other area first.
//!
//! Areas follow web-storage semantics (string keys, string values). The
//! in-memory area stands in for session storage; the file area writes one
//! `<key>.json` file per key with owner-only permissions on unix.

use crate::auth::{
    error::StorageError,
    types::{StorageScope, TokenPair, TOKEN_STORAGE_KEY},
};
use std::{
    collections::HashMap,
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, instrument, warn};

/// Key/value storage area.
pub trait StorageArea: Send {
    /// # Errors
    /// Returns an error if the area cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns an error if the value cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if an existing value cannot be removed.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Process-lifetime storage area.
#[derive(Clone, Debug, Default)]
pub struct MemoryArea {
    items: HashMap<String, String>,
}

impl MemoryArea {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageArea for MemoryArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Directory-backed storage area, one `<key>.json` file per key.
#[derive(Clone, Debug)]
pub struct FileArea {
    dir: PathBuf,
}

impl FileArea {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageArea for FileArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.item_path(key);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)
                .map_err(|source| StorageError::Io {
                    path: path.clone(),
                    source,
                })?;
            file.write_all(value.as_bytes())
                .map_err(|source| StorageError::Io { path, source })?;
        }

        #[cfg(not(unix))]
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&path)
                .map_err(|source| StorageError::Io {
                    path: path.clone(),
                    source,
                })?;
            file.write_all(value.as_bytes())
                .map_err(|source| StorageError::Io { path, source })?;
        }

        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.item_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// Holds the token pair in exactly one of two storage areas.
pub struct TokenStore {
    session: Box<dyn StorageArea>,
    persistent: Box<dyn StorageArea>,
    key: String,
}

impl TokenStore {
    pub fn new(session: impl StorageArea + 'static, persistent: impl StorageArea + 'static) -> Self {
        Self {
            session: Box::new(session),
            persistent: Box::new(persistent),
            key: TOKEN_STORAGE_KEY.to_string(),
        }
    }

    /// Both areas in memory, nothing outlives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryArea::new(), MemoryArea::new())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read access to one area, for inspection.
    #[must_use]
    pub fn area(&self, scope: StorageScope) -> &dyn StorageArea {
        match scope {
            StorageScope::Session => self.session.as_ref(),
            StorageScope::Persistent => self.persistent.as_ref(),
        }
    }

    /// Writes `tokens` to `scope` after clearing the other area, so a failed
    /// write never leaves two pairs behind.
    ///
    /// # Errors
    /// Returns an error if the pair cannot be encoded or either area fails.
    #[instrument(skip(self, tokens))]
    pub fn save(&mut self, tokens: &TokenPair, scope: StorageScope) -> Result<(), StorageError> {
        let payload = serde_json::to_string(tokens)?;
        let Self {
            session,
            persistent,
            key,
        } = self;

        let (target, other) = match scope {
            StorageScope::Session => (session, persistent),
            StorageScope::Persistent => (persistent, session),
        };

        other.remove_item(key)?;
        target.set_item(key, &payload)?;

        debug!("token pair stored");

        Ok(())
    }

    /// # Errors
    /// Returns an error if an area cannot be read or holds an invalid pair.
    pub fn load(&self) -> Result<Option<TokenPair>, StorageError> {
        Ok(self.load_scoped()?.map(|(tokens, _)| tokens))
    }

    /// Loads the pair and the scope holding it. Session takes precedence when
    /// both areas are populated; storage is never modified here.
    ///
    /// # Errors
    /// Returns an error if an area cannot be read or holds an invalid pair.
    pub fn load_scoped(&self) -> Result<Option<(TokenPair, StorageScope)>, StorageError> {
        if let Some(raw) = self.session.get_item(&self.key)? {
            if self.persistent.get_item(&self.key)?.is_some() {
                warn!("token pair found in both storage areas, using session");
            }
            let tokens: TokenPair = serde_json::from_str(&raw)?;
            return Ok(Some((tokens, StorageScope::Session)));
        }

        if let Some(raw) = self.persistent.get_item(&self.key)? {
            let tokens: TokenPair = serde_json::from_str(&raw)?;
            return Ok(Some((tokens, StorageScope::Persistent)));
        }

        Ok(None)
    }

    /// Empties both areas. Both removals are attempted even if the first fails.
    ///
    /// # Errors
    /// Returns the first removal error.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), StorageError> {
        let session = self.session.remove_item(&self.key);
        let persistent = self.persistent.remove_item(&self.key);
        session.and(persistent)
    }
}
