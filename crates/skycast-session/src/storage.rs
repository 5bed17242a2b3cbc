//! Key-value persistence capability.
//!
//! The dashboard treats persistent storage as an injected byte store;
//! what backs it is the embedder's choice. `FileStore` keeps one file
//! per key under a directory, `MemoryStore` backs tests and ephemeral
//! sessions.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Byte-oriented key-value store.
pub trait KeyValueStore {
    /// Returns the stored bytes, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One file per key under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read stored entry"),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create storage directory")?;
        std::fs::write(self.path_for(key), value).context("Failed to write stored entry")?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove stored entry"),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry, e.g. persisted state from a previous session.
    pub fn with_entry(key: &str, value: &[u8]) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_vec());
        store
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
