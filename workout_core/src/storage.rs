//! Key-value persistence for the progress store.
//!
//! The store is written as a single JSON value under [`STORAGE_KEY`]. The
//! backend is injected so tests (and embedders) can swap the file system for
//! memory.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key the whole progress store is saved under
pub const STORAGE_KEY: &str = "workout-tracker-v1";

/// Synchronous key-value storage
pub trait StorageBackend {
    /// Read a value; `Ok(None)` when the key has never been written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key inside a directory, with file locking
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that backs `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
        Ok(Some(contents))
    }

    /// Atomically writes the value by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        let temp = NamedTempFile::new_in(&self.dir)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} to {:?}", key, path);
        Ok(())
    }
}

/// In-memory backend
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with one value
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut backend = Self::new();
        backend.values.insert(key.to_string(), value.into());
        backend
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(temp_dir.path());

        assert_eq!(backend.read(STORAGE_KEY).unwrap(), None);

        backend.write(STORAGE_KEY, "{\"a\":1}").unwrap();
        assert_eq!(backend.read(STORAGE_KEY).unwrap().as_deref(), Some("{\"a\":1}"));

        backend.write(STORAGE_KEY, "{}").unwrap();
        assert_eq!(backend.read(STORAGE_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_backend_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let mut backend = FileBackend::new(&nested);

        backend.write(STORAGE_KEY, "{}").unwrap();
        assert!(nested.join("workout-tracker-v1.json").exists());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(temp_dir.path());
        backend.write(STORAGE_KEY, "{}").unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "workout-tracker-v1.json")
            .collect();
        assert!(extras.is_empty(), "Found extras: {:?}", extras);
    }

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::with_value("k", "v");
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("v"));
        assert_eq!(backend.read("missing").unwrap(), None);
        backend.write("k", "w").unwrap();
        assert_eq!(backend.get("k"), Some("w"));
    }
}
