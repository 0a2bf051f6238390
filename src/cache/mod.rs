//! Persistent local cache holding the last-known-good value of each
//! synced collection.
//!
//! One JSON file per key under a root directory. Reads never fail outward:
//! a missing or unreadable file yields the caller-supplied default, trading
//! correctness for availability. Every write is immediately durable via a
//! temp-file-and-rename; redundant writes are accepted.

use crate::core::{Result, SyncError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Durable key-value store scoped by a string key.
#[derive(Debug, Clone)]
pub struct LocalCache {
    root: PathBuf,
}

impl LocalCache {
    /// Opens a cache rooted at `root`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| SyncError::CacheIo(format!("Failed to create cache directory: {e}")))?;
        Ok(Self { root })
    }

    /// Reads the value stored under `key`, or `default` when nothing is
    /// stored or the stored text does not deserialize.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return default,
            Err(e) => {
                log::warn!("cache read failed for '{key}': {e}");
                return default;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("cache entry '{key}' did not deserialize, using default: {e}");
                default
            }
        }
    }

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// The value lands on disk before this returns. Uses a temp file in the
    /// cache directory plus rename so a crash mid-write cannot corrupt the
    /// previous entry.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let serialized = serde_json::to_vec_pretty(value)?;

        let mut temp = tempfile::NamedTempFile::new_in(&self.root)
            .map_err(|e| SyncError::CacheIo(format!("Failed to create temp file: {e}")))?;
        temp.write_all(&serialized)
            .map_err(|e| SyncError::CacheIo(format!("Failed to write cache entry: {e}")))?;
        temp.flush()
            .map_err(|e| SyncError::CacheIo(format!("Failed to flush cache entry: {e}")))?;
        temp.persist(&path)
            .map_err(|e| SyncError::CacheIo(format!("Failed to persist cache entry: {e}")))?;
        Ok(())
    }

    /// Removes the entry stored under `key`, if any.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyncError::CacheIo(format!("Failed to remove cache entry: {e}"))),
        }
    }

    /// True when an entry exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are shared process-wide by name convention, one per record
        // category. Sanitize so any convention maps to a valid file name.
        let sanitized: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{sanitized}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_key_returns_default() {
        let dir = TempDir::new().unwrap();
        let cache = LocalCache::open(dir.path()).unwrap();

        let value: Vec<String> = cache.read("user-vehicles", vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = LocalCache::open(dir.path()).unwrap();

        cache
            .write("user-education", &vec!["BSc".to_string(), "MSc".to_string()])
            .unwrap();
        let value: Vec<String> = cache.read("user-education", Vec::new());
        assert_eq!(value, vec!["BSc".to_string(), "MSc".to_string()]);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let cache = LocalCache::open(dir.path()).unwrap();
            cache.write("user-personal-info", &42u32).unwrap();
        }
        let cache = LocalCache::open(dir.path()).unwrap();
        let value: u32 = cache.read("user-personal-info", 0);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let cache = LocalCache::open(dir.path()).unwrap();
        cache.write("user-documents", &vec![1u32, 2, 3]).unwrap();

        std::fs::write(dir.path().join("user-documents.json"), "{not json").unwrap();

        let value: Vec<u32> = cache.read("user-documents", Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_overwrites_previous_value() {
        let dir = TempDir::new().unwrap();
        let cache = LocalCache::open(dir.path()).unwrap();

        cache.write("key", &1u32).unwrap();
        cache.write("key", &2u32).unwrap();
        assert_eq!(cache.read::<u32>("key", 0), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let cache = LocalCache::open(dir.path()).unwrap();

        cache.write("key", &1u32).unwrap();
        cache.remove("key").unwrap();
        cache.remove("key").unwrap();
        assert!(!cache.contains("key"));
    }

    #[test]
    fn test_keys_with_odd_characters_get_sanitized() {
        let dir = TempDir::new().unwrap();
        let cache = LocalCache::open(dir.path()).unwrap();

        cache.write("user/medical:records", &7u32).unwrap();
        assert_eq!(cache.read::<u32>("user/medical:records", 0), 7);
    }
}
