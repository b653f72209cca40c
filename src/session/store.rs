//! Persistent credential storage

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Canonical key for the bearer token
pub const TOKEN_KEY: &str = "token";
/// Key for the display username
pub const USER_KEY: &str = "user";
/// Token key written by older clients; migrated on startup
pub const LEGACY_TOKEN_KEY: &str = "access_token";
/// Refresh token older clients stored but never used
pub const LEGACY_REFRESH_KEY: &str = "refresh_token";

/// A flat string key-value namespace that survives restarts.
///
/// Each key is written independently; callers must not rely on two keys
/// being updated together.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given pairs
    pub fn with_entries<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut entries = store.lock();
            for (k, v) in pairs {
                entries.insert(k.to_string(), v.to_string());
            }
        }
        store
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// JSON-file backed store, the on-disk analogue of browser local storage
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    guard: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return BTreeMap::new(),
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(
                "Ignoring unreadable credential file {}: {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let mut file = open_private(&tmp)?;
        file.write_all(serde_json::to_string_pretty(entries)?.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> bool) -> Result<()> {
        let _lock = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_all();
        if f(&mut entries) {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Truncating open readable only by the owner; the file holds a bearer token
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;

    // mode() only applies on creation; a leftover temp file keeps its bits
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _lock = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        self.read_all().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            let previous = entries.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(other.get(TOKEN_KEY).as_deref(), Some("abc"));
        other.remove(TOKEN_KEY).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::new(&path);
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(USER_KEY, "alice").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(reopened.get(USER_KEY).as_deref(), Some("alice"));
    }

    #[test]
    fn test_file_store_remove_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(USER_KEY, "alice").unwrap();

        store.remove(TOKEN_KEY).unwrap();

        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(USER_KEY).as_deref(), Some("alice"));
    }

    #[test]
    fn test_file_store_corrupt_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY), None);

        store.set(TOKEN_KEY, "fresh").unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(path.with_extension("json.tmp"), "stale").unwrap();
        fs::set_permissions(
            path.with_extension("json.tmp"),
            fs::Permissions::from_mode(0o644),
        )
        .unwrap();

        let store = FileStore::new(&path);
        store.set(TOKEN_KEY, "abc").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_store_remove_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);

        store.remove(TOKEN_KEY).unwrap();
        assert!(!path.exists());
    }
}
