//! Durable key-value storage backing the session identities.

use super::SessionError;
use log::*;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// String-keyed storage that survives restarts.
///
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// Store kept as a flat JSON object on disk, rewritten on every mutation.
///
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at the given path. A missing file is an empty store;
    /// an unreadable or corrupt one is logged and treated as empty.
    ///
    pub fn open(path: &Path) -> FileStore {
        let entries = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring corrupt session store {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(
                    "{}",
                    SessionError::ReadFailed {
                        path: path.to_path_buf(),
                        source: e,
                    }
                );
                BTreeMap::new()
            }
        };
        FileStore {
            path: path.to_path_buf(),
            entries,
        }
    }

    /// Returns the file backing the store.
    ///
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SessionError> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        let write_failed = |source| SessionError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(write_failed)?;
            }
        }
        let mut file = fs::File::create(&self.path).map_err(write_failed)?;
        write!(file, "{}", content).map_err(write_failed)?;
        file.flush().map_err(write_failed)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Volatile store, used when nothing should touch the disk.
///
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Returns a store pre-filled with the given entries.
    ///
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        MemoryStore {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("schemes-tui-{}-{}", name, std::process::id()))
            .join("session.json")
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("userToken"), None);
        store.set("userToken", "abc").unwrap();
        store.set("adminToken", "xyz").unwrap();
        store.remove("adminToken").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("userToken").as_deref(), Some("abc"));
        assert_eq!(reopened.get("adminToken"), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_store_treats_corrupt_file_as_empty() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("userToken"), None);
        store.set("userToken", "abc").unwrap();
        assert_eq!(FileStore::open(&path).get("userToken").as_deref(), Some("abc"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::with_entries(&[("a", "1")]);
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
    }
}
