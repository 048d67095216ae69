//! String key-value storage for desktop state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use webtop_types::error::{Result, WebtopError};

/// Last text edited in the text editor.
pub const EDITOR_TEXT_KEY: &str = "linuxos-texteditor";
/// File name of the last edited document.
pub const EDITOR_FILENAME_KEY: &str = "linuxos-texteditor-filename";
/// JSON settings bundle.
pub const SETTINGS_KEY: &str = "linuxos-settings";

/// Flat string-to-string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// All keys, sorted.
    fn keys(&self) -> Vec<String>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Store persisted as one JSON object file.
///
/// Every mutation rewrites the file through a temporary sibling and a
/// rename, so a crash leaves either the old or the new contents.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open or create the store at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let entries = match fs::read_to_string(path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                WebtopError::Storage(format!("{}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("storage: opened {} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.keys(), vec!["a", "b"]);
        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set(EDITOR_TEXT_KEY, "hello\nworld").unwrap();
            store.set(EDITOR_FILENAME_KEY, "notes.txt").unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(EDITOR_TEXT_KEY).as_deref(), Some("hello\nworld"));
        assert_eq!(store.get(EDITOR_FILENAME_KEY).as_deref(), Some("notes.txt"));
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("never-set").unwrap();
        assert!(FileStore::open(&path).unwrap().keys().is_empty());
    }

    #[test]
    fn empty_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "").unwrap();
        assert!(FileStore::open(&path).unwrap().keys().is_empty());
    }

    #[test]
    fn corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();
        match FileStore::open(&path) {
            Err(WebtopError::Storage(msg)) => assert!(msg.contains("state.json")),
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
