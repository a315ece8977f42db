//! KDL file store.
//!
//! Persists the settings namespace as a KDL document with one node per key:
//!
//! ```kdl
//! max-history-size 100
//! history-name "history"
//! track-changes #true
//! ```
//!
//! The store keeps an in-memory snapshot of the file and notifies watchers
//! on every write. [`FileStore::refresh`] re-reads the file and notifies
//! the keys whose on-disk value changed under us, which is how
//! externally-originated edits (another process, a text editor) reach the
//! settings layer. Nodes with names the settings layer does not recognize
//! are carried in the snapshot and preserved across rewrites.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use tracing::warn;

use crate::settings::SettingValue;
use crate::{Error, Result};

use super::backend::{ChangeSink, SettingsStore, WatchId, WatcherSet};

/// A settings store backed by a single KDL file.
pub struct FileStore {
    path: PathBuf,
    snapshot: HashMap<String, SettingValue>,
    watchers: WatcherSet,
}

impl FileStore {
    /// Open the store at `path`, reading the file if it exists. A missing
    /// file is an empty store; an unreadable or unparseable file is an
    /// error (the layer has no degraded mode).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = read_document(&path)?;
        Ok(Self {
            path,
            snapshot,
            watchers: WatcherSet::default(),
        })
    }

    /// The default store location: `~/.config/clipvault/settings.kdl`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clipvault")
            .join("settings.kdl")
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the snapshot back to the file, creating parent directories
    /// on first write. Keys are written in sorted order for stable output.
    fn write_document(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut keys: Vec<&String> = self.snapshot.keys().collect();
        keys.sort();

        let mut doc = KdlDocument::new();
        for key in keys {
            let mut node = KdlNode::new(key.as_str());
            node.push(KdlEntry::new(to_kdl_value(&self.snapshot[key])));
            doc.nodes_mut().push(node);
        }
        doc.autoformat();

        fs::write(&self.path, doc.to_string())?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<SettingValue>> {
        Ok(self.snapshot.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &SettingValue) -> Result<()> {
        self.snapshot.insert(key.to_string(), value.clone());
        self.write_document()?;
        self.watchers.notify(key);
        Ok(())
    }

    fn watch(&mut self, sink: ChangeSink) -> Result<WatchId> {
        Ok(self.watchers.add(sink))
    }

    fn unwatch(&mut self, id: WatchId) {
        self.watchers.remove(id);
    }

    fn refresh(&mut self) -> Result<()> {
        let current = read_document(&self.path)?;

        let mut touched: Vec<String> = Vec::new();
        for (key, value) in &current {
            if self.snapshot.get(key) != Some(value) {
                touched.push(key.clone());
            }
        }
        for key in self.snapshot.keys() {
            if !current.contains_key(key) {
                touched.push(key.clone());
            }
        }

        self.snapshot = current;
        for key in touched {
            self.watchers.notify(&key);
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse the file at `path` into a snapshot. A missing file yields an empty
/// snapshot. Nodes whose first entry is not a representable scalar are
/// skipped with a warning rather than failing the whole store.
fn read_document(path: &Path) -> Result<HashMap<String, SettingValue>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)?;
    let doc: KdlDocument = content
        .parse()
        .map_err(|e| Error::Other(format!("Failed to parse KDL in {}: {}", path.display(), e)))?;

    let mut snapshot = HashMap::new();
    for node in doc.nodes() {
        let name = node.name().value();
        match node.entries().first().map(KdlEntry::value) {
            Some(value) => match from_kdl_value(value) {
                Some(parsed) => {
                    snapshot.insert(name.to_string(), parsed);
                }
                None => {
                    warn!(key = name, "skipping entry with unrepresentable value");
                }
            },
            None => {
                warn!(key = name, "skipping entry with no value");
            }
        }
    }
    Ok(snapshot)
}

fn to_kdl_value(value: &SettingValue) -> KdlValue {
    match value {
        SettingValue::Bool(b) => KdlValue::Bool(*b),
        SettingValue::Uint(u) => KdlValue::Integer(*u as i128),
        SettingValue::Text(t) => KdlValue::String(t.clone()),
    }
}

/// Map a KDL scalar back to a setting value. Integers outside the u32
/// range, floats and nulls have no representation and yield `None`.
fn from_kdl_value(value: &KdlValue) -> Option<SettingValue> {
    if let Some(b) = value.as_bool() {
        return Some(SettingValue::Bool(b));
    }
    if let Some(i) = value.as_integer() {
        return u32::try_from(i).ok().map(SettingValue::Uint);
    }
    value.as_string().map(|s| SettingValue::Text(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::open(dir.path().join("settings.kdl")).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load("pop").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.kdl");

        let mut store = FileStore::open(&path).unwrap();
        store.store("max-history-size", &SettingValue::Uint(250)).unwrap();
        store.store("history-name", &SettingValue::Text("work".into())).unwrap();
        store.store("trim-items", &SettingValue::Bool(true)).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.load("max-history-size").unwrap(),
            Some(SettingValue::Uint(250))
        );
        assert_eq!(
            reopened.load("history-name").unwrap(),
            Some(SettingValue::Text("work".into()))
        );
        assert_eq!(
            reopened.load("trim-items").unwrap(),
            Some(SettingValue::Bool(true))
        );
    }

    #[test]
    fn test_write_notifies_watchers() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let (tx, rx) = mpsc::channel();
        store.watch(tx).unwrap();

        store.store("pop", &SettingValue::Text("<Ctrl><Alt>V".into())).unwrap();
        assert_eq!(rx.try_recv().unwrap(), "pop");
    }

    #[test]
    fn test_refresh_notifies_external_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.kdl");
        let mut store = FileStore::open(&path).unwrap();
        store.store("max-history-size", &SettingValue::Uint(100)).unwrap();

        let (tx, rx) = mpsc::channel();
        store.watch(tx).unwrap();

        // Another process rewrites the file behind our back.
        fs::write(&path, "max-history-size 250\nsave-history #false\n").unwrap();
        store.refresh().unwrap();

        let mut seen: Vec<String> = rx.try_iter().collect();
        seen.sort();
        assert_eq!(seen, vec!["max-history-size", "save-history"]);
        assert_eq!(
            store.load("max-history-size").unwrap(),
            Some(SettingValue::Uint(250))
        );
        assert_eq!(
            store.load("save-history").unwrap(),
            Some(SettingValue::Bool(false))
        );
    }

    #[test]
    fn test_refresh_without_changes_is_silent() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.store("pop", &SettingValue::Text("x".into())).unwrap();

        let (tx, rx) = mpsc::channel();
        store.watch(tx).unwrap();
        store.refresh().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_refresh_notifies_removed_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.kdl");
        let mut store = FileStore::open(&path).unwrap();
        store.store("trim-items", &SettingValue::Bool(true)).unwrap();

        let (tx, rx) = mpsc::channel();
        store.watch(tx).unwrap();

        fs::write(&path, "").unwrap();
        store.refresh().unwrap();

        assert_eq!(rx.try_recv().unwrap(), "trim-items");
        assert_eq!(store.load("trim-items").unwrap(), None);
    }

    #[test]
    fn test_unknown_nodes_are_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.kdl");
        fs::write(&path, "future-key \"something\"\nmax-history-size 50\n").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        store.store("max-history-size", &SettingValue::Uint(60)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("future-key"));
        assert!(written.contains("something"));
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.kdl");
        fs::write(&path, "max-history-size \"unterminated\n").unwrap();
        assert!(FileStore::open(&path).is_err());
    }

    #[test]
    fn test_out_of_range_integer_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.kdl");
        fs::write(&path, "max-history-size 4294967296\npop \"<Ctrl><Alt>V\"\n").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.load("max-history-size").unwrap(), None);
        assert_eq!(
            store.load("pop").unwrap(),
            Some(SettingValue::Text("<Ctrl><Alt>V".into()))
        );
    }
}
