//! Store backend trait for settings persistence.
//!
//! A backend is a flat, string-keyed namespace of typed values. Besides
//! reads and writes it offers a change-notification channel: every accepted
//! write is echoed to all watchers - including the writer's own - and
//! backends that can detect externally-originated changes report those
//! through the same channel. Notifications carry raw key names so a store
//! may forward changes to keys the settings layer does not recognize.
//!
//! The whole layer is single-threaded and event-loop-driven: backends are
//! not required to be `Send`, and notification delivery happens whenever
//! the owning context drains its queue - there is no cross-thread handoff.

use std::sync::mpsc::Sender;

use crate::Result;
use crate::settings::SettingValue;

/// Where a store delivers its change notifications: a queue of raw key
/// names, drained by the owning settings context.
pub type ChangeSink = Sender<String>;

/// Handle tying one watcher registration to a store. Released exactly once
/// via [`SettingsStore::unwatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchId(pub(crate) u64);

/// Trait for settings store backends.
pub trait SettingsStore {
    /// Read the value persisted under `key`. `Ok(None)` means the store has
    /// no entry for that key; the caller substitutes the key's default.
    fn load(&self, key: &str) -> Result<Option<SettingValue>>;

    /// Persist `value` under `key`. On success the change is echoed to
    /// every registered watcher, the writer's included.
    fn store(&mut self, key: &str, value: &SettingValue) -> Result<()>;

    /// Register a change watcher. Every subsequent change to any key sends
    /// that key's name to `sink`.
    fn watch(&mut self, sink: ChangeSink) -> Result<WatchId>;

    /// Release a watcher registration. Unknown ids are ignored.
    fn unwatch(&mut self, id: WatchId);

    /// Poll for externally-originated changes. Backends that cannot detect
    /// them keep the default no-op; backends that can must notify watchers
    /// of every difference found.
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }

    /// Human-readable description of the backing storage (for display).
    fn location(&self) -> String;
}

/// Watcher bookkeeping shared by backend implementations: id allocation
/// plus fan-out of key-name notifications.
#[derive(Default)]
pub(crate) struct WatcherSet {
    next_id: u64,
    sinks: Vec<(WatchId, ChangeSink)>,
}

impl WatcherSet {
    pub fn add(&mut self, sink: ChangeSink) -> WatchId {
        self.next_id += 1;
        let id = WatchId(self.next_id);
        self.sinks.push((id, sink));
        id
    }

    pub fn remove(&mut self, id: WatchId) {
        self.sinks.retain(|(watch_id, _)| *watch_id != id);
    }

    /// Send `key` to every watcher. Disconnected sinks are skipped; they
    /// are cleaned up by `remove` when the owner unwatches.
    pub fn notify(&self, key: &str) {
        for (_, sink) in &self.sinks {
            let _ = sink.send(key.to_string());
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}
