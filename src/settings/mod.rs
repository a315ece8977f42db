//! Settings cache, dispatcher and subscription lifecycle.
//!
//! One [`Settings`] context exists per process. It is populated from the
//! store synchronously at open (one read per key, never partial) and stays
//! coherent through the store's change notifications:
//!
//! 1. a mutation - local `set` or an external write - reaches the store;
//! 2. the store echoes the key name back through the watch channel;
//! 3. [`Settings::process_pending`] re-reads the key into the cache,
//!    fires `rebind`/`track` when the key calls for them, and always
//!    fires `changed` last.
//!
//! `set` itself never dispatches events; the store echo is the single code
//! path for "cache now reflects store". Readers always get the cached
//! value - `get` never blocks and never touches the store.

pub mod events;
pub mod key;
pub mod value;

pub use events::SubscriberId;
pub use key::SettingKey;
pub use value::{SettingValue, ValueKind};

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};

use tracing::{debug, warn};

use crate::store::{SettingsStore, WatchId};
use crate::Result;

use events::SubscriberRegistry;

/// The process-wide settings context: typed cache, change dispatcher and
/// the owner of the store watch subscription.
pub struct Settings {
    store: Box<dyn SettingsStore>,
    cache: HashMap<SettingKey, SettingValue>,
    pending: Receiver<String>,
    watch: Option<WatchId>,
    subscribers: SubscriberRegistry,
}

impl Settings {
    /// Open a settings context against `store`.
    ///
    /// Reads every key synchronously (missing keys resolve to their
    /// defaults) and registers the change watch. A store failure here is
    /// fatal: there is no degraded or lazily-populated state.
    pub fn open(mut store: Box<dyn SettingsStore>) -> Result<Self> {
        let mut cache = HashMap::with_capacity(SettingKey::ALL.len());
        for key in SettingKey::ALL {
            cache.insert(key, load_one(store.as_ref(), key)?);
        }

        let (sink, pending) = mpsc::channel();
        let watch = store.watch(sink)?;

        Ok(Self {
            store,
            cache,
            pending,
            watch: Some(watch),
            subscribers: SubscriberRegistry::default(),
        })
    }

    /// The last synchronized value for `key`. Never blocks, never touches
    /// the store.
    pub fn get(&self, key: SettingKey) -> &SettingValue {
        &self.cache[&key]
    }

    /// The boolean value of `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` does not hold booleans; calling a typed accessor
    /// with a key of another kind is a programming error.
    pub fn boolean(&self, key: SettingKey) -> bool {
        match self.get(key) {
            SettingValue::Bool(value) => *value,
            other => panic!("setting '{}' holds {} values, not booleans", key, other.kind()),
        }
    }

    /// The unsigned value of `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` does not hold unsigned integers.
    pub fn unsigned(&self, key: SettingKey) -> u32 {
        match self.get(key) {
            SettingValue::Uint(value) => *value,
            other => panic!("setting '{}' holds {} values, not unsigned integers", key, other.kind()),
        }
    }

    /// The text value of `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` does not hold text.
    pub fn text(&self, key: SettingKey) -> &str {
        match self.get(key) {
            SettingValue::Text(value) => value.as_str(),
            other => panic!("setting '{}' holds {} values, not text", key, other.kind()),
        }
    }

    /// Change a setting: validate, write through to the store, then update
    /// the cache to the same value.
    ///
    /// On a kind mismatch or validation failure both cache and store are
    /// left untouched. `set` emits no events itself - the store echoes the
    /// write back and [`Settings::process_pending`] dispatches from there.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<()> {
        if value.kind() != key.kind() {
            return Err(crate::Error::WrongKind {
                key,
                expected: key.kind(),
                got: value.kind(),
            });
        }
        value.validate(key)?;

        self.store.store(key.name(), &value)?;
        self.cache.insert(key, value);
        Ok(())
    }

    /// Set a boolean setting. Kind mismatches surface as errors like any
    /// other [`Settings::set`] call.
    pub fn set_boolean(&mut self, key: SettingKey, value: bool) -> Result<()> {
        self.set(key, SettingValue::Bool(value))
    }

    /// Set an unsigned setting.
    pub fn set_unsigned(&mut self, key: SettingKey, value: u32) -> Result<()> {
        self.set(key, SettingValue::Uint(value))
    }

    /// Set a text setting.
    pub fn set_text(&mut self, key: SettingKey, value: impl Into<String>) -> Result<()> {
        self.set(key, SettingValue::Text(value.into()))
    }

    /// Subscribe to `changed` events, optionally filtered to one key
    /// (`None` = any key). Returns a handle for [`Settings::unsubscribe`].
    pub fn on_changed(
        &mut self,
        filter: Option<SettingKey>,
        callback: impl FnMut(SettingKey) + 'static,
    ) -> SubscriberId {
        self.subscribers.on_changed(filter, callback)
    }

    /// Subscribe to `rebind` events, optionally filtered to one key.
    pub fn on_rebind(
        &mut self,
        filter: Option<SettingKey>,
        callback: impl FnMut(SettingKey) + 'static,
    ) -> SubscriberId {
        self.subscribers.on_rebind(filter, callback)
    }

    /// Subscribe to `track` events. Track is a broadcast: every subscriber
    /// hears every toggle of the clipboard monitor.
    pub fn on_track(&mut self, callback: impl FnMut(bool) + 'static) -> SubscriberId {
        self.subscribers.on_track(callback)
    }

    /// Remove a subscriber. Returns whether anything was removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Drain queued store notifications and dispatch events for each.
    ///
    /// Per notification: the key is re-read from the store into the cache
    /// (one code path for local and external changes alike), then `rebind`
    /// and `track` fire when the key calls for them, strictly before the
    /// unconditional `changed`. Unrecognized key names are ignored.
    ///
    /// Returns the number of notifications handled. After teardown this is
    /// a no-op.
    pub fn process_pending(&mut self) -> Result<usize> {
        if self.watch.is_none() {
            return Ok(0);
        }

        let pending: Vec<String> = self.pending.try_iter().collect();
        let mut handled = 0;

        for name in pending {
            let Some(key) = SettingKey::from_name(&name) else {
                debug!(key = %name, "ignoring change notification for unrecognized key");
                continue;
            };

            let fresh = load_one(self.store.as_ref(), key)?;
            let track_state = fresh.as_bool();
            self.cache.insert(key, fresh);

            if key.triggers_rebind() {
                self.subscribers.emit_rebind(key);
            }
            if key.is_track_toggle() {
                if let Some(enabled) = track_state {
                    self.subscribers.emit_track(enabled);
                }
            }
            self.subscribers.emit_changed(key);
            handled += 1;
        }

        Ok(handled)
    }

    /// Poll the store for externally-originated changes, then dispatch
    /// everything pending. The event-loop entry point for daemons and
    /// `cv watch`.
    pub fn poll(&mut self) -> Result<usize> {
        self.store.refresh()?;
        self.process_pending()
    }

    /// Where the backing store lives, for display.
    pub fn store_location(&self) -> String {
        self.store.location()
    }

    /// Tear the context down: release the store watch and drop all
    /// subscribers. Safe to call more than once; no events are delivered
    /// after the first call.
    pub fn close(&mut self) {
        if let Some(id) = self.watch.take() {
            self.store.unwatch(id);
            self.subscribers.clear();
        }
    }
}

impl Drop for Settings {
    fn drop(&mut self) {
        self.close();
    }
}

/// Read one key from the store, substituting the default when the store
/// has no entry and when the stored value has the wrong kind.
fn load_one(store: &dyn SettingsStore, key: SettingKey) -> Result<SettingValue> {
    match store.load(key.name())? {
        Some(value) if value.kind() == key.kind() => Ok(value),
        Some(value) => {
            warn!(
                key = %key,
                expected = %key.kind(),
                got = %value.kind(),
                "stored value has wrong kind, falling back to default"
            );
            Ok(key.default_value())
        }
        None => Ok(key.default_value()),
    }
}
