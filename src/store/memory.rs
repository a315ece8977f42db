//! In-process settings store.
//!
//! `MemoryStore` is a shared-handle store: clones are cheap and observe the
//! same state, so one handle can live inside a [`Settings`] context while
//! another simulates an external writer (another process, a sync agent).
//! Every write is echoed to all watchers regardless of which handle
//! performed it.
//!
//! [`Settings`]: crate::settings::Settings

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::Result;
use crate::settings::SettingValue;

use super::backend::{ChangeSink, SettingsStore, WatchId, WatcherSet};

#[derive(Default)]
struct Inner {
    values: HashMap<String, SettingValue>,
    watchers: WatcherSet,
}

/// An in-process store backed by shared memory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value without notifying watchers. For pre-populating a
    /// store before any settings context opens against it.
    pub fn seed(&self, key: &str, value: SettingValue) {
        self.inner.borrow_mut().values.insert(key.to_string(), value);
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<SettingValue>> {
        Ok(self.inner.borrow().values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &SettingValue) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.values.insert(key.to_string(), value.clone());
        inner.watchers.notify(key);
        Ok(())
    }

    fn watch(&mut self, sink: ChangeSink) -> Result<WatchId> {
        Ok(self.inner.borrow_mut().watchers.add(sink))
    }

    fn unwatch(&mut self, id: WatchId) {
        self.inner.borrow_mut().watchers.remove(id);
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
