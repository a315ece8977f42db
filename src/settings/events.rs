//! Typed publish-subscribe for settings change notifications.
//!
//! Subscribers register a callback per event kind, optionally filtered to a
//! single [`SettingKey`] (`None` = any key). Delivery is synchronous and
//! in-process, in registration order within each kind. The dispatcher in
//! [`super::Settings`] decides *when* each kind fires; this module only
//! owns the subscriber lists.

use super::key::SettingKey;

/// Handle returned by a subscription, usable to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type KeyCallback = Box<dyn FnMut(SettingKey)>;
type TrackCallback = Box<dyn FnMut(bool)>;

struct KeyedSubscriber {
    id: SubscriberId,
    filter: Option<SettingKey>,
    callback: KeyCallback,
}

struct TrackSubscriber {
    id: SubscriberId,
    callback: TrackCallback,
}

/// Ordered subscriber lists for the three event kinds.
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: u64,
    changed: Vec<KeyedSubscriber>,
    rebind: Vec<KeyedSubscriber>,
    track: Vec<TrackSubscriber>,
}

impl SubscriberRegistry {
    fn next_id(&mut self) -> SubscriberId {
        self.next_id += 1;
        SubscriberId(self.next_id)
    }

    pub fn on_changed(
        &mut self,
        filter: Option<SettingKey>,
        callback: impl FnMut(SettingKey) + 'static,
    ) -> SubscriberId {
        let id = self.next_id();
        self.changed.push(KeyedSubscriber {
            id,
            filter,
            callback: Box::new(callback),
        });
        id
    }

    pub fn on_rebind(
        &mut self,
        filter: Option<SettingKey>,
        callback: impl FnMut(SettingKey) + 'static,
    ) -> SubscriberId {
        let id = self.next_id();
        self.rebind.push(KeyedSubscriber {
            id,
            filter,
            callback: Box::new(callback),
        });
        id
    }

    pub fn on_track(&mut self, callback: impl FnMut(bool) + 'static) -> SubscriberId {
        let id = self.next_id();
        self.track.push(TrackSubscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscriber from whichever list holds it. Returns whether
    /// anything was removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.changed.len() + self.rebind.len() + self.track.len();
        self.changed.retain(|s| s.id != id);
        self.rebind.retain(|s| s.id != id);
        self.track.retain(|s| s.id != id);
        before != self.changed.len() + self.rebind.len() + self.track.len()
    }

    /// Drop every subscriber. Used at teardown.
    pub fn clear(&mut self) {
        self.changed.clear();
        self.rebind.clear();
        self.track.clear();
    }

    pub fn emit_changed(&mut self, key: SettingKey) {
        for subscriber in &mut self.changed {
            if subscriber.filter.is_none() || subscriber.filter == Some(key) {
                (subscriber.callback)(key);
            }
        }
    }

    pub fn emit_rebind(&mut self, key: SettingKey) {
        for subscriber in &mut self.rebind {
            if subscriber.filter.is_none() || subscriber.filter == Some(key) {
                (subscriber.callback)(key);
            }
        }
    }

    /// Track is unkeyed: every track subscriber hears every toggle.
    pub fn emit_track(&mut self, enabled: bool) {
        for subscriber in &mut self.track {
            (subscriber.callback)(enabled);
        }
    }
}
