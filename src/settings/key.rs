//! The setting key space.
//!
//! Every setting the daemon recognizes is a variant of [`SettingKey`]: a
//! closed set fixed at compile time. Each key has exactly one value kind for
//! its lifetime and a default used when the backing store has no entry yet.
//! The kebab-case wire names are what the store sees and must be reproduced
//! exactly for interoperability with existing persisted state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::{SettingValue, ValueKind};

/// A recognized setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKey {
    /// Maximum displayed size of a history item, in characters.
    ElementSize,
    /// Name of the history currently in use.
    HistoryName,
    /// Whether images are handled at all.
    ImagesSupport,
    /// Maximum number of history items to display.
    MaxDisplayedHistorySize,
    /// Maximum number of items the history can contain.
    MaxHistorySize,
    /// Maximum amount of memory the history may use, in bytes.
    MaxMemoryUsage,
    /// Maximum size for a text item to be handled (0 = no limit).
    MaxTextItemSize,
    /// Minimum size for a text item to be handled.
    MinTextItemSize,
    /// Keyboard shortcut that pops the most recent history item.
    Pop,
    /// Whether primary-selection changes enter the history.
    PrimaryToHistory,
    /// Whether the history is saved to disk.
    SaveHistory,
    /// Keyboard shortcut that displays the history.
    ShowHistory,
    /// Keyboard shortcut that copies the clipboard into the primary selection.
    SyncClipboardToPrimary,
    /// Keyboard shortcut that copies the primary selection into the clipboard.
    SyncPrimaryToClipboard,
    /// Whether the clipboard and the primary selection are kept in sync.
    SynchronizeClipboards,
    /// Whether clipboard activity is recorded at all (the monitor toggle).
    TrackChanges,
    /// Whether tracking stops when a shell extension or applet exits.
    TrackExtensionState,
    /// Whether text items are whitespace-trimmed before entering the history.
    TrimItems,
}

impl SettingKey {
    /// Every recognized key, in wire-name order.
    pub const ALL: [SettingKey; 18] = [
        SettingKey::ElementSize,
        SettingKey::HistoryName,
        SettingKey::ImagesSupport,
        SettingKey::MaxDisplayedHistorySize,
        SettingKey::MaxHistorySize,
        SettingKey::MaxMemoryUsage,
        SettingKey::MaxTextItemSize,
        SettingKey::MinTextItemSize,
        SettingKey::Pop,
        SettingKey::PrimaryToHistory,
        SettingKey::SaveHistory,
        SettingKey::ShowHistory,
        SettingKey::SyncClipboardToPrimary,
        SettingKey::SyncPrimaryToClipboard,
        SettingKey::SynchronizeClipboards,
        SettingKey::TrackChanges,
        SettingKey::TrackExtensionState,
        SettingKey::TrimItems,
    ];

    /// The keys whose change requires shortcut bindings to be redone.
    pub const REBIND: [SettingKey; 4] = [
        SettingKey::Pop,
        SettingKey::ShowHistory,
        SettingKey::SyncClipboardToPrimary,
        SettingKey::SyncPrimaryToClipboard,
    ];

    /// The key whose change toggles the clipboard monitor.
    pub const TRACK: SettingKey = SettingKey::TrackChanges;

    /// The key's wire name, as persisted in the store.
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::ElementSize => "element-size",
            SettingKey::HistoryName => "history-name",
            SettingKey::ImagesSupport => "images-support",
            SettingKey::MaxDisplayedHistorySize => "max-displayed-history-size",
            SettingKey::MaxHistorySize => "max-history-size",
            SettingKey::MaxMemoryUsage => "max-memory-usage",
            SettingKey::MaxTextItemSize => "max-text-item-size",
            SettingKey::MinTextItemSize => "min-text-item-size",
            SettingKey::Pop => "pop",
            SettingKey::PrimaryToHistory => "primary-to-history",
            SettingKey::SaveHistory => "save-history",
            SettingKey::ShowHistory => "show-history",
            SettingKey::SyncClipboardToPrimary => "sync-clipboard-to-primary",
            SettingKey::SyncPrimaryToClipboard => "sync-primary-to-clipboard",
            SettingKey::SynchronizeClipboards => "synchronize-clipboards",
            SettingKey::TrackChanges => "track-changes",
            SettingKey::TrackExtensionState => "track-extension-state",
            SettingKey::TrimItems => "trim-items",
        }
    }

    /// Parse a wire name back into a key. Exact match only; unrecognized
    /// names return `None` so callers can ignore keys this version does not
    /// know about.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }

    /// The kind of value this key holds, fixed for the key's lifetime.
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingKey::ElementSize
            | SettingKey::MaxDisplayedHistorySize
            | SettingKey::MaxHistorySize
            | SettingKey::MaxMemoryUsage
            | SettingKey::MaxTextItemSize
            | SettingKey::MinTextItemSize => ValueKind::Uint,

            SettingKey::HistoryName
            | SettingKey::Pop
            | SettingKey::ShowHistory
            | SettingKey::SyncClipboardToPrimary
            | SettingKey::SyncPrimaryToClipboard => ValueKind::Text,

            SettingKey::ImagesSupport
            | SettingKey::PrimaryToHistory
            | SettingKey::SaveHistory
            | SettingKey::SynchronizeClipboards
            | SettingKey::TrackChanges
            | SettingKey::TrackExtensionState
            | SettingKey::TrimItems => ValueKind::Bool,
        }
    }

    /// The value used when the store has no entry for this key.
    pub fn default_value(&self) -> SettingValue {
        match self {
            SettingKey::ElementSize => SettingValue::Uint(60),
            SettingKey::HistoryName => SettingValue::Text("history".to_string()),
            SettingKey::ImagesSupport => SettingValue::Bool(false),
            SettingKey::MaxDisplayedHistorySize => SettingValue::Uint(20),
            SettingKey::MaxHistorySize => SettingValue::Uint(100),
            SettingKey::MaxMemoryUsage => SettingValue::Uint(5_242_880),
            SettingKey::MaxTextItemSize => SettingValue::Uint(0),
            SettingKey::MinTextItemSize => SettingValue::Uint(0),
            SettingKey::Pop => SettingValue::Text("<Ctrl><Alt>V".to_string()),
            SettingKey::PrimaryToHistory => SettingValue::Bool(false),
            SettingKey::SaveHistory => SettingValue::Bool(true),
            SettingKey::ShowHistory => SettingValue::Text("<Ctrl><Alt>H".to_string()),
            SettingKey::SyncClipboardToPrimary => SettingValue::Text("<Ctrl><Alt>O".to_string()),
            SettingKey::SyncPrimaryToClipboard => SettingValue::Text("<Ctrl><Alt>P".to_string()),
            SettingKey::SynchronizeClipboards => SettingValue::Bool(false),
            SettingKey::TrackChanges => SettingValue::Bool(true),
            SettingKey::TrackExtensionState => SettingValue::Bool(false),
            SettingKey::TrimItems => SettingValue::Bool(false),
        }
    }

    /// Whether a change to this key requires shortcut bindings to be redone.
    pub fn triggers_rebind(&self) -> bool {
        Self::REBIND.contains(self)
    }

    /// Whether this key is the clipboard-monitor toggle.
    pub fn is_track_toggle(&self) -> bool {
        *self == Self::TRACK
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
