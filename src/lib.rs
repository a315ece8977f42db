//! Clipvault - the settings layer of a clipboard-history daemon.
//!
//! This library keeps an in-process cache of the daemon's named settings
//! coherent with a persistent key-value store, and publishes change events
//! to interested subsystems:
//!
//! - `changed(key)` - fires for every key on every change
//! - `rebind(key)` - fires for the shortcut-bearing keys, telling the
//!   shortcut grabber to re-register its bindings
//! - `track(enabled)` - fires when clipboard tracking is toggled on or off
//!
//! The [`settings::Settings`] context object is the single entry point:
//! create one per process against a [`store::SettingsStore`] backend and
//! pass it to every consumer that needs settings access.

pub mod cli;
pub mod commands;
pub mod settings;
pub mod store;

use settings::{SettingKey, ValueKind};

/// Library-level error type for clipvault operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    #[error("Setting '{key}' holds {expected} values, got {got}")]
    WrongKind {
        key: SettingKey,
        expected: ValueKind,
        got: ValueKind,
    },

    #[error("Setting '{0}' requires non-empty text")]
    EmptyText(SettingKey),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: SettingKey, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for clipvault operations.
pub type Result<T> = std::result::Result<T, Error>;
