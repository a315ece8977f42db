//! Persistent store backends for the settings layer.
//!
//! The settings context owns exactly one [`SettingsStore`]:
//!
//! - [`FileStore`] - a KDL document at `~/.config/clipvault/settings.kdl`
//!   (the `cv` CLI default)
//! - [`MemoryStore`] - a shared-handle in-process store, used by tests and
//!   as an ephemeral backend
//!
//! All backends echo every accepted write back through their notification
//! channel; the settings layer relies on that echo to drive event dispatch.

pub mod backend;
pub mod file;
pub mod memory;

pub use backend::{ChangeSink, SettingsStore, WatchId};
pub use file::FileStore;
pub use memory::MemoryStore;
