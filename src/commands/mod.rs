//! Command implementations for the `cv` CLI.
//!
//! Each command operates on a [`Settings`] context the caller opened
//! against the chosen store. Commands return structured results that
//! render either as JSON (the default) or human-readable text.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::settings::{SettingKey, SettingValue, Settings};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait CommandResult {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// One setting with its current value.
#[derive(Debug)]
pub struct ValueOutput {
    pub key: SettingKey,
    pub value: SettingValue,
}

impl CommandResult for ValueOutput {
    fn to_json(&self) -> String {
        json!({ "key": self.key, "value": self.value }).to_string()
    }

    fn to_human(&self) -> String {
        format!("{} = {}", self.key, self.value)
    }
}

/// Every setting with its type and current value.
pub struct ListOutput {
    pub entries: Vec<ValueOutput>,
}

impl CommandResult for ListOutput {
    fn to_json(&self) -> String {
        let entries: Vec<_> = self
            .entries
            .iter()
            .map(|entry| {
                json!({
                    "key": entry.key,
                    "type": entry.key.kind().as_str(),
                    "value": entry.value,
                })
            })
            .collect();
        json!({ "settings": entries }).to_string()
    }

    fn to_human(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} ({}) = {}", entry.key, entry.key.kind(), entry.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Resolve a key name from the command line.
fn resolve_key(name: &str) -> Result<SettingKey> {
    SettingKey::from_name(name).ok_or_else(|| Error::UnknownKey(name.to_string()))
}

/// `cv get <key>`
pub fn get(settings: &Settings, key: &str) -> Result<ValueOutput> {
    let key = resolve_key(key)?;
    Ok(ValueOutput {
        key,
        value: settings.get(key).clone(),
    })
}

/// `cv set <key> <value>`
pub fn set(settings: &mut Settings, key: &str, raw: &str) -> Result<ValueOutput> {
    let key = resolve_key(key)?;
    let value = SettingValue::parse(key, raw)?;
    settings.set(key, value)?;
    // Drain the store echo so a long-lived caller would observe the same
    // dispatch a daemon does.
    settings.process_pending()?;
    Ok(ValueOutput {
        key,
        value: settings.get(key).clone(),
    })
}

/// `cv list`
pub fn list(settings: &Settings) -> ListOutput {
    ListOutput {
        entries: SettingKey::ALL
            .iter()
            .map(|&key| ValueOutput {
                key,
                value: settings.get(key).clone(),
            })
            .collect(),
    }
}

/// `cv watch` - print events as they arrive until Ctrl-C.
pub fn watch(settings: &mut Settings, interval: Duration, human: bool) -> Result<()> {
    debug!(
        store = %settings.store_location(),
        interval_ms = interval.as_millis() as u64,
        "watching for settings changes"
    );

    settings.on_rebind(None, move |key| {
        if human {
            println!("rebind {}", key);
        } else {
            println!("{}", json!({ "event": "rebind", "key": key }));
        }
    });
    settings.on_track(move |enabled| {
        if human {
            println!("track {}", enabled);
        } else {
            println!("{}", json!({ "event": "track", "enabled": enabled }));
        }
    });
    settings.on_changed(None, move |key| {
        if human {
            println!("changed {}", key);
        } else {
            println!("{}", json!({ "event": "changed", "key": key }));
        }
    });

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
            .map_err(|e| Error::Other(format!("Failed to install signal handler: {}", e)))?;
    }

    while !stop.load(Ordering::SeqCst) {
        settings.poll()?;
        thread::sleep(interval);
    }

    settings.close();
    Ok(())
}
