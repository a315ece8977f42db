//! Setting values and the validation rules applied before a write.

use std::fmt;

use serde::Serialize;

use super::key::SettingKey;
use crate::{Error, Result};

/// The kind of value a setting holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Uint,
    Text,
}

impl ValueKind {
    /// Human-readable kind name, used in errors and `cv list` output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Bool => "boolean",
            ValueKind::Uint => "unsigned",
            ValueKind::Text => "text",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A setting value: a tagged union over the three kinds the store handles.
///
/// Text payloads are `String`, so byte-level UTF-8 validity holds by
/// construction; store decode paths must surface invalid bytes as errors
/// before a value of this type ever exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Uint(u32),
    Text(String),
}

impl SettingValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Bool(_) => ValueKind::Bool,
            SettingValue::Uint(_) => ValueKind::Uint,
            SettingValue::Text(_) => ValueKind::Text,
        }
    }

    /// The boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The unsigned payload, if this is an unsigned value.
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            SettingValue::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// The text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Apply the per-kind acceptance rules for `key`.
    ///
    /// Booleans and unsigned integers are accepted unconditionally; text is
    /// rejected when empty. Rejection leaves cache and store untouched - the
    /// caller must not apply a value that failed validation.
    pub fn validate(&self, key: SettingKey) -> Result<()> {
        match self {
            SettingValue::Text(text) if text.is_empty() => Err(Error::EmptyText(key)),
            _ => Ok(()),
        }
    }

    /// Parse untyped input (CLI argument, file entry) into a value of the
    /// kind `key` holds. Parse failures are validation failures.
    pub fn parse(key: SettingKey, input: &str) -> Result<Self> {
        match key.kind() {
            ValueKind::Bool => match input {
                "true" => Ok(SettingValue::Bool(true)),
                "false" => Ok(SettingValue::Bool(false)),
                _ => Err(Error::InvalidValue {
                    key,
                    reason: format!("expected 'true' or 'false', got '{}'", input),
                }),
            },
            ValueKind::Uint => input.parse::<u32>().map(SettingValue::Uint).map_err(|e| {
                Error::InvalidValue {
                    key,
                    reason: format!("'{}' is not an unsigned integer: {}", input, e),
                }
            }),
            ValueKind::Text => Ok(SettingValue::Text(input.to_string())),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(value) => write!(f, "{}", value),
            SettingValue::Uint(value) => write!(f, "{}", value),
            SettingValue::Text(value) => write!(f, "{}", value),
        }
    }
}
