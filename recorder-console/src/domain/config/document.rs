//! Nested configuration document.
//!
//! The space-wide configuration is a single JSON object fetched from and
//! persisted to the backend as a whole. Keys are addressable with dot paths:
//! `"user.bili_cookie"` addresses `{"user": {"bili_cookie": ..}}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Resolve a dot path through nested objects.
///
/// Returns `None` when a segment is missing, empty, or walks into a non-object.
pub fn get_path<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next().filter(|s| !s.is_empty())?;
    let mut current = map.get(first)?;
    for segment in segments {
        if segment.is_empty() {
            return None;
        }
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Write `value` at a dot path, creating intermediate objects as needed.
///
/// A non-object sitting on the path is replaced by an object.
pub fn set_path(map: &mut Map<String, Value>, path: &str, value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::validation(path, "invalid configuration path"));
    }

    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| Error::validation(path, "invalid configuration path"))?;

    let mut current = map;
    for segment in parents {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = slot
            .as_object_mut()
            .ok_or_else(|| Error::validation(path, "invalid configuration path"))?;
    }
    current.insert(last.to_string(), value);
    Ok(())
}

/// Deep-merge `patch` onto `base`.
///
/// Objects on both sides are merged key by key; anything else in `patch`
/// replaces the base value outright, lists included.
pub fn merge_maps(base: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, patch_value) in patch {
        match (base.get_mut(&key), patch_value) {
            (Some(Value::Object(base_inner)), Value::Object(patch_inner)) => {
                merge_maps(base_inner, patch_inner);
            }
            (_, patch_value) => {
                base.insert(key, patch_value);
            }
        }
    }
}

/// The space-wide configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(Map<String, Value>);

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::Other(format!(
                "configuration document must be a JSON object, got {other}"
            ))),
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.0, path)
    }

    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        set_path(&mut self.0, path, value.into())
    }

    /// Return a new document with `patch` deep-merged over `self`.
    pub fn merge(&self, patch: &ConfigDocument) -> ConfigDocument {
        let mut merged = self.0.clone();
        merge_maps(&mut merged, patch.0.clone());
        Self(merged)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ConfigDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
