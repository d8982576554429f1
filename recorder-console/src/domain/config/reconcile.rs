//! Splitting form values between base fields and `override`.
//!
//! The editor works on one flat map of values. On load every `override` key
//! is lifted to the top level ([`expand`]); on save every key that is not a
//! base field is moved back under `override` ([`collect`]). Keys containing
//! dots (`user.bili_cookie`) are plain flat keys here and are never nested.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::streamer::{BASE_FIELD_NAMES, HOOK_FIELDS, StreamerEntity};
use crate::domain::value_objects::{TimeRange, hooks_from_value, to_wire_shape};
use crate::{Error, Result};

/// Flat form values keyed by field key.
pub type FormValues = Map<String, Value>;

/// Form key holding raw override JSON. When non-empty it replaces the
/// previous override wholesale.
pub const OVERRIDE_TEXT_KEY: &str = "override_text";

const OVERRIDE_KEY: &str = "override";

/// Flatten an entity into form values.
///
/// Override keys are copied first so base fields win on a name clash. Hook
/// lists come out in the `{cmd, value}` shape and `time_range` as a
/// two-element array.
pub fn expand(entity: &StreamerEntity) -> Result<FormValues> {
    let mut values = FormValues::new();

    if let Some(overrides) = &entity.override_config {
        for (key, value) in overrides {
            values.insert(key.clone(), value.clone());
        }
    }

    let Value::Object(base) = serde_json::to_value(entity)? else {
        return Err(Error::Other("streamer entity did not serialize to an object".into()));
    };
    for (key, value) in base {
        if key == OVERRIDE_KEY {
            continue;
        }
        values.insert(key, value);
    }

    for key in HOOK_FIELDS {
        if let Some(actions) = entity.hooks(key) {
            values.insert((*key).to_string(), serde_json::to_value(actions)?);
        }
    }
    if let Some(range) = &entity.time_range {
        values.insert("time_range".into(), range.to_form_value());
    }
    if let Some(status) = &entity.status {
        values.insert("status".into(), Value::String(status.to_string()));
    }

    Ok(values)
}

/// Parse the raw override text, `None` when blank or absent.
fn parse_override_text(values: &FormValues) -> Result<Option<Map<String, Value>>> {
    let raw = match values.get(OVERRIDE_TEXT_KEY) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => return Ok(None),
        Some(Value::String(raw)) => raw,
        Some(other) => {
            return Err(Error::validation(
                OVERRIDE_TEXT_KEY,
                format!("expected JSON text, got {other}"),
            ));
        }
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => Err(Error::validation(OVERRIDE_TEXT_KEY, "override must be a JSON object")),
        Err(e) => Err(Error::validation(OVERRIDE_TEXT_KEY, format!("invalid JSON: {e}"))),
    }
}

/// Text fields the entity always carries. A cleared input becomes `""` so
/// the required-field check reports it.
const REQUIRED_TEXT_FIELDS: &[&str] = &["url", "remark"];

const OPTIONAL_TEXT_FIELDS: &[&str] = &["filename", "format", "status"];

/// Integer fields and whether they may be negative.
const INTEGER_FIELDS: &[(&str, bool)] = &[
    ("id", true),
    ("split_time", false),
    ("split_size", false),
    ("upload_id", true),
];

const TEXT_LIST_FIELDS: &[&str] = &["excluded_keywords", "opt_args"];

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn to_integer(key: &str, signed: bool, value: &Value) -> Result<Value> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if signed || n >= 0 => Ok(Value::from(n)),
        Some(_) => Err(Error::validation(key, "must not be negative")),
        None => Err(Error::validation(key, format!("expected an integer, got {value}"))),
    }
}

/// Convert a base field from its form shape to its persisted shape.
///
/// Cleared optional inputs (`null` or blank text) become `null`. Values of
/// the wrong type are reported against their field.
fn to_wire_field(key: &str, value: Value) -> Result<Value> {
    if REQUIRED_TEXT_FIELDS.contains(&key) {
        return match value {
            Value::Null => Ok(Value::String(String::new())),
            Value::String(_) => Ok(value),
            other => Err(Error::validation(key, format!("expected text, got {other}"))),
        };
    }
    if is_blank(&value) {
        return Ok(Value::Null);
    }
    if HOOK_FIELDS.contains(&key) {
        let actions = hooks_from_value(&value).map_err(|e| Error::validation(key, e.to_string()))?;
        return Ok(serde_json::to_value(to_wire_shape(&actions))?);
    }
    if key == "time_range" {
        if value.as_array().is_some_and(Vec::is_empty) {
            return Ok(Value::Null);
        }
        let range = TimeRange::from_value(&value).map_err(|e| Error::validation(key, e))?;
        return Ok(Value::String(range.to_wire_string()));
    }
    if let Some((_, signed)) = INTEGER_FIELDS.iter().find(|(name, _)| *name == key) {
        return to_integer(key, *signed, &value);
    }
    if OPTIONAL_TEXT_FIELDS.contains(&key) && !value.is_string() {
        return Err(Error::validation(key, format!("expected text, got {value}")));
    }
    if TEXT_LIST_FIELDS.contains(&key) {
        let all_text = value.as_array().is_some_and(|items| items.iter().all(Value::is_string));
        if !all_text {
            return Err(Error::validation(key, format!("expected a list of text, got {value}")));
        }
    }
    Ok(value)
}

/// Split flat form values into top-level base fields and `override`.
///
/// The previous override seeds the result, so options of plugins that are
/// not on screen survive. Submitted non-base keys with a `null` value are
/// dropped from the top level without touching the seed.
///
/// A non-empty `override_text` becomes the override as-is: submitted
/// non-base keys are ignored, so keys removed from the text are deleted.
/// The returned map holds only keys from `base_fields` plus `override`.
pub fn collect(
    values: &FormValues,
    previous_override: &Map<String, Value>,
    base_fields: &[&str],
) -> Result<Map<String, Value>> {
    let raw_override = parse_override_text(values)?;
    let per_field = raw_override.is_none();
    let mut overrides = match raw_override {
        Some(map) => {
            debug!(keys = map.len(), "Override replaced from raw JSON");
            map
        }
        None => previous_override.clone(),
    };

    overrides.retain(|key, _| {
        let keep = key != OVERRIDE_KEY && key != OVERRIDE_TEXT_KEY && !base_fields.contains(&key.as_str());
        if !keep {
            warn!(key = %key, "Dropping base field found in override");
        }
        keep
    });

    let mut top = Map::new();
    for (key, value) in values {
        if key == OVERRIDE_KEY || key == OVERRIDE_TEXT_KEY {
            continue;
        }
        if base_fields.contains(&key.as_str()) {
            top.insert(key.clone(), to_wire_field(key, value.clone())?);
        } else if per_field && !value.is_null() {
            overrides.insert(key.clone(), value.clone());
        }
    }

    top.insert(OVERRIDE_KEY.to_string(), Value::Object(overrides));
    Ok(top)
}

/// [`collect`] against [`BASE_FIELD_NAMES`], decoded into an entity.
pub fn collect_entity(values: &FormValues, previous_override: &Map<String, Value>) -> Result<StreamerEntity> {
    let wire = collect(values, previous_override, BASE_FIELD_NAMES)?;
    Ok(serde_json::from_value(Value::Object(wire))?)
}
