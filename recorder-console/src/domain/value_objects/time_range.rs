//! Recording time window.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Start/end instants of the recording window.
///
/// Persisted as a JSON *string* holding an array of two ISO-8601 timestamps,
/// e.g. `"[\"2024-01-01T12:00:00.000Z\",\"2024-01-01T18:00:00.000Z\"]"`.
/// The form edits it as a plain two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    fn timestamps(&self) -> [String; 2] {
        [
            self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.end.to_rfc3339_opts(SecondsFormat::Millis, true),
        ]
    }

    /// Two-element array of ISO timestamps.
    pub fn to_form_value(&self) -> Value {
        Value::from(self.timestamps().to_vec())
    }

    pub fn to_wire_string(&self) -> String {
        let [start, end] = self.timestamps();
        Value::from(vec![start, end]).to_string()
    }

    /// Parse either the wire string or the form array.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(raw) => {
                let parsed: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
                match parsed {
                    Value::Array(_) => Self::from_value(&parsed),
                    _ => Err("time_range must hold an array".to_string()),
                }
            }
            Value::Array(items) => match items.as_slice() {
                [start, end] => Ok(Self::new(parse_instant(start)?, parse_instant(end)?)),
                _ => Err(format!("time_range needs 2 instants, got {}", items.len())),
            },
            other => Err(format!("unsupported time_range value {other}")),
        }
    }
}

fn parse_instant(value: &Value) -> Result<DateTime<Utc>, String> {
    let raw = value
        .as_str()
        .ok_or_else(|| format!("expected a timestamp string, got {value}"))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp `{raw}`: {e}"))
}

/// Serde adapter for `Option<TimeRange>` fields.
///
/// Unparseable input is logged and treated as unset rather than failing the
/// whole entity.
pub mod wire {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use tracing::warn;

    use super::TimeRange;

    pub fn serialize<S: Serializer>(
        range: &Option<TimeRange>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match range {
            Some(range) => serializer.serialize_str(&range.to_wire_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TimeRange>, D::Error> {
        let raw: Option<Value> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|value| match TimeRange::from_value(&value) {
            Ok(range) => Some(range),
            Err(error) => {
                warn!(raw = %value, error = %error, "Dropping unparseable time_range");
                None
            }
        }))
    }
}
