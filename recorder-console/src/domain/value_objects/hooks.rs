//! Lifecycle hook actions.
//!
//! Hook lists (`preprocessor`, `segment_processor`, `downloaded_processor`,
//! `postprocessor`) are edited as `{cmd, value}` pairs but persisted in a
//! shorthand: `rm` is the bare string `"rm"`, every other action is a
//! single-key object such as `{"mv": "backup/"}`. A missing argument is
//! written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookCommand {
    /// Run a shell command, the file path is passed on stdin.
    Run,
    /// Move the file into a directory.
    Mv,
    /// Delete the file.
    Rm,
    /// Post the job result to a url; `success` marks the upload as done.
    Webhook,
}

impl HookCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Mv => "mv",
            Self::Rm => "rm",
            Self::Webhook => "webhook",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "run" => Some(Self::Run),
            "mv" => Some(Self::Mv),
            "rm" => Some(Self::Rm),
            "webhook" => Some(Self::Webhook),
            _ => None,
        }
    }

    /// Whether the action carries an argument.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::Rm)
    }
}

/// A hook action in the shape the form edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookAction {
    pub cmd: HookCommand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl HookAction {
    pub fn new(cmd: HookCommand, value: Option<String>) -> Self {
        let value = if cmd.takes_value() { value } else { None };
        Self { cmd, value }
    }

    pub fn run(command: impl Into<String>) -> Self {
        Self::new(HookCommand::Run, Some(command.into()))
    }

    pub fn mv(dir: impl Into<String>) -> Self {
        Self::new(HookCommand::Mv, Some(dir.into()))
    }

    pub fn rm() -> Self {
        Self::new(HookCommand::Rm, None)
    }

    pub fn webhook(url: impl Into<String>) -> Self {
        Self::new(HookCommand::Webhook, Some(url.into()))
    }
}

/// A hook action in the persisted shorthand.
///
/// `Keyed` also accepts objects already in the `{cmd, value}` form, so
/// [`to_ui_shape`] can normalize lists of either shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireHook {
    Bare(String),
    Keyed(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hook entry: {0}")]
pub struct InvalidHook(String);

/// Convert form-shaped actions to the persisted shorthand.
pub fn to_wire_shape(actions: &[HookAction]) -> Vec<WireHook> {
    actions
        .iter()
        .map(|action| match action.cmd {
            HookCommand::Rm => WireHook::Bare(HookCommand::Rm.as_str().to_string()),
            cmd => {
                let mut map = Map::with_capacity(1);
                let value = action.value.clone().map_or(Value::Null, Value::String);
                map.insert(cmd.as_str().to_string(), value);
                WireHook::Keyed(map)
            }
        })
        .collect()
}

/// Convert persisted hooks back to the form shape.
pub fn to_ui_shape(hooks: &[WireHook]) -> Result<Vec<HookAction>, InvalidHook> {
    hooks.iter().map(hook_to_ui).collect()
}

fn hook_to_ui(hook: &WireHook) -> Result<HookAction, InvalidHook> {
    match hook {
        WireHook::Bare(s) => match HookCommand::parse(s) {
            Some(HookCommand::Rm) => Ok(HookAction::rm()),
            Some(cmd) => Err(InvalidHook(format!("`{}` requires a value", cmd.as_str()))),
            None => Err(InvalidHook(format!("unknown command `{s}`"))),
        },
        WireHook::Keyed(map) if map.contains_key("cmd") => {
            let cmd = map
                .get("cmd")
                .and_then(Value::as_str)
                .and_then(HookCommand::parse)
                .ok_or_else(|| InvalidHook(format!("unknown command in {}", Value::Object(map.clone()))))?;
            let value = map.get("value").and_then(Value::as_str).map(str::to_string);
            Ok(HookAction::new(cmd, value))
        }
        WireHook::Keyed(map) if map.len() == 1 => {
            let (name, value) = map.iter().next().ok_or_else(|| InvalidHook("empty entry".into()))?;
            let cmd = HookCommand::parse(name)
                .ok_or_else(|| InvalidHook(format!("unknown command `{name}`")))?;
            let value = match value {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => return Err(InvalidHook(format!("`{name}` value must be a string, got {other}"))),
            };
            Ok(HookAction::new(cmd, value))
        }
        WireHook::Keyed(map) => Err(InvalidHook(format!(
            "expected a single command, got {}",
            Value::Object(map.clone())
        ))),
    }
}

/// Parse a hook list in either shape from a JSON value.
pub fn hooks_from_value(value: &Value) -> Result<Vec<HookAction>, InvalidHook> {
    let hooks: Vec<WireHook> =
        serde_json::from_value(value.clone()).map_err(|e| InvalidHook(e.to_string()))?;
    to_ui_shape(&hooks)
}

/// Serde adapter persisting `Option<Vec<HookAction>>` in the wire shorthand.
pub mod hook_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{HookAction, WireHook, to_ui_shape, to_wire_shape};

    pub fn serialize<S: Serializer>(
        hooks: &Option<Vec<HookAction>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match hooks {
            Some(hooks) => to_wire_shape(hooks).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<HookAction>>, D::Error> {
        let raw: Option<Vec<WireHook>> = Option::deserialize(deserializer)?;
        raw.map(|hooks| to_ui_shape(&hooks))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_json(actions: &[HookAction]) -> Value {
        serde_json::to_value(to_wire_shape(actions)).unwrap()
    }

    #[test]
    fn test_rm_is_bare_string() {
        assert_eq!(wire_json(&[HookAction::rm()]), json!(["rm"]));
    }

    #[test]
    fn test_other_actions_are_single_key_maps() {
        assert_eq!(wire_json(&[HookAction::mv("backup/")]), json!([{"mv": "backup/"}]));
        assert_eq!(
            wire_json(&[HookAction::run("echo hello!"), HookAction::webhook("https://example.com/notify")]),
            json!([{"run": "echo hello!"}, {"webhook": "https://example.com/notify"}])
        );
    }

    #[test]
    fn test_symmetry() {
        let actions = vec![
            HookAction::run("echo hello!"),
            HookAction::mv("backup/"),
            HookAction::webhook("https://example.com/notify"),
            HookAction::rm(),
            HookAction::new(HookCommand::Mv, None),
            HookAction::new(HookCommand::Run, Some(String::new())),
        ];
        assert_eq!(to_ui_shape(&to_wire_shape(&actions)).unwrap(), actions);
    }

    #[test]
    fn test_missing_value_is_null() {
        let missing = HookAction::new(HookCommand::Mv, None);
        assert_eq!(wire_json(&[missing.clone()]), json!([{"mv": null}]));
        assert_eq!(hooks_from_value(&json!([{"mv": null}])).unwrap(), vec![missing]);
    }

    #[test]
    fn test_ui_shape_from_json() {
        let actions: Vec<HookAction> =
            serde_json::from_value(json!([{"cmd": "rm"}, {"cmd": "mv", "value": "backup/"}])).unwrap();
        assert_eq!(actions, vec![HookAction::rm(), HookAction::mv("backup/")]);
        assert_eq!(wire_json(&actions), json!(["rm", {"mv": "backup/"}]));
    }

    #[test]
    fn test_rm_drops_value() {
        assert_eq!(HookAction::new(HookCommand::Rm, Some("x".into())), HookAction::rm());
    }

    #[test]
    fn test_hooks_from_value_accepts_both_shapes() {
        let mixed = json!(["rm", {"mv": "backup/"}, {"cmd": "run", "value": "echo"}]);
        assert_eq!(
            hooks_from_value(&mixed).unwrap(),
            vec![HookAction::rm(), HookAction::mv("backup/"), HookAction::run("echo")]
        );
    }

    #[test]
    fn test_invalid_entries() {
        assert!(hooks_from_value(&json!(["mv"])).is_err());
        assert!(hooks_from_value(&json!(["explode"])).is_err());
        assert!(hooks_from_value(&json!([{"explode": "now"}])).is_err());
        assert!(hooks_from_value(&json!([{"mv": "a", "run": "b"}])).is_err());
        assert!(hooks_from_value(&json!([{"mv": 1}])).is_err());
        assert!(hooks_from_value(&json!("rm")).is_err());
    }

    #[test]
    fn test_serde_adapter() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Holder {
            #[serde(default, with = "hook_list", skip_serializing_if = "Option::is_none")]
            postprocessor: Option<Vec<HookAction>>,
        }

        let holder: Holder = serde_json::from_value(json!({"postprocessor": ["rm", {"mv": "b/"}]})).unwrap();
        assert_eq!(holder.postprocessor, Some(vec![HookAction::rm(), HookAction::mv("b/")]));
        assert_eq!(
            serde_json::to_value(&holder).unwrap(),
            json!({"postprocessor": ["rm", {"mv": "b/"}]})
        );

        let empty: Holder = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.postprocessor, None);
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
    }
}
