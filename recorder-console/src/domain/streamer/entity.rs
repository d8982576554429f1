//! Streamer entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::StreamerStatus;
use crate::domain::value_objects::hooks::{self, HookAction, HookCommand};
use crate::domain::value_objects::time_range::{self, TimeRange};
use crate::error::ValidationErrors;
use crate::Result;

/// Keys that live at the top level of a streamer entity.
///
/// Every other form key is a platform or download option and is stored in
/// `override`. `status` is listed so the read-only value reported by the
/// backend is never swept into `override`.
pub const BASE_FIELD_NAMES: &[&str] = &[
    "id",
    "url",
    "remark",
    "filename",
    "split_time",
    "split_size",
    "upload_id",
    "status",
    "format",
    "time_range",
    "excluded_keywords",
    "preprocessor",
    "segment_processor",
    "downloaded_processor",
    "postprocessor",
    "opt_args",
    "override",
];

/// Hook lists whose actions may only be `run`.
pub const RUN_ONLY_HOOKS: &[&str] = &["preprocessor", "segment_processor", "downloaded_processor"];

/// All hook list keys.
pub const HOOK_FIELDS: &[&str] = &[
    "preprocessor",
    "segment_processor",
    "downloaded_processor",
    "postprocessor",
];

pub fn is_base_field(key: &str) -> bool {
    BASE_FIELD_NAMES.contains(&key)
}

/// A recording task as persisted by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamerEntity {
    /// Backend-assigned; absent or zero before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Segment length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_time: Option<u64>,
    /// Segment size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_size: Option<u64>,
    /// Studio template used for uploading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<i64>,
    #[serde(default, skip_serializing)]
    pub status: Option<StreamerStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, with = "time_range::wire", skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_keywords: Option<Vec<String>>,
    #[serde(default, with = "hooks::hook_list", skip_serializing_if = "Option::is_none")]
    pub preprocessor: Option<Vec<HookAction>>,
    #[serde(default, with = "hooks::hook_list", skip_serializing_if = "Option::is_none")]
    pub segment_processor: Option<Vec<HookAction>>,
    #[serde(default, with = "hooks::hook_list", skip_serializing_if = "Option::is_none")]
    pub downloaded_processor: Option<Vec<HookAction>>,
    #[serde(default, with = "hooks::hook_list", skip_serializing_if = "Option::is_none")]
    pub postprocessor: Option<Vec<HookAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt_args: Option<Vec<String>>,
    /// Every non-base option, keyed exactly as the form submitted it.
    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub override_config: Option<Map<String, Value>>,
}

impl StreamerEntity {
    /// A not-yet-created entity. Recordings are deleted after upload unless
    /// the postprocessor is changed.
    pub fn new(url: impl Into<String>, remark: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            remark: remark.into(),
            postprocessor: Some(vec![HookAction::rm()]),
            ..Default::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none_or(|id| id == 0)
    }

    /// The override map, empty when unset.
    pub fn override_map(&self) -> Map<String, Value> {
        self.override_config.clone().unwrap_or_default()
    }

    pub fn hooks(&self, key: &str) -> Option<&[HookAction]> {
        let list = match key {
            "preprocessor" => &self.preprocessor,
            "segment_processor" => &self.segment_processor,
            "downloaded_processor" => &self.downloaded_processor,
            "postprocessor" => &self.postprocessor,
            _ => return None,
        };
        list.as_deref()
    }

    /// Trim text fields and check the save-path rules.
    ///
    /// All failures are reported together.
    pub fn normalize(&mut self) -> Result<()> {
        self.url = self.url.trim().to_string();
        self.remark = self.remark.trim().to_string();
        if let Some(format) = self.format.as_mut() {
            *format = format.trim().to_string();
        }

        let mut errors = ValidationErrors::new();
        if self.url.is_empty() {
            errors.add("url", "url is required");
        }
        if self.remark.is_empty() {
            errors.add("remark", "remark is required");
        }

        for key in HOOK_FIELDS {
            let Some(actions) = self.hooks(key) else {
                continue;
            };
            let run_only = RUN_ONLY_HOOKS.contains(key);
            for (i, action) in actions.iter().enumerate() {
                if run_only && action.cmd != HookCommand::Run {
                    errors.add(
                        *key,
                        format!("entry {i}: only `run` is allowed, got `{}`", action.cmd.as_str()),
                    );
                } else if action.cmd.takes_value()
                    && action.value.as_deref().is_none_or(|v| v.trim().is_empty())
                {
                    errors.add(
                        *key,
                        format!("entry {i}: `{}` requires a value", action.cmd.as_str()),
                    );
                }
            }
        }

        errors.into_result()
    }

    /// The JSON body for create/update. `status` is never sent.
    pub fn to_wire(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
