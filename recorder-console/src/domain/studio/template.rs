//! Upload template ("studio") entity.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationErrors;
use crate::Result;

pub const MAX_TAGS: usize = 12;
pub const MAX_TAG_CHARS: usize = 20;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
/// Scheduled publishing must be at least 4 hours out.
pub const MIN_DELAY_SECS: i64 = 4 * 60 * 60;
/// ...and less than 15 days out.
pub const MAX_DELAY_SECS: i64 = 15 * 24 * 60 * 60;

/// Original work.
pub const COPYRIGHT_ORIGINAL: u8 = 1;
/// Repost, requires a source.
pub const COPYRIGHT_REPOST: u8 = 2;

/// A co-creator credited on the upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub username: String,
    pub uid: i64,
}

/// Upload metadata referenced by `StreamerEntity::upload_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub template_name: String,
    /// Cookie file of the uploading account.
    pub user_cookie: String,
    pub copyright: u8,
    pub copyright_source: String,
    /// Category id.
    pub tid: i64,
    pub cover_path: String,
    pub title: String,
    pub description: String,
    pub dynamic: String,
    pub tags: Vec<String>,
    /// Publish delay in seconds, `0` publishes immediately.
    pub dtime: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission_id: Option<i64>,
    pub dolby: u8,
    pub hires: u8,
    pub no_reprint: u8,
    pub is_only_self: u8,
    pub up_selection_reply: u8,
    pub up_close_reply: u8,
    pub up_close_danmu: u8,
    pub charging_pay: u8,
    pub credits: Vec<Credit>,
    pub uploader: String,
    /// Raw JSON merged into the submission payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_fields: Option<String>,
}

impl StudioTemplate {
    pub fn new(template_name: impl Into<String>, user_cookie: impl Into<String>, tid: i64) -> Self {
        Self {
            template_name: template_name.into(),
            user_cookie: user_cookie.into(),
            tid,
            copyright: COPYRIGHT_ORIGINAL,
            ..Default::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none_or(|id| id == 0)
    }

    /// Parsed `extra_fields`, `None` when unset or blank.
    pub fn extra_fields_value(&self) -> Result<Option<Value>> {
        match self.extra_fields.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        if self.template_name.trim().is_empty() {
            errors.add("template_name", "template name is required");
        }
        if self.user_cookie.trim().is_empty() {
            errors.add("user_cookie", "an uploading account is required");
        }
        if self.tid <= 0 {
            errors.add("tid", "category is required");
        }

        match self.copyright {
            COPYRIGHT_ORIGINAL => {}
            COPYRIGHT_REPOST => {
                if self.copyright_source.trim().is_empty() {
                    errors.add("copyright_source", "reposts need a source");
                }
            }
            other => errors.add("copyright", format!("unknown copyright type {other}")),
        }

        if self.tags.is_empty() || self.tags.len() > MAX_TAGS {
            errors.add("tags", format!("between 1 and {MAX_TAGS} tags are required"));
        }
        let mut seen = HashSet::new();
        for tag in &self.tags {
            if tag.chars().count() > MAX_TAG_CHARS {
                errors.add("tags", format!("tag `{tag}` exceeds {MAX_TAG_CHARS} characters"));
            }
            if !seen.insert(tag.as_str()) {
                errors.add("tags", format!("duplicate tag `{tag}`"));
            }
        }

        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            errors.add(
                "description",
                format!("description exceeds {MAX_DESCRIPTION_CHARS} characters"),
            );
        }

        if self.dtime != 0 && !(MIN_DELAY_SECS..MAX_DELAY_SECS).contains(&self.dtime) {
            errors.add("dtime", "scheduled publishing must be between 4 hours and 15 days");
        }

        if self.extra_fields_value().is_err() {
            errors.add("extra_fields", "extra fields must be valid JSON");
        }

        for (i, credit) in self.credits.iter().enumerate() {
            if credit.username.trim().is_empty() {
                errors.add("credits", format!("credit {i} needs a username"));
            }
        }

        errors.into_result()
    }
}
