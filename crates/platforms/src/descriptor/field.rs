//! Field specifications.
//!
//! A field is the smallest unit a settings form renders: a flat key, an input
//! kind, optional choices, an optional default and a list of validation rules.
//! Help text is presentation only and never affects validation.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::DescriptorError;

/// The kind of input a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Number,
    Switch,
    Select,
    MultiSelect,
    TagList,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Switch => "switch",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::TagList => "tag_list",
        }
    }

    /// Check that a non-empty value has the JSON type this input produces.
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Number => value.is_number(),
            Self::Switch => value.is_boolean(),
            Self::Select => value.is_string() || value.is_number(),
            Self::MultiSelect | Self::TagList => value
                .as_array()
                .is_some_and(|items| items.iter().all(|i| i.is_string() || i.is_number())),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::Text => "expected a string",
            Self::Number => "expected a number",
            Self::Switch => "expected a boolean",
            Self::Select => "expected a string or a number",
            Self::MultiSelect | Self::TagList => "expected a list of values",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A choice offered by select-like inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

/// A validation rule attached to a field.
///
/// Rules other than [`Rule::Required`] are only evaluated for non-empty values.
#[derive(Debug, Clone)]
pub enum Rule {
    Required { message: String },
    /// The string value must match.
    Pattern { regex: Regex, message: String },
    /// Every item of a list value must match.
    EachPattern { regex: Regex, message: String },
    /// The string value must parse as JSON.
    Json { message: String },
    Range {
        min: Option<f64>,
        max: Option<f64>,
        message: String,
    },
    Predicate {
        check: fn(&Value) -> bool,
        message: String,
    },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, DescriptorError> {
        Ok(Self::Pattern {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    pub fn each_pattern(pattern: &str, message: impl Into<String>) -> Result<Self, DescriptorError> {
        Ok(Self::EachPattern {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self::Range {
            min,
            max,
            message: message.into(),
        }
    }

    pub fn predicate(check: fn(&Value) -> bool, message: impl Into<String>) -> Self {
        Self::Predicate {
            check,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::Pattern { message, .. }
            | Self::EachPattern { message, .. }
            | Self::Json { message }
            | Self::Range { message, .. }
            | Self::Predicate { message, .. } => message,
        }
    }

    fn check(&self, value: &Value) -> bool {
        match self {
            Self::Required { .. } => !is_empty(value),
            Self::Pattern { regex, .. } => value.as_str().is_some_and(|s| regex.is_match(s)),
            Self::EachPattern { regex, .. } => value.as_array().is_some_and(|items| {
                items
                    .iter()
                    .all(|item| item.as_str().is_some_and(|s| regex.is_match(s)))
            }),
            Self::Json { .. } => value
                .as_str()
                .is_some_and(|s| serde_json::from_str::<Value>(s).is_ok()),
            Self::Range { min, max, .. } => value.as_f64().is_some_and(|n| {
                min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
            }),
            Self::Predicate { check, .. } => check(value),
        }
    }
}

/// Returns true for values a form treats as "not filled in".
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// A validation failure for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Specification of a single settings field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    key: String,
    kind: InputKind,
    label: Option<String>,
    help: Option<String>,
    options: Vec<SelectOption>,
    allow_custom: bool,
    default: Option<Value>,
    rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, kind: InputKind) -> Self {
        Self {
            key: key.into(),
            kind,
            label: None,
            help: None,
            options: Vec::new(),
            allow_custom: false,
            default: None,
            rules: Vec::new(),
        }
    }

    pub fn text(key: impl Into<String>) -> Self {
        Self::new(key, InputKind::Text)
    }

    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key, InputKind::Number)
    }

    pub fn switch(key: impl Into<String>) -> Self {
        Self::new(key, InputKind::Switch)
    }

    pub fn select(key: impl Into<String>) -> Self {
        Self::new(key, InputKind::Select)
    }

    pub fn multi_select(key: impl Into<String>) -> Self {
        Self::new(key, InputKind::MultiSelect)
    }

    pub fn tag_list(key: impl Into<String>) -> Self {
        Self::new(key, InputKind::TagList)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn option(mut self, value: impl Into<Value>, label: impl Into<String>) -> Self {
        self.options.push(SelectOption {
            value: value.into(),
            label: label.into(),
        });
        self
    }

    /// Accept values outside of the declared options.
    pub fn allow_custom(mut self) -> Self {
        self.allow_custom = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn allows_custom(&self) -> bool {
        self.allow_custom
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required { .. }))
    }

    /// Validate a submitted value, reporting the first failing rule.
    pub fn validate(&self, value: Option<&Value>) -> Result<(), FieldError> {
        let Some(value) = value.filter(|v| !is_empty(v)) else {
            return match self.rules.iter().find(|r| matches!(r, Rule::Required { .. })) {
                Some(rule) => Err(FieldError::new(&self.key, rule.message())),
                None => Ok(()),
            };
        };

        if !self.kind.accepts(value) {
            return Err(FieldError::new(&self.key, self.kind.expected()));
        }

        if !self.options.is_empty() && !self.allow_custom && !self.matches_options(value) {
            return Err(FieldError::new(
                &self.key,
                "value is not one of the available options",
            ));
        }

        match self.rules.iter().find(|rule| !rule.check(value)) {
            Some(rule) => Err(FieldError::new(&self.key, rule.message())),
            None => Ok(()),
        }
    }

    fn matches_options(&self, value: &Value) -> bool {
        let known = |v: &Value| self.options.iter().any(|o| &o.value == v);
        match self.kind {
            InputKind::MultiSelect | InputKind::TagList => {
                value.as_array().is_some_and(|items| items.iter().all(known))
            }
            _ => known(value),
        }
    }
}
