use std::collections::HashSet;

use serde_json::{Map, Value};

use super::error::DescriptorError;
use super::field::{FieldError, FieldSpec};

/// A named, ordered set of settings fields.
///
/// Platform plugins and the generic form sections (download, global, ...)
/// are both described this way, so a renderer needs no per-platform code.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    name: String,
    title: String,
    fields: Vec<FieldSpec>,
}

impl PluginDescriptor {
    pub fn builder(name: impl Into<String>, title: impl Into<String>) -> PluginDescriptorBuilder {
        PluginDescriptorBuilder {
            name: name.into(),
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Stable identifier, e.g. `bilibili`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Section header shown above the fields.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key() == key)
    }

    pub fn contains_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Field keys in declaration order.
    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::key)
    }

    /// Default values of every field that declares one.
    pub fn defaults(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter_map(|f| f.default().map(|v| (f.key().to_string(), v.clone())))
            .collect()
    }

    /// Validate the values of every field of this descriptor.
    ///
    /// Keys the descriptor does not declare are ignored.
    pub fn validate(&self, values: &Map<String, Value>) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|f| f.validate(values.get(f.key())).err())
            .collect()
    }
}

#[derive(Debug)]
pub struct PluginDescriptorBuilder {
    name: String,
    title: String,
    fields: Vec<FieldSpec>,
}

impl PluginDescriptorBuilder {
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<PluginDescriptor, DescriptorError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.key().is_empty() {
                return Err(DescriptorError::EmptyFieldKey(self.name));
            }
            if !seen.insert(field.key()) {
                return Err(DescriptorError::DuplicateField {
                    plugin: self.name.clone(),
                    field: field.key().to_string(),
                });
            }
        }

        Ok(PluginDescriptor {
            name: self.name,
            title: self.title,
            fields: self.fields,
        })
    }
}
