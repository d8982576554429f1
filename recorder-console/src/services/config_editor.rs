//! Space-wide configuration form.

use platforms_settings::descriptor::sections;
use platforms_settings::{PluginDescriptor, PluginRegistry};
use tracing::debug;

use crate::domain::ConfigDocument;
use crate::domain::config::FormValues;
use crate::error::ValidationErrors;
use crate::Result;

/// Edits the whole configuration document through descriptor sections.
///
/// Field keys are dot paths into the document, so `user.bili_cookie` reads
/// and writes `{"user": {"bili_cookie": ..}}`.
#[derive(Debug, Clone)]
pub struct ConfigEditor {
    document: ConfigDocument,
    sections: Vec<PluginDescriptor>,
}

impl ConfigEditor {
    /// Sections are the global settings, developer options, user cookies,
    /// then every registered platform in registration order.
    pub fn new(document: ConfigDocument, registry: &PluginRegistry) -> Result<Self> {
        let mut sections = vec![
            sections::global_settings()?,
            sections::developer_settings()?,
            sections::user_cookies()?,
        ];
        sections.extend(registry.all_descriptors().map(|(_, d)| d.clone()));
        Ok(Self { document, sections })
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn sections(&self) -> &[PluginDescriptor] {
        &self.sections
    }

    /// Current value of every field, falling back to the field default.
    pub fn initial_values(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in self.sections.iter().flat_map(|s| s.fields()) {
            if values.contains_key(field.key()) {
                continue;
            }
            if let Some(value) = self.document.get(field.key()).or(field.default()) {
                values.insert(field.key().to_string(), value.clone());
            }
        }
        values
    }

    /// Validate `values` and write them into a copy of the document.
    ///
    /// Null values are skipped and keys that no form renders are left as
    /// they are. The result is meant for a whole-document PUT.
    pub fn apply(&self, values: &FormValues) -> Result<ConfigDocument> {
        let mut errors = ValidationErrors::new();
        for section in &self.sections {
            for error in section.validate(values) {
                if errors.message_for(&error.field).is_none() {
                    errors.push(error);
                }
            }
        }
        errors.into_result()?;

        let mut document = self.document.clone();
        for (key, value) in values.iter().filter(|(_, v)| !v.is_null()) {
            document.set(key, value.clone())?;
        }
        debug!(fields = values.len(), "Configuration form applied");
        Ok(document)
    }

    /// Adopt the saved document as the new baseline.
    pub fn commit(&mut self, document: ConfigDocument) {
        self.document = document;
    }
}
