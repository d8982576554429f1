//! Per-streamer override editing session.

use platforms_settings::descriptor::sections;
use platforms_settings::{PluginDescriptor, PluginDispatcher};
use serde_json::Value;
use tracing::debug;

use crate::domain::config::{FormValues, OVERRIDE_TEXT_KEY, collect_entity, expand, merge_maps};
use crate::domain::{HookAction, StreamerEntity};
use crate::error::ValidationErrors;
use crate::Result;

/// Edits one streamer entity through a flat form.
///
/// The platform plugin is resolved from the current url on every call, so
/// changing the url in the form switches the rendered plugin immediately.
#[derive(Debug, Clone)]
pub struct OverrideEditor {
    dispatcher: PluginDispatcher,
    download: PluginDescriptor,
    entity: StreamerEntity,
    url: String,
}

impl OverrideEditor {
    pub fn new(dispatcher: PluginDispatcher, entity: StreamerEntity) -> Result<Self> {
        let url = entity.url.clone();
        Ok(Self {
            dispatcher,
            download: sections::download_settings()?,
            entity,
            url,
        })
    }

    /// Start editing a streamer that does not exist yet.
    pub fn create(dispatcher: PluginDispatcher) -> Result<Self> {
        Self::new(dispatcher, StreamerEntity::new("", ""))
    }

    pub fn entity(&self) -> &StreamerEntity {
        &self.entity
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Track the url currently typed in the form.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// The plugin owning the current url, if any.
    pub fn plugin(&self) -> Option<&PluginDescriptor> {
        self.dispatcher.resolve(self.url.trim())
    }

    fn sections_for<'a>(&'a self, url: &str) -> Vec<&'a PluginDescriptor> {
        let mut sections = vec![&self.download];
        sections.extend(self.dispatcher.resolve(url.trim()));
        sections
    }

    /// Sections to render: the download settings, then the resolved plugin.
    pub fn sections(&self) -> Vec<&PluginDescriptor> {
        self.sections_for(&self.url)
    }

    /// Form values for the current entity, deep-merged over the defaults of
    /// every rendered field.
    pub fn initial_values(&self) -> Result<FormValues> {
        let mut values = FormValues::new();
        for section in self.sections() {
            merge_maps(&mut values, section.defaults());
        }
        merge_maps(&mut values, expand(&self.entity)?);
        Ok(values)
    }

    /// The current override as pretty-printed JSON, for the raw editor.
    pub fn override_text(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Value::Object(self.entity.override_map()))?)
    }

    /// Validate and reconcile submitted values into a wire-ready entity.
    ///
    /// The editor's own state is left untouched; call [`Self::commit`] once
    /// the backend accepted the result.
    pub fn submit(&self, values: &FormValues) -> Result<StreamerEntity> {
        let url = values
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or(&self.url);

        let mut errors = ValidationErrors::new();
        for section in self.sections_for(url) {
            errors.extend(section.validate(values));
        }
        errors.into_result()?;

        let mut entity = collect_entity(values, &self.entity.override_map())?;
        if entity.id.is_none() {
            entity.id = self.entity.id;
        }
        if self.entity.is_new() && entity.postprocessor.is_none() {
            entity.postprocessor = Some(vec![HookAction::rm()]);
        }
        entity.normalize()?;

        debug!(
            url = %entity.url,
            override_keys = entity.override_config.as_ref().map_or(0, |o| o.len()),
            raw_override = values.get(OVERRIDE_TEXT_KEY).is_some_and(|v| !v.is_null()),
            "Streamer form reconciled"
        );
        Ok(entity)
    }

    /// Adopt the saved entity as the new editing baseline.
    pub fn commit(&mut self, entity: StreamerEntity) {
        self.url = entity.url.clone();
        self.entity = entity;
    }
}
