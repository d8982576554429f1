use std::sync::Arc;

use tracing::debug;

use super::plugin::PluginDescriptor;
use super::registry::PluginRegistry;

/// Resolves a stream URL to the plugin that owns it.
///
/// Resolution only depends on the injected registry, so the same URL always
/// resolves to the same descriptor.
#[derive(Debug, Clone)]
pub struct PluginDispatcher {
    registry: Arc<PluginRegistry>,
}

impl PluginDispatcher {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Return the descriptor of the first registered pattern matching `url`.
    ///
    /// `None` means no platform plugin applies; callers render the generic
    /// fields only.
    pub fn resolve(&self, url: &str) -> Option<&PluginDescriptor> {
        let resolved = self
            .registry
            .entries()
            .iter()
            .find(|entry| entry.matches(url))
            .map(|entry| entry.descriptor());

        match resolved {
            Some(descriptor) => debug!(url, plugin = descriptor.name(), "Resolved platform plugin"),
            None => debug!(url, "No platform plugin matches url"),
        }
        resolved
    }
}

impl From<PluginRegistry> for PluginDispatcher {
    fn from(registry: PluginRegistry) -> Self {
        Self::new(Arc::new(registry))
    }
}
