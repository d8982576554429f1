//! Ordered plugin registry.
//!
//! The registry is assembled once through [`PluginRegistryBuilder`] and is
//! immutable afterwards. Registration order is significant: dispatch tries
//! the patterns in that order and the first match wins, so more specific
//! patterns must be registered before broader ones.

use std::collections::BTreeSet;

use regex::Regex;

use super::plugin::PluginDescriptor;
use super::error::DescriptorError;

#[derive(Debug, Clone)]
pub struct PluginEntry {
    pattern: Regex,
    descriptor: PluginDescriptor,
}

impl PluginEntry {
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    entries: Vec<PluginEntry>,
}

impl PluginRegistry {
    pub fn builder() -> PluginRegistryBuilder {
        PluginRegistryBuilder::default()
    }

    /// All `(pattern, descriptor)` pairs in registration order.
    pub fn all_descriptors(&self) -> impl Iterator<Item = (&Regex, &PluginDescriptor)> {
        self.entries.iter().map(|e| (&e.pattern, &e.descriptor))
    }

    pub fn entries(&self) -> &[PluginEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a descriptor by plugin name.
    pub fn find(&self, name: &str) -> Option<&PluginDescriptor> {
        self.entries
            .iter()
            .map(|e| &e.descriptor)
            .find(|d| d.name() == name)
    }

    /// Union of the field keys of every registered descriptor.
    pub fn field_keys(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|e| e.descriptor.field_keys())
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct PluginRegistryBuilder {
    entries: Vec<PluginEntry>,
}

impl PluginRegistryBuilder {
    pub fn register(mut self, pattern: Regex, descriptor: PluginDescriptor) -> Self {
        self.entries.push(PluginEntry {
            pattern,
            descriptor,
        });
        self
    }

    /// Compile `pattern` and register it.
    pub fn register_pattern(
        self,
        pattern: &str,
        descriptor: PluginDescriptor,
    ) -> Result<Self, DescriptorError> {
        Ok(self.register(Regex::new(pattern)?, descriptor))
    }

    pub fn build(self) -> PluginRegistry {
        PluginRegistry {
            entries: self.entries,
        }
    }
}
