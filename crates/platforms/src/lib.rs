//! Platform plugin descriptors for the recorder console.
//!
//! Every streaming platform the recorder supports exposes a set of settings
//! (quality, protocol, CDN, danmaku...). This crate describes those settings as
//! data so a generic form renderer can lay them out, and resolves which
//! platform owns a given stream URL.

pub mod descriptor;

pub use descriptor::default_registry;
pub use descriptor::plugin::{PluginDescriptor, PluginDescriptorBuilder};
pub use descriptor::dispatcher::PluginDispatcher;
pub use descriptor::error::DescriptorError;
pub use descriptor::field::{FieldError, FieldSpec, InputKind, Rule, SelectOption};
pub use descriptor::registry::{PluginEntry, PluginRegistry, PluginRegistryBuilder};
