//! Editing sessions built on the domain transforms.

mod config_editor;
mod override_editor;

pub use config_editor::ConfigEditor;
pub use override_editor::OverrideEditor;
