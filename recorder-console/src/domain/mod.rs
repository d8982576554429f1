//! Domain layer of the recorder console.
//!
//! Entities as the backend persists them, plus the pure transforms the
//! editors run over them.

pub mod config;
pub mod streamer;
pub mod studio;
pub mod value_objects;

pub use config::{ConfigDocument, FormValues};
pub use streamer::{BASE_FIELD_NAMES, StreamerEntity, StreamerStatus};
pub use studio::{Credit, StudioTemplate};
pub use value_objects::{HookAction, HookCommand, TimeRange};
