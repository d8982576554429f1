//! Streamer domain module.

mod entity;
mod status;

pub use entity::{BASE_FIELD_NAMES, HOOK_FIELDS, RUN_ONLY_HOOKS, StreamerEntity, is_base_field};
pub use status::StreamerStatus;
