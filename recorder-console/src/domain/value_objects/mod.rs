//! Domain value objects.
//!
//! Both types have a form shape and a persisted shape; the serde adapters
//! (`hooks::hook_list`, `time_range::wire`) convert between them.

pub mod hooks;
pub mod time_range;

pub use hooks::{HookAction, HookCommand, InvalidHook, WireHook, hooks_from_value, to_ui_shape, to_wire_shape};
pub use time_range::TimeRange;
