//! Configuration domain module.

mod document;
mod reconcile;

pub use document::{ConfigDocument, get_path, merge_maps, set_path};
pub use reconcile::{FormValues, OVERRIDE_TEXT_KEY, collect, collect_entity, expand};
