//! Upload template domain module.

mod template;

pub use template::{
    COPYRIGHT_ORIGINAL, COPYRIGHT_REPOST, Credit, MAX_DELAY_SECS, MAX_DESCRIPTION_CHARS, MAX_TAG_CHARS,
    MAX_TAGS, MIN_DELAY_SECS, StudioTemplate,
};
