//! Built-in platform plugins.
//!
//! Each module exports the `URL_REGEX` that claims stream URLs for the
//! platform and a `descriptor()` describing its settings.

pub mod bilibili;
pub mod cc;
pub mod douyin;
pub mod douyu;
pub mod huya;
pub mod kilakila;
pub mod twitcasting;
pub mod twitch;
pub mod youtube;
