//! Administration console core for an automatic stream recorder and uploader.
//!
//! Loads streamer entities and the space-wide configuration from the
//! recorder backend, resolves the platform plugin owning each stream url,
//! and reconciles flat form values back into the persisted shape.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
