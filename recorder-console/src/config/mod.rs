//! Console settings.

mod settings;

pub use settings::{ConsoleSettings, DEFAULT_API_SERVER, DEFAULT_REQUEST_TIMEOUT_SECS};
