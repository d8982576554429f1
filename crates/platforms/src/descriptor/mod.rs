pub mod dispatcher;
pub mod error;
pub mod field;
pub mod platforms;
pub mod plugin;
pub mod registry;
pub mod sections;
mod default;

pub use default::default_registry;
