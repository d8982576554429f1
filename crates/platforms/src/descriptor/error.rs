use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("empty field key in plugin `{0}`")]
    EmptyFieldKey(String),
    #[error("duplicate field `{field}` in plugin `{plugin}`")]
    DuplicateField { plugin: String, field: String },
}
