//! Binding parser error types.

use thiserror::Error;

/// Fatal binding document errors. Shape problems inside an otherwise
/// well-formed document are diagnostics, not errors.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("binding document is not valid YAML: {0}")]
    Document(#[from] serde_yaml::Error),
}

/// Result type for binding operations.
pub type BindingResult<T> = Result<T, BindingError>;
