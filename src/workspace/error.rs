//! Error type for model operations.

use thiserror::Error;

/// Errors raised by the workspace model when the parser asks it to do
/// something semantically invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An element with the same name already exists in the same scope.
    #[error("A {kind} named \"{name}\" already exists")]
    DuplicateName { kind: &'static str, name: String },

    /// An element of one kind was used where another kind is required.
    #[error("The element \"{name}\" is not a {expected}")]
    TypeMismatch { expected: &'static str, name: String },

    /// A view key was used twice.
    #[error("A view with the key \"{0}\" already exists")]
    DuplicateViewKey(String),

    /// A field value failed validation.
    #[error("Invalid {what}: {value}")]
    InvalidValue { what: &'static str, value: String },
}

impl ModelError {
    pub fn invalid_value(what: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            what,
            value: value.into(),
        }
    }
}
