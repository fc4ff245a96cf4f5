//! Model construction errors.

/// Errors raised when building a [`CspModel`](super::CspModel).
///
/// All of these are detected at construction time, never during search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("constraint '{constraint}' references undeclared variable '{variable}'")]
    UnknownVariable { constraint: String, variable: String },

    #[error("variable '{0}' has an empty domain")]
    EmptyDomain(String),

    #[error("variable '{0}' is declared more than once")]
    DuplicateVariable(String),
}
