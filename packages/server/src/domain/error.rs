//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId too long error
    #[error("ConnectionId cannot exceed {max} characters (got {actual})")]
    ConnectionIdTooLong { max: usize, actual: usize },

    /// SentAt is not an ISO-8601 datetime
    #[error("SentAt must be an ISO-8601 datetime (got: {0})")]
    SentAtInvalid(String),
}

/// Errors related to the presence registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A profile is already registered under this connection id
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// Errors returned by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
