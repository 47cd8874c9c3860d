//! Domain-level error type shared across the workspace.

use thiserror::Error;

/// Errors produced by domain logic.
///
/// The API crate maps these onto HTTP status codes; domain code only cares
/// about the category and the human-readable message.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity lookup failed.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Input failed a domain validation rule.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}
