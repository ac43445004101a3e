//! Domain error types.

use thiserror::Error;

/// Failure reported by a persistence gateway.
///
/// The todo service never translates these; they reach the caller as-is.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Todo {0} no longer exists")]
    NotFound(i64),
}
