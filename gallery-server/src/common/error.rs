//! Unified Error Handling
//!
//! Application-wide error type for the economy core. Engines raise these and
//! never swallow them; the boundary layer formats them into the
//! `shared::response::ApiResponse` envelope with the message passed through
//! verbatim.

use shared::response::ErrorCode;
use tracing::error;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Referenced user/series/copyright/share/fragment does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Balance, fragment count or share capacity below the required threshold
    #[error("Insufficient resource: {0}")]
    Insufficient(String),

    /// Daily limit, one-shot reward or threshold gate already consumed
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Rejected parameter (self-appreciation, short watch, bad counts, bad ids)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Envelope code for the boundary layer
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Insufficient(_) => ErrorCode::Insufficient,
            AppError::QuotaExceeded(_) => ErrorCode::QuotaExceeded,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                ErrorCode::Database
            }
        }
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(err: surrealdb::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<crate::db::repository::RepoError> for AppError {
    fn from(err: crate::db::repository::RepoError) -> Self {
        use crate::db::repository::RepoError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::InvalidInput(msg),
            RepoError::Validation(msg) => AppError::InvalidInput(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for engine operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_a_stable_envelope_code() {
        assert_eq!(AppError::NotFound("x".into()).code(), ErrorCode::NotFound);
        assert_eq!(
            AppError::Insufficient("x".into()).code(),
            ErrorCode::Insufficient
        );
        assert_eq!(
            AppError::QuotaExceeded("x".into()).code(),
            ErrorCode::QuotaExceeded
        );
        assert_eq!(
            AppError::InvalidInput("x".into()).code(),
            ErrorCode::InvalidInput
        );
        assert_eq!(AppError::Database("x".into()).code(), ErrorCode::Database);
    }

    #[test]
    fn messages_survive_the_display_round_trip() {
        let err = AppError::QuotaExceeded("Daily appreciation limit of 10 reached".into());
        assert_eq!(
            err.to_string(),
            "Quota exceeded: Daily appreciation limit of 10 reached"
        );
    }
}
