//! Driver error translation
//!
//! The only place that inspects `tokio_postgres` failures. Constraint
//! violations are classified by SQLSTATE and constraint name into the
//! domain kinds; everything else is an opaque internal error, logged
//! here and reported upward without the driver text.

use tokio_postgres::error::SqlState;

use crate::errors::DomainError;

pub(crate) fn translate(err: tokio_postgres::Error) -> DomainError {
    if let Some(db) = err.as_db_error() {
        let code = db.code();
        if *code == SqlState::UNIQUE_VIOLATION {
            return DomainError::DataConflict;
        }
        if *code == SqlState::FOREIGN_KEY_VIOLATION {
            // A dangling author reference is the one foreign-key
            // failure the domain distinguishes.
            if db.constraint().is_some_and(|name| name.contains("author")) {
                return DomainError::UserNotFound;
            }
            return DomainError::DataConflict;
        }
        if *code == SqlState::NOT_NULL_VIOLATION {
            return DomainError::DataConflict;
        }
    }

    tracing::error!(error = %err, "unclassified storage failure");
    DomainError::Internal
}
