//! Error responses
//!
//! Every error leaves the API as `{"error": "..."}` with a status from
//! the fixed table below. Endpoints with observed deviations (thread
//! creation answering 404 for a data conflict) override the status at
//! the call site via [`respond_with`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::errors::DomainError;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Default status for each domain kind.
pub fn status_for(err: DomainError) -> StatusCode {
    match err {
        DomainError::BadRequest | DomainError::BadArguments => StatusCode::BAD_REQUEST,
        DomainError::UserNotFound
        | DomainError::ForumNotFound
        | DomainError::ThreadNotFound
        | DomainError::PostNotFound => StatusCode::NOT_FOUND,
        DomainError::DataConflict | DomainError::AlreadyExists => StatusCode::CONFLICT,
        // EmptyParameters is an internal signal; reaching the delivery
        // layer means a use case failed to recover it.
        DomainError::EmptyParameters | DomainError::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// An error response with the default status for the kind.
pub fn error_response(err: DomainError) -> Response {
    respond_with(status_for(err), err)
}

/// An error body with an explicit status, for observed per-endpoint
/// deviations from the default table.
pub fn respond_with(status: StatusCode, err: DomainError) -> Response {
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
