//! REST delivery layer
//!
//! Axum routes bound to the use cases. Handlers parse untyped path and
//! query parameters, decode JSON bodies by hand so malformed input maps
//! to the domain's 400 body, and translate each outcome into the status
//! table the API promises.

pub mod errors;
pub mod server;

mod forum_routes;
mod post_routes;
mod service_routes;
mod thread_routes;
mod user_routes;

pub use server::{router, AppState, SharedApp};

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::errors::{DomainError, DomainResult};

/// Decode a JSON body; any parse failure is the caller's bad request.
pub(crate) fn decode<T: DeserializeOwned>(body: &Bytes) -> DomainResult<T> {
    serde_json::from_slice(body).map_err(|_| DomainError::BadRequest)
}
