//! Domain error kinds
//!
//! One flat set of error kinds crosses every layer boundary: storage
//! translates driver failures into these, use cases remap them where the
//! domain demands it, and the delivery layer turns them into status codes.
//! Raw storage error text never reaches the caller.

use thiserror::Error;

/// Result alias used across the storage and use-case layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Error kinds understood by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed request body
    #[error("bad body of request")]
    BadRequest,

    /// Missing or invalid path/query parameter
    #[error("bad arguments of request")]
    BadArguments,

    /// No user with the given nickname
    #[error("user not found")]
    UserNotFound,

    /// No forum with the given slug
    #[error("forum not found")]
    ForumNotFound,

    /// No thread with the given slug or id
    #[error("thread not found")]
    ThreadNotFound,

    /// No post with the given id, or an unusable post query
    #[error("post not found")]
    PostNotFound,

    /// Storage constraint violation (duplicate slug/email, bad reference)
    #[error("data conflict")]
    DataConflict,

    /// A conflict that carries the existing record back to the caller
    #[error("already exists")]
    AlreadyExists,

    /// Internal signal: a partial update carried no fields. Always
    /// recovered locally into a plain read, never surfaced over HTTP.
    #[error("empty update parameters")]
    EmptyParameters,

    /// Unclassified storage failure
    #[error("internal error")]
    Internal,
}
