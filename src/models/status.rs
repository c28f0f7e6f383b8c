use serde::{Deserialize, Serialize};

/// Per-entity row counts reported by the service status endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub user: i64,
    pub forum: i64,
    pub thread: i64,
    pub post: i64,
}
