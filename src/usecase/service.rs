use crate::errors::DomainResult;
use crate::models::ServiceStatus;
use crate::storage::ServiceStore;

/// Administrative pass-throughs: whole-base truncation and per-entity
/// row counts.
pub struct ServiceUseCase<S> {
    store: S,
}

impl<S: ServiceStore> ServiceUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn clear(&self) -> DomainResult<()> {
        self.store.truncate_all().await
    }

    pub async fn status(&self) -> DomainResult<ServiceStatus> {
        self.store.status().await
    }
}
