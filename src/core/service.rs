//! Persistence trait for site records

use crate::core::field::SiteField;
use crate::core::query::SiteOrder;
use crate::core::site::{Site, SiteFields, SitePatch};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing site records
///
/// Implementations accept exactly what the validation pipeline produces:
/// canonical [`SiteFields`] on insert, a [`SitePatch`] on update. The
/// service is agnostic to the underlying storage mechanism and provides no
/// concurrency control beyond last-write-wins.
#[async_trait]
pub trait SiteService: Send + Sync {
    /// Insert a new record, assigning its id and timestamps
    async fn insert(&self, fields: SiteFields, created_by: Option<Uuid>) -> Result<Site>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Site>>;

    /// List all records in the given order
    async fn list(&self, order: &SiteOrder) -> Result<Vec<Site>>;

    /// Apply a partial update; `None` when the record does not exist
    ///
    /// An empty patch returns the record untouched.
    async fn update(&self, id: &Uuid, patch: SitePatch) -> Result<Option<Site>>;

    /// Physically delete a record; `false` when it did not exist
    async fn delete(&self, id: &Uuid) -> Result<bool>;

    /// Records whose field equals the given text exactly
    async fn find_by(&self, field: SiteField, value: &str) -> Result<Vec<Site>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The trait can be used in generic contexts
    #[allow(dead_code)]
    async fn generic_insert<S>(service: &S, fields: SiteFields) -> Result<Site>
    where
        S: SiteService + ?Sized,
    {
        service.insert(fields, None).await
    }

    #[test]
    fn test_trait_is_object_safe() {
        fn assert_dyn(_: Option<&dyn SiteService>) {}
        assert_dyn(None);
    }
}
