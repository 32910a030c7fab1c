//! In-memory implementation of SiteService for testing and development

use crate::core::error::StorageError;
use crate::core::field::SiteField;
use crate::core::query::SiteOrder;
use crate::core::service::SiteService;
use crate::core::site::{Site, SiteFields, SitePatch};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

fn poisoned<T>(e: PoisonError<T>) -> StorageError {
    StorageError::LockPoisoned {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
}

/// In-memory site service implementation
///
/// Uses RwLock for thread-safe access. Clones share the same records.
#[derive(Clone, Default)]
pub struct InMemorySiteService {
    sites: Arc<RwLock<HashMap<Uuid, Site>>>,
}

impl InMemorySiteService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize> {
        Ok(self.sites.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SiteService for InMemorySiteService {
    async fn insert(&self, fields: SiteFields, created_by: Option<Uuid>) -> Result<Site> {
        let site = Site::new(fields, created_by);

        let mut sites = self.sites.write().map_err(poisoned)?;
        sites.insert(site.id, site.clone());

        Ok(site)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Site>> {
        let sites = self.sites.read().map_err(poisoned)?;

        Ok(sites.get(id).cloned())
    }

    async fn list(&self, order: &SiteOrder) -> Result<Vec<Site>> {
        let mut listed: Vec<Site> = {
            let sites = self.sites.read().map_err(poisoned)?;
            sites.values().cloned().collect()
        };

        // HashMap order is arbitrary; settle ties by creation before the requested order
        listed.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        order.sort(&mut listed);

        Ok(listed)
    }

    async fn update(&self, id: &Uuid, patch: SitePatch) -> Result<Option<Site>> {
        let mut sites = self.sites.write().map_err(poisoned)?;

        Ok(sites.get_mut(id).map(|site| {
            site.apply(&patch);
            site.clone()
        }))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut sites = self.sites.write().map_err(poisoned)?;

        Ok(sites.remove(id).is_some())
    }

    async fn find_by(&self, field: SiteField, value: &str) -> Result<Vec<Site>> {
        let sites = self.sites.read().map_err(poisoned)?;

        let mut found: Vec<Site> = sites
            .values()
            .filter(|site| site.fields.get(field).as_text() == Some(value))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(found)
    }
}
