//! Facade registry.
//!
//! Creates, caches, and tears down one [`OrgFacade`] per organization ID
//! against the active storage connection. An explicit instance owned by the
//! caller, usually behind an `Arc`; tests run isolated registries side by
//! side.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::facade::OrgFacade;
use crate::model::OrgId;
use crate::store::DirectoryStore;

/// Facade registry with a swappable storage connection.
///
/// **Concurrency invariants**:
/// - Racing `get_instance` calls for one ID observe the same `Arc`, never
///   two facades and never a half-built one.
/// - Creation and removal of one ID serialize on a per-ID guard; unrelated
///   IDs proceed independently.
/// - No registry-wide lock is held across a backend call.
pub struct FacadeRegistry {
    connection: RwLock<Option<Arc<dyn DirectoryStore>>>,
    facades: RwLock<HashMap<OrgId, Arc<OrgFacade>>>,
    guards: Mutex<HashMap<OrgId, Arc<Mutex<()>>>>,
}

impl FacadeRegistry {
    /// Create a registry with no storage connection. Every lookup fails
    /// with a configuration error until one is set.
    pub fn new() -> Self {
        Self {
            connection: RwLock::new(None),
            facades: RwLock::new(HashMap::new()),
            guards: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry with the given storage connection.
    pub fn with_connection(connection: Arc<dyn DirectoryStore>) -> Self {
        Self {
            connection: RwLock::new(Some(connection)),
            facades: RwLock::new(HashMap::new()),
            guards: Mutex::new(HashMap::new()),
        }
    }

    /// Replace (or clear) the active storage connection.
    ///
    /// Cached facades keep the connection captured at their creation; the
    /// new connection applies to facades created afterwards.
    pub async fn set_connection(&self, connection: Option<Arc<dyn DirectoryStore>>) {
        let mut slot = self.connection.write().await;
        *slot = connection;
        info!(configured = slot.is_some(), "storage connection replaced");
    }

    /// Snapshot of the current storage connection.
    pub async fn connection(&self) -> Result<Arc<dyn DirectoryStore>> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::Configuration("no storage connection set".to_string()))
    }

    /// Get the facade for an organization, creating and caching it on
    /// first use.
    ///
    /// Fails with [`Error::Configuration`] when no connection is set and
    /// with [`Error::OrgNotFound`] when the backend has no such
    /// organization.
    pub async fn get_instance(&self, org_id: OrgId) -> Result<Arc<OrgFacade>> {
        if let Some(facade) = self.facades.read().await.get(&org_id) {
            return Ok(facade.clone());
        }

        let connection = self.connection().await?;

        let guard = self.guard_for(org_id).await;
        let _held = guard.lock().await;

        // the facade may have appeared while we waited for the guard
        if let Some(facade) = self.facades.read().await.get(&org_id) {
            return Ok(facade.clone());
        }

        // backend I/O runs under the per-ID guard only
        let found = connection.get_organization(org_id).await?.is_some();
        if !found {
            drop(_held);
            self.drop_guard_if_unused(org_id, &guard).await;
            return Err(Error::OrgNotFound(org_id));
        }

        let facade = Arc::new(OrgFacade::new(org_id, connection));
        let mut facades = self.facades.write().await;
        let facade = facades.entry(org_id).or_insert(facade).clone();
        debug!(org_id = org_id, "facade created");
        Ok(facade)
    }

    /// Remove an organization: its stored data and its cached facade, under
    /// the same per-ID guard creation uses. `true` iff anything was
    /// removed. Afterwards `get_instance` fails with
    /// [`Error::OrgNotFound`] until the ID is reintroduced in the backend.
    pub async fn remove_organization(&self, org_id: OrgId) -> Result<bool> {
        let connection = self.connection().await?;

        let guard = self.guard_for(org_id).await;
        let removed = {
            let _held = guard.lock().await;
            let removed_data = connection.remove_organization(org_id).await?;
            let removed_facade = self.facades.write().await.remove(&org_id).is_some();
            removed_data || removed_facade
        };
        self.drop_guard_if_unused(org_id, &guard).await;

        if removed {
            info!(org_id = org_id, "organization removed");
        }
        Ok(removed)
    }

    /// Number of currently cached facades.
    pub async fn cached_count(&self) -> usize {
        self.facades.read().await.len()
    }

    async fn guard_for(&self, org_id: OrgId) -> Arc<Mutex<()>> {
        let mut guards = self.guards.lock().await;
        guards.entry(org_id).or_default().clone()
    }

    /// Drop a guard entry nobody waits on. Guards are only ever cloned
    /// under the map lock, so a strong count of two (the map's reference
    /// plus the caller's) proves the entry is idle.
    async fn drop_guard_if_unused(&self, org_id: OrgId, guard: &Arc<Mutex<()>>) {
        let mut guards = self.guards.lock().await;
        if let Some(current) = guards.get(&org_id) {
            if Arc::ptr_eq(current, guard) && Arc::strong_count(current) == 2 {
                guards.remove(&org_id);
            }
        }
    }
}

impl Default for FacadeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use futures::future::join_all;

    fn seeded_registry() -> FacadeRegistry {
        FacadeRegistry::with_connection(Arc::new(MemoryStore::with_sample_data()))
    }

    #[tokio::test]
    async fn test_no_connection_fails_fast() {
        let registry = FacadeRegistry::new();
        let err = registry.get_instance(1).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = registry.remove_organization(1).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unknown_org_fails_with_not_found() {
        let registry = seeded_registry();
        let err = registry.get_instance(999).await.unwrap_err();
        assert!(matches!(err, Error::OrgNotFound(999)));
        assert_eq!(registry.cached_count().await, 0);
    }

    #[tokio::test]
    async fn test_instance_is_cached() {
        let registry = seeded_registry();
        let first = registry.get_instance(1).await.unwrap();
        let second = registry.get_instance(1).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.cached_count().await, 1);

        let other = registry.get_instance(2).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(registry.cached_count().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_instance() {
        let registry = Arc::new(seeded_registry());

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.get_instance(1).await.unwrap() })
            })
            .collect();

        let facades: Vec<Arc<OrgFacade>> = join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        for facade in &facades[1..] {
            assert!(Arc::ptr_eq(&facades[0], facade));
        }
        assert_eq!(registry.cached_count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_then_lookup_fails() {
        let registry = seeded_registry();
        let _facade = registry.get_instance(1).await.unwrap();

        assert!(registry.remove_organization(1).await.unwrap());
        assert_eq!(registry.cached_count().await, 0);
        assert!(matches!(
            registry.get_instance(1).await.unwrap_err(),
            Error::OrgNotFound(1)
        ));

        // second removal has nothing left to remove
        assert!(!registry.remove_organization(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_recreation_after_reintroduction_is_fresh() {
        let store = Arc::new(MemoryStore::with_sample_data());
        let registry = FacadeRegistry::with_connection(store.clone());

        let before = registry.get_instance(2).await.unwrap();
        assert!(registry.remove_organization(2).await.unwrap());

        let reborn = crate::store::seed::sample_organizations().remove(1);
        assert!(store.insert_organization(&reborn).await.unwrap());

        let after = registry.get_instance(2).await.unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(after.get_organization().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_swapping_connection_affects_new_facades_only() {
        let registry = seeded_registry();
        let old_facade = registry.get_instance(1).await.unwrap();

        registry.set_connection(None).await;
        // cached facade still serves reads through its captured connection
        assert!(old_facade.get_organization().await.unwrap().is_some());
        // new lookups fail until a connection is set again
        assert!(matches!(
            registry.get_instance(2).await.unwrap_err(),
            Error::Configuration(_)
        ));

        registry
            .set_connection(Some(Arc::new(MemoryStore::with_sample_data())))
            .await;
        assert!(registry.get_instance(2).await.is_ok());
    }

    #[tokio::test]
    async fn test_guard_map_does_not_accumulate_misses() {
        let registry = seeded_registry();
        for org_id in 100..110 {
            assert!(registry.get_instance(org_id).await.is_err());
        }
        let guards = registry.guards.lock().await;
        assert!(guards.is_empty());
    }
}
