//! Per-application build locks.

use std::sync::Arc;

use dashmap::DashMap;
use shipyard_core::ApplicationId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One lock per application id, created on first use and kept for the
/// registry's lifetime. The number of locks is bounded by the number of
/// distinct applications, not builds.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<ApplicationId, Arc<Mutex<()>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for `id`; the same handle for every call with the same id.
    pub fn handle(&self, id: &ApplicationId) -> Arc<Mutex<()>> {
        Arc::clone(&self.locks.entry(id.clone()).or_default())
    }

    /// Wait for exclusive access to `id`. Released when the guard drops.
    pub async fn acquire(&self, id: &ApplicationId) -> OwnedMutexGuard<()> {
        let lock = self.handle(id);
        lock.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str) -> ApplicationId {
        ApplicationId::new(id).unwrap()
    }

    #[test]
    fn same_id_shares_one_lock() {
        let registry = LockRegistry::new();
        assert!(registry.is_empty());

        let a = registry.handle(&app("web"));
        let b = registry.handle(&app("web"));
        let c = registry.handle(&app("api"));

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn held_lock_blocks_same_id_only() {
        let registry = LockRegistry::new();
        let _web = registry.acquire(&app("web")).await;

        assert!(registry.handle(&app("web")).try_lock().is_err());
        assert!(registry.handle(&app("api")).try_lock().is_ok());
    }

    #[tokio::test]
    async fn dropping_guard_releases() {
        let registry = LockRegistry::new();
        drop(registry.acquire(&app("web")).await);

        assert!(registry.handle(&app("web")).try_lock().is_ok());
    }
}
