use super::errors::KnownButtonStoreError;
use crate::ids::ButtonId;

/// Durable allow-list of previously verified buttons.
pub trait KnownButtonStorePort: Send + Sync {
    /// Every stored identity, in no particular order.
    fn list_all(&self) -> Result<Vec<ButtonId>, KnownButtonStoreError>;

    /// Add an identity. Must be idempotent (no-op if already present).
    fn add(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError>;

    /// Remove an identity. Must be idempotent (no-op if absent).
    fn remove(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError>;
}

#[cfg(test)]
mockall::mock! {
    pub KnownButtonStore {}

    impl KnownButtonStorePort for KnownButtonStore {
        fn list_all(&self) -> Result<Vec<ButtonId>, KnownButtonStoreError>;
        fn add(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError>;
        fn remove(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_store_errors_surface_through_trait_object() {
        let mut store = MockKnownButtonStore::new();
        store
            .expect_list_all()
            .returning(|| Err(KnownButtonStoreError::Storage("database is locked".into())));
        let store: Arc<dyn KnownButtonStorePort> = Arc::new(store);

        let err = store.list_all().unwrap_err();
        assert_eq!(err.to_string(), "known button store failed: database is locked");
    }
}
