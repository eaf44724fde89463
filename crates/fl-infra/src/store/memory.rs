use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use fl_core::ids::ButtonId;
use fl_core::ports::{KnownButtonStoreError, KnownButtonStorePort};

/// Allow-list that lives for the process only.
#[derive(Debug, Default)]
pub struct InMemoryKnownButtonStore {
    ids: Mutex<BTreeSet<ButtonId>>,
}

impl InMemoryKnownButtonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: impl IntoIterator<Item = ButtonId>) -> Self {
        Self {
            ids: Mutex::new(ids.into_iter().collect()),
        }
    }
}

impl KnownButtonStorePort for InMemoryKnownButtonStore {
    fn list_all(&self) -> Result<Vec<ButtonId>, KnownButtonStoreError> {
        let ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(ids.iter().cloned().collect())
    }

    fn add(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError> {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone());
        Ok(())
    }

    fn remove(&self, id: &ButtonId) -> Result<(), KnownButtonStoreError> {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove_idempotent() {
        let store = InMemoryKnownButtonStore::new();
        let id = ButtonId::parse("00:11:22:33:44:55").unwrap();

        store.add(&id).unwrap();
        store.add(&id).unwrap();
        assert_eq!(store.list_all().unwrap(), vec![id.clone()]);

        store.remove(&id).unwrap();
        store.remove(&id).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_with_ids_seeds_store() {
        let id = ButtonId::parse("0a:0b:0c:0d:0e:0f").unwrap();
        let store = InMemoryKnownButtonStore::with_ids([id.clone()]);
        assert_eq!(store.list_all().unwrap(), vec![id]);
    }
}
