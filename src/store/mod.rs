pub mod models;

pub use models::{SavedDesign, MAX_SAVED_IMAGES};

use std::sync::Mutex;

/// Slot in the settings table holding the serialized design list.
pub const SAVED_DESIGNS_KEY: &str = "decospace_saved_designs";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Backend(String),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal key-value capability the store persists through. Implemented by
/// the SQLite settings table in production and by an in-memory map in tests.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Ordered collection of saved designs, most recent first. Every mutation
/// rewrites the persisted slot in full so the two copies never diverge.
pub struct SavedDesignStore {
    slot: Box<dyn KeyValueStore>,
    designs: Mutex<Vec<SavedDesign>>,
}

impl SavedDesignStore {
    /// Open the store and adopt whatever the slot holds. An unreadable or
    /// corrupt slot counts as an empty store, never as an error.
    pub fn open(slot: Box<dyn KeyValueStore>) -> Self {
        let designs = match slot.get(SAVED_DESIGNS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SavedDesign>>(&raw) {
                Ok(designs) => designs,
                Err(e) => {
                    tracing::warn!(error = %e, "saved designs slot is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "saved designs slot is unreadable, starting empty");
                Vec::new()
            }
        };
        Self {
            slot,
            designs: Mutex::new(designs),
        }
    }

    /// Add a design at the front and rewrite the slot. A failed write drops
    /// the insert again so memory matches what is on disk.
    pub fn prepend(&self, design: SavedDesign) -> Result<(), StoreError> {
        let mut designs = self.designs.lock().unwrap();
        designs.insert(0, design);

        let serialized = match serde_json::to_string(&*designs) {
            Ok(serialized) => serialized,
            Err(e) => {
                designs.remove(0);
                return Err(e.into());
            }
        };
        if let Err(e) = self.slot.set(SAVED_DESIGNS_KEY, &serialized) {
            designs.remove(0);
            return Err(e);
        }
        Ok(())
    }

    pub fn list(&self) -> Vec<SavedDesign> {
        self.designs.lock().unwrap().clone()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{MemorySlot, ReadOnlySlot};
    use super::*;
    use std::sync::Arc;

    fn design(summary: &str) -> SavedDesign {
        SavedDesign {
            id: uuid::Uuid::new_v4().to_string(),
            room_type: "Living room".into(),
            dimensions: "12x15".into(),
            style: "Modern cozy".into(),
            budget: "500".into(),
            vibe: String::new(),
            summary: summary.into(),
            images: vec!["a.png".into()],
            created_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_open_empty_slot() {
        let store = SavedDesignStore::open(Box::new(MemorySlot::default()));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_open_corrupt_slot_yields_empty_list() {
        let slot = MemorySlot::with(SAVED_DESIGNS_KEY, "not json");
        let store = SavedDesignStore::open(Box::new(slot));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_open_non_array_slot_yields_empty_list() {
        let slot = MemorySlot::with(SAVED_DESIGNS_KEY, r#"{"summary": "lone object"}"#);
        let store = SavedDesignStore::open(Box::new(slot));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_prepend_writes_through() {
        let slot = Arc::new(MemorySlot::default());
        let store = SavedDesignStore::open(Box::new(slot.clone()));

        store.prepend(design("first")).unwrap();

        let raw = slot.raw(SAVED_DESIGNS_KEY).unwrap();
        assert_eq!(raw, serde_json::to_string(&store.list()).unwrap());
    }

    #[test]
    fn test_prepend_orders_most_recent_first() {
        let store = SavedDesignStore::open(Box::new(MemorySlot::default()));
        store.prepend(design("first")).unwrap();
        store.prepend(design("second")).unwrap();

        let designs = store.list();
        assert_eq!(designs.len(), 2);
        assert_eq!(designs[0].summary, "second");
        assert_eq!(designs[1].summary, "first");
    }

    #[test]
    fn test_reopen_reproduces_sequence() {
        let slot = Arc::new(MemorySlot::default());
        let store = SavedDesignStore::open(Box::new(slot.clone()));
        store.prepend(design("first")).unwrap();
        store.prepend(design("second")).unwrap();

        let reopened = SavedDesignStore::open(Box::new(slot));
        assert_eq!(reopened.list(), store.list());
    }

    #[test]
    fn test_failed_write_rolls_back_memory() {
        let store = SavedDesignStore::open(Box::new(ReadOnlySlot));
        assert!(store.prepend(design("first")).is_err());
        assert!(store.list().is_empty());
    }
}
