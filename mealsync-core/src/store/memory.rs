use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use super::{Collection, RowStore, UpsertBatch};
use crate::error::StoreError;
use crate::types::{Category, Recipe};

/// In-memory store with the same upsert semantics as the real destination.
///
/// Used by tests and `--dry-run`. `rejecting` makes every upsert into a
/// collection fail, to simulate a persistence error.
#[derive(Debug, Default)]
pub struct MemoryStore {
    categories: RwLock<BTreeMap<String, Category>>,
    recipes: RwLock<BTreeMap<i64, Recipe>>,
    rejected: HashSet<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every upsert into `collection`.
    pub fn rejecting(mut self, collection: Collection) -> Self {
        self.rejected.insert(collection);
        self
    }

    // Readers below are test helpers and panic on a poisoned lock.

    pub fn categories(&self) -> Vec<Category> {
        self.categories
            .read()
            .expect("categories lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.recipes
            .read()
            .expect("recipes lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn recipe(&self, api_id: i64) -> Option<Recipe> {
        self.recipes
            .read()
            .expect("recipes lock poisoned")
            .get(&api_id)
            .cloned()
    }

    pub fn category(&self, api_id: &str) -> Option<Category> {
        self.categories
            .read()
            .expect("categories lock poisoned")
            .get(api_id)
            .cloned()
    }
}

fn poisoned(collection: Collection) -> StoreError {
    StoreError::Database(format!("{collection} lock poisoned"))
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn upsert(&self, batch: UpsertBatch<'_>) -> Result<usize, StoreError> {
        let collection = batch.collection();
        if batch.is_empty() {
            return Ok(0);
        }
        if self.rejected.contains(&collection) {
            return Err(StoreError::Rejected {
                collection,
                status: 500,
                message: "rejected by MemoryStore".to_string(),
            });
        }

        match batch {
            UpsertBatch::Categories(rows) => {
                let mut table = self.categories.write().map_err(|_| poisoned(collection))?;
                for row in rows {
                    table.insert(row.api_id.clone(), row.clone());
                }
                Ok(rows.len())
            }
            UpsertBatch::Recipes(rows) => {
                let mut table = self.recipes.write().map_err(|_| poisoned(collection))?;
                for row in rows {
                    table.insert(row.api_id, row.clone());
                }
                Ok(rows.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(api_id: &str, name: &str) -> Category {
        Category {
            api_id: api_id.to_string(),
            name: name.to_string(),
            thumbnail_url: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_overwrites_matching_api_id() {
        let store = MemoryStore::new();

        let first = [category("1", "Beef"), category("2", "Chicken")];
        assert_eq!(store.upsert(UpsertBatch::Categories(&first)).await.unwrap(), 2);

        let second = [category("1", "Beef & Veal")];
        assert_eq!(store.upsert(UpsertBatch::Categories(&second)).await.unwrap(), 1);

        let rows = store.categories();
        assert_eq!(rows.len(), 2);
        assert_eq!(store.category("1").unwrap().name, "Beef & Veal");
    }

    #[tokio::test]
    async fn test_rejecting_collection_fails_only_that_collection() {
        let store = MemoryStore::new().rejecting(Collection::Categories);

        assert!(matches!(
            store
                .upsert(UpsertBatch::Categories(&[category("1", "Beef")]))
                .await,
            Err(StoreError::Rejected {
                collection: Collection::Categories,
                ..
            })
        ));
        assert_eq!(store.upsert(UpsertBatch::Recipes(&[])).await.unwrap(), 0);
        assert!(store.categories().is_empty());
    }

    #[test]
    #[should_panic(expected = "recipes lock poisoned")]
    fn test_poisoned_table_is_not_read_as_empty() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let writer = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _table = writer.recipes.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        store.recipes();
    }
}
