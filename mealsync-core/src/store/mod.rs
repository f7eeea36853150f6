//! Destination persistence.
//!
//! Every store exposes one operation: upsert a batch of rows into a named
//! collection, resolving conflicts on `api_id`. Concrete stores live here
//! (Supabase REST, in-memory); the diesel store lives in the CLI crate.

mod memory;
mod supabase;

use std::fmt;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{Category, Recipe};

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

/// Conflict key shared by both collections.
pub const CONFLICT_KEY: &str = "api_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Recipes,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Categories => "categories",
            Collection::Recipes => "recipes",
        }
    }

    pub fn conflict_key(&self) -> &'static str {
        CONFLICT_KEY
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows bound for one collection.
#[derive(Debug, Clone, Copy)]
pub enum UpsertBatch<'a> {
    Categories(&'a [Category]),
    Recipes(&'a [Recipe]),
}

impl UpsertBatch<'_> {
    pub fn collection(&self) -> Collection {
        match self {
            UpsertBatch::Categories(_) => Collection::Categories,
            UpsertBatch::Recipes(_) => Collection::Recipes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            UpsertBatch::Categories(rows) => rows.len(),
            UpsertBatch::Recipes(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
pub trait RowStore: Send + Sync {
    /// Insert new rows and overwrite existing ones matching on `api_id`.
    /// Returns the number of rows persisted; an empty batch is a no-op.
    async fn upsert(&self, batch: UpsertBatch<'_>) -> Result<usize, StoreError>;
}

#[async_trait]
impl<S: RowStore + ?Sized> RowStore for Box<S> {
    async fn upsert(&self, batch: UpsertBatch<'_>) -> Result<usize, StoreError> {
        (**self).upsert(batch).await
    }
}

#[async_trait]
impl<S: RowStore + ?Sized> RowStore for std::sync::Arc<S> {
    async fn upsert(&self, batch: UpsertBatch<'_>) -> Result<usize, StoreError> {
        (**self).upsert(batch).await
    }
}
