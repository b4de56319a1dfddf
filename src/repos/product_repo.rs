/*
 * Responsibility
 * - Product storage contract (ProductStore) + in-memory implementation
 * - The auth core only ever sees this trait; swapping in a database-backed
 *   store is a state.rs change
 */
use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub unit: String,
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<ProductRecord>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<ProductRecord>>;
    /// Insert or replace by id, returning the stored record.
    async fn save(&self, record: ProductRecord) -> anyhow::Result<ProductRecord>;
    /// Returns false when the id was unknown.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    items: RwLock<HashMap<Uuid, ProductRecord>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> anyhow::Result<Vec<ProductRecord>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<ProductRecord>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn save(&self, record: ProductRecord) -> anyhow::Result<ProductRecord> {
        let mut items = self.items.write().await;
        items.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut items = self.items.write().await;
        Ok(items.remove(&id).is_some())
    }
}
