use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::{Item, ItemCollection, ItemUpdate};

use super::ItemStore;

/// In-memory stand-in for [`super::JsonFileStore`] used by handler tests.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    collection: RwLock<ItemCollection>,
}

impl MemoryItemStore {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            collection: RwLock::new(ItemCollection { items }),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list(&self) -> AppResult<Vec<Item>> {
        Ok(self.collection.read().await.items.clone())
    }

    async fn append(
        &self,
        name: String,
        quantity: i64,
        image_url: Vec<String>,
    ) -> AppResult<Item> {
        Ok(self.collection.write().await.append(name, quantity, image_url))
    }

    async fn remove(&self, id: i64) -> AppResult<Item> {
        self.collection.write().await.remove(id)
    }

    async fn reset_all(&self) -> AppResult<()> {
        self.collection.write().await.items.clear();
        Ok(())
    }

    async fn update_fields(&self, id: i64, update: ItemUpdate) -> AppResult<Item> {
        self.collection.write().await.update(id, update)
    }
}
