use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemCollection, ItemUpdate};

use super::ItemStore;

/// Item store backed by a single pretty-printed JSON document on disk.
/// Nothing is cached: each call re-reads the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates `{"items": []}` when the document does not exist yet.
    pub async fn ensure_document(&self) -> AppResult<()> {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(path = %self.path.display(), "Item document missing, creating an empty one");
                self.save(&ItemCollection::default()).await
            }
            Err(err) => Err(AppError::ReadDocument(err)),
        }
    }

    async fn load(&self) -> AppResult<ItemCollection> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(AppError::ReadDocument)?;
        let collection: ItemCollection = serde_json::from_str(&raw)?;
        debug!(count = collection.items.len(), "Loaded item document");
        Ok(collection)
    }

    async fn save(&self, collection: &ItemCollection) -> AppResult<()> {
        let body = serde_json::to_string_pretty(collection)
            .map_err(|err| AppError::WriteDocument(err.into()))?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(AppError::WriteDocument)
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn list(&self) -> AppResult<Vec<Item>> {
        Ok(self.load().await?.items)
    }

    async fn append(
        &self,
        name: String,
        quantity: i64,
        image_url: Vec<String>,
    ) -> AppResult<Item> {
        let mut collection = self.load().await?;
        let item = collection.append(name, quantity, image_url);
        self.save(&collection).await?;
        Ok(item)
    }

    async fn remove(&self, id: i64) -> AppResult<Item> {
        let mut collection = self.load().await?;
        let removed = collection.remove(id)?;
        self.save(&collection).await?;
        Ok(removed)
    }

    async fn reset_all(&self) -> AppResult<()> {
        // The current content is read first so a broken document still fails the call.
        self.load().await?;
        self.save(&ItemCollection::default()).await
    }

    async fn update_fields(&self, id: i64, update: ItemUpdate) -> AppResult<Item> {
        let mut collection = self.load().await?;
        let item = collection.update(id, update)?;
        self.save(&collection).await?;
        Ok(item)
    }
}
