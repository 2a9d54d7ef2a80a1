//! Persistence for the item collection.
//!
//! Every operation is a full read-modify-write of the backing document with no
//! locking: two overlapping mutations race and the last writer wins.

mod file;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Item, ItemUpdate};

pub use file::JsonFileStore;

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Item>>;

    /// Appends a new item with `id = current count + 1` and returns it.
    async fn append(&self, name: String, quantity: i64, image_url: Vec<String>)
        -> AppResult<Item>;

    /// Removes the first item with `id`, or fails with `NotFound`.
    async fn remove(&self, id: i64) -> AppResult<Item>;

    /// Discards every item unconditionally.
    async fn reset_all(&self) -> AppResult<()>;

    /// Applies the staged fields to the first item with `id`.
    async fn update_fields(&self, id: i64, update: ItemUpdate) -> AppResult<Item>;
}
