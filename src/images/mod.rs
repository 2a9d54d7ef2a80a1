//! Image lookup against an external photo-search API.

mod unsplash;

use async_trait::async_trait;

use crate::error::AppResult;

pub use unsplash::UnsplashClient;

#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Searches for `query` capped at one result; yields zero or one URL.
    async fn search_one(&self, query: &str) -> AppResult<Vec<String>>;
}
