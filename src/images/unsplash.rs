use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult};

use super::ImageSearch;

/// Client for Unsplash's `/search/photos` endpoint.
#[derive(Clone)]
pub struct UnsplashClient {
    client: Client,
    base_url: String,
    access_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

impl UnsplashClient {
    pub fn new(base_url: &str, access_key: &str) -> AppResult<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        })
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn search_one(&self, query: &str) -> AppResult<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .header(AUTHORIZATION, format!("Client-ID {}", self.access_key))
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "search returned {status}: {body}"
            )));
        }

        let payload: SearchResponse = response.json().await?;
        let urls: Vec<String> = payload
            .results
            .into_iter()
            .map(|result| result.urls.regular)
            .collect();

        debug!(query, found = urls.len(), "Image search complete");
        Ok(urls)
    }
}
