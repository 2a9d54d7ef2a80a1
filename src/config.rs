use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub items_file: PathBuf,
    /// Pre-shared value expected in the `api-key` header of mutating requests.
    pub api_key: String,
    pub unsplash_access_key: String,
    pub unsplash_base_url: String,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            items_file: std::env::var("ITEMS_FILE")
                .unwrap_or_else(|_| "items.json".to_string())
                .into(),
            api_key: std::env::var("API_KEY").context("API_KEY must be set")?,
            unsplash_access_key: std::env::var("UNSPLASH_ACCESS_KEY")
                .context("UNSPLASH_ACCESS_KEY must be set")?,
            unsplash_base_url: std::env::var("UNSPLASH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_UNSPLASH_BASE_URL.to_string()),
            log_file: std::env::var("LOG_FILE")
                .unwrap_or_else(|_| "server.log".to_string())
                .into(),
        })
    }
}
