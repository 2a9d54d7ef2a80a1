mod auth;
mod client_info;

pub use auth::require_api_key;
pub use client_info::{log_client_info, ClientInfo};
