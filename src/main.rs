use std::{fs::OpenOptions, net::SocketAddr, sync::Arc, sync::Mutex};

use anyhow::Context;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod error;
mod handlers;
mod images;
mod middleware;
mod models;
mod store;

use crate::config::Config;
use crate::images::{ImageSearch, UnsplashClient};
use crate::middleware::{log_client_info, require_api_key};
use crate::store::{ItemStore, JsonFileStore};

/// Shared application state — cheap to clone (all heap behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub images: Arc<dyn ImageSearch>,
    pub api_key: Arc<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config)?;

    info!("Image inventory service starting");

    let store = JsonFileStore::new(config.items_file.clone());
    store
        .ensure_document()
        .await
        .with_context(|| format!("cannot prepare {}", store.path().display()))?;
    info!(path = %store.path().display(), "Using item document");

    let images = UnsplashClient::new(&config.unsplash_base_url, &config.unsplash_access_key)?;

    let state = AppState {
        store: Arc::new(store),
        images: Arc::new(images),
        api_key: Arc::new(config.api_key.clone()),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("Server is listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    Ok(())
}

/// Console output plus a plain-text copy in the configured log file.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,image_inventory=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

fn build_router(state: AppState) -> Router {
    // Route layers run last-added first: the key check precedes client logging.
    let public = Router::new()
        .route("/health", get(handlers::health))
        .route("/items", get(handlers::items::list_items))
        .route_layer(axum::middleware::from_fn(log_client_info));

    let protected = Router::new()
        .route("/AddItem", post(handlers::items::add_item))
        .route("/DeleteItem/:id", delete(handlers::items::delete_item))
        .route("/DeleteAll", delete(handlers::items::delete_all))
        .route("/ChangeItem/:id", put(handlers::items::change_item))
        .route_layer(axum::middleware::from_fn(log_client_info))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    public
        .merge(protected)
        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
