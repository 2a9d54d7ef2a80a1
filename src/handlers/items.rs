use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    middleware::ClientInfo,
    models::{find_index_by_id, ChangeItemParams, ItemUpdate, NewItem},
    AppState,
};

type JsonReply = AppResult<(StatusCode, Json<Value>)>;

fn message(text: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "message": text })))
}

/// Reads the leading integer of a path id (`"12abc"` is 12); ids without
/// one match nothing.
fn parse_id(raw: &str) -> AppResult<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len() - sign_len);
    trimmed[..sign_len + digits]
        .parse()
        .map_err(|_| AppError::NotFound(raw.to_string()))
}

// ── GET /items ────────────────────────────────────────────────────────────────

pub async fn list_items(State(state): State<AppState>) -> JsonReply {
    let items = state.store.list().await?;

    info!(count = items.len(), "Listed items");

    Ok((StatusCode::OK, Json(json!({ "items": items }))))
}

// ── POST /AddItem ─────────────────────────────────────────────────────────────

pub async fn add_item(
    State(state): State<AppState>,
    Extension(client): Extension<ClientInfo>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> JsonReply {
    let Json(payload) = payload?;

    // A failed lookup aborts the add; nothing is persisted.
    let image_url = state.images.search_one(&payload.name).await?;
    let item = state
        .store
        .append(payload.name, payload.quantity, image_url)
        .await?;

    info!(id = item.id, name = %item.name, ip = %client.ip, "Added item");

    Ok(message("Item added successfully"))
}

// ── DELETE /DeleteItem/:id ────────────────────────────────────────────────────

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(client): Extension<ClientInfo>,
    Path(id): Path<String>,
) -> JsonReply {
    let id = parse_id(&id)?;
    let removed = state.store.remove(id).await?;

    info!(id, name = %removed.name, ip = %client.ip, "Deleted item");

    Ok(message("Item deleted successfully"))
}

// ── DELETE /DeleteAll ─────────────────────────────────────────────────────────

pub async fn delete_all(
    State(state): State<AppState>,
    Extension(client): Extension<ClientInfo>,
) -> JsonReply {
    state.store.reset_all().await?;

    info!(ip = %client.ip, "Deleted all items");

    Ok(message("Item deleted successfully"))
}

// ── PUT /ChangeItem/:id ───────────────────────────────────────────────────────

pub async fn change_item(
    State(state): State<AppState>,
    Extension(client): Extension<ClientInfo>,
    Path(id): Path<String>,
    params: Result<Query<ChangeItemParams>, QueryRejection>,
) -> JsonReply {
    let Query(params) = params?;
    let id = parse_id(&id)?;
    let quantity = params.quantity()?;

    // Existence is checked before any image lookup is attempted.
    let items = state.store.list().await?;
    if find_index_by_id(&items, id).is_none() {
        return Err(AppError::NotFound(id.to_string()));
    }

    let mut update = ItemUpdate {
        quantity,
        ..Default::default()
    };
    if let Some(name) = params.name() {
        update.image_url = Some(state.images.search_one(name).await?);
        update.name = Some(name.to_string());
    }

    let item = state.store.update_fields(id, update).await?;

    info!(id, name = %item.name, quantity = item.quantity, ip = %client.ip, "Changed item");

    Ok(message("Item changed successfully"))
}
