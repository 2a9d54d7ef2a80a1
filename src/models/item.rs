use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// One inventory record as persisted in the item document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    /// Zero or one URL in practice: the image search asks for a single result.
    #[serde(rename = "imageUrl")]
    pub image_url: Vec<String>,
}

/// The whole persisted document: `{"items": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCollection {
    pub items: Vec<Item>,
}

impl ItemCollection {
    /// Ids are `count + 1` and never compacted, so a delete followed by an
    /// add can hand out an id that is still in use.
    pub fn next_id(&self) -> i64 {
        self.items.len() as i64 + 1
    }

    pub fn append(&mut self, name: String, quantity: i64, image_url: Vec<String>) -> Item {
        let item = Item {
            id: self.next_id(),
            name,
            quantity,
            image_url,
        };
        self.items.push(item.clone());
        item
    }

    pub fn remove(&mut self, id: i64) -> AppResult<Item> {
        let index = find_index_by_id(&self.items, id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        Ok(self.items.remove(index))
    }

    pub fn update(&mut self, id: i64, update: ItemUpdate) -> AppResult<Item> {
        let index = find_index_by_id(&self.items, id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        if !update.has_changes() {
            return Err(AppError::Validation(id));
        }
        let item = &mut self.items[index];
        update.apply_to(item);
        Ok(item.clone())
    }
}

/// First index whose id matches; duplicates resolve to the earliest entry.
pub fn find_index_by_id(items: &[Item], id: i64) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// Field changes staged for an existing item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub image_url: Option<Vec<String>>,
}

impl ItemUpdate {
    /// Image URLs alone do not count as a change.
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.quantity.is_some()
    }

    pub fn apply_to(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(image_url) = self.image_url {
            item.image_url = image_url;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub quantity: i64,
}

// ── Query parameters ──────────────────────────────────────────────────────────

/// `PUT /ChangeItem/:id?name=..&quantity=..`; empty values count as absent.
#[derive(Debug, Deserialize, Default)]
pub struct ChangeItemParams {
    pub name: Option<String>,
    pub quantity: Option<String>,
}

impl ChangeItemParams {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn quantity(&self) -> AppResult<Option<i64>> {
        match self.quantity.as_deref().filter(|raw| !raw.is_empty()) {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                AppError::BadRequest(format!("quantity must be an integer, got {raw:?}"))
            }),
        }
    }
}
