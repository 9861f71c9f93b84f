//! Catalog items.
//!
//! Items are owned by the backend; the client only ever reads them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category an item belongs to (e.g. "Produce").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A catalog entry that can be put on a grocery list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub item_type_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, item_type_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            item_type_id,
            created_at: None,
            item_type: None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item_type {
            Some(item_type) => write!(f, "{} ({})", self.name, item_type.name),
            None => write!(f, "{}", self.name),
        }
    }
}
