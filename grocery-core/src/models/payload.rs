//! Request bodies sent to the grocery API.

use serde::Serialize;

/// Line item in a create request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryItemPayload {
    pub item_id: i64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<bool>,
}

/// Body of `POST /groceries`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateGroceryPayload {
    pub family_id: i64,
    pub grocery_date: String,
    pub grocery_items: Vec<GroceryItemPayload>,
}

/// Partial body of `PATCH /grocery_items/{id}`. Unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateGroceryItemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<bool>,
}

impl UpdateGroceryItemPayload {
    pub fn purchased(purchased: bool) -> Self {
        Self {
            purchased: Some(purchased),
            ..Default::default()
        }
    }

    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }
}
