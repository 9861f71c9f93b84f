//! Access to the grocery REST API.
//!
//! Views talk to the backend only through [`GroceryGateway`], so they can be
//! driven by [`HttpGateway`] in production and by an in-memory gateway in tests.

mod error;
mod http;

pub use error::GatewayError;
pub use http::{HttpGateway, DEFAULT_API_URL};

use crate::models::{
    CreateGroceryPayload, Grocery, GroceryItem, GroceryItemPayload, Item,
    UpdateGroceryItemPayload,
};

/// The fixed set of calls the client makes against the grocery API.
#[allow(async_fn_in_trait)]
pub trait GroceryGateway {
    /// `GET /items`
    async fn list_items(&self) -> Result<Vec<Item>, GatewayError>;

    /// `GET /groceries`
    async fn list_groceries(&self) -> Result<Vec<Grocery>, GatewayError>;

    /// `POST /groceries`
    async fn create_grocery(&self, payload: &CreateGroceryPayload)
        -> Result<Grocery, GatewayError>;

    /// `POST /groceries/{grocery_id}/items`
    async fn add_item(
        &self,
        grocery_id: i64,
        payload: &GroceryItemPayload,
    ) -> Result<GroceryItem, GatewayError>;

    /// `PATCH /grocery_items/{grocery_item_id}`
    async fn update_grocery_item(
        &self,
        grocery_item_id: i64,
        changes: &UpdateGroceryItemPayload,
    ) -> Result<GroceryItem, GatewayError>;

    /// `DELETE /grocery_items/{grocery_item_id}`
    async fn delete_grocery_item(&self, grocery_item_id: i64) -> Result<(), GatewayError>;

    /// `DELETE /groceries/{grocery_id}`
    async fn delete_grocery(&self, grocery_id: i64) -> Result<(), GatewayError>;
}

impl<T: GroceryGateway> GroceryGateway for &T {
    async fn list_items(&self) -> Result<Vec<Item>, GatewayError> {
        (**self).list_items().await
    }

    async fn list_groceries(&self) -> Result<Vec<Grocery>, GatewayError> {
        (**self).list_groceries().await
    }

    async fn create_grocery(
        &self,
        payload: &CreateGroceryPayload,
    ) -> Result<Grocery, GatewayError> {
        (**self).create_grocery(payload).await
    }

    async fn add_item(
        &self,
        grocery_id: i64,
        payload: &GroceryItemPayload,
    ) -> Result<GroceryItem, GatewayError> {
        (**self).add_item(grocery_id, payload).await
    }

    async fn update_grocery_item(
        &self,
        grocery_item_id: i64,
        changes: &UpdateGroceryItemPayload,
    ) -> Result<GroceryItem, GatewayError> {
        (**self).update_grocery_item(grocery_item_id, changes).await
    }

    async fn delete_grocery_item(&self, grocery_item_id: i64) -> Result<(), GatewayError> {
        (**self).delete_grocery_item(grocery_item_id).await
    }

    async fn delete_grocery(&self, grocery_id: i64) -> Result<(), GatewayError> {
        (**self).delete_grocery(grocery_id).await
    }
}
