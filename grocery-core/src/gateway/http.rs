//! reqwest-backed gateway.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{GatewayError, GroceryGateway};
use crate::models::{
    CreateGroceryPayload, Grocery, GroceryItem, GroceryItemPayload, Item,
    UpdateGroceryItemPayload,
};

/// Base URL used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Gateway that talks JSON over HTTP to the grocery API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: Client,
}

impl HttpGateway {
    /// Creates a gateway rooted at `base_url` (e.g. `http://localhost:8000/api/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a gateway that reuses an existing reqwest client.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(|e| GatewayError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(GatewayError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, GatewayError> {
        let response = self.send(request, url).await?;
        response.json().await.map_err(|e| GatewayError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl GroceryGateway for HttpGateway {
    async fn list_items(&self) -> Result<Vec<Item>, GatewayError> {
        let url = self.url("/items");
        tracing::debug!("GET {}", url);
        self.fetch_json(self.client.get(&url), &url).await
    }

    async fn list_groceries(&self) -> Result<Vec<Grocery>, GatewayError> {
        let url = self.url("/groceries");
        tracing::debug!("GET {}", url);
        self.fetch_json(self.client.get(&url), &url).await
    }

    async fn create_grocery(
        &self,
        payload: &CreateGroceryPayload,
    ) -> Result<Grocery, GatewayError> {
        let url = self.url("/groceries");
        tracing::debug!(
            "POST {} ({} item(s))",
            url,
            payload.grocery_items.len()
        );
        self.fetch_json(self.client.post(&url).json(payload), &url)
            .await
    }

    async fn add_item(
        &self,
        grocery_id: i64,
        payload: &GroceryItemPayload,
    ) -> Result<GroceryItem, GatewayError> {
        let url = self.url(&format!("/groceries/{}/items", grocery_id));
        tracing::debug!("POST {}", url);
        self.fetch_json(self.client.post(&url).json(payload), &url)
            .await
    }

    async fn update_grocery_item(
        &self,
        grocery_item_id: i64,
        changes: &UpdateGroceryItemPayload,
    ) -> Result<GroceryItem, GatewayError> {
        let url = self.url(&format!("/grocery_items/{}", grocery_item_id));
        tracing::debug!("PATCH {}", url);
        self.fetch_json(self.client.patch(&url).json(changes), &url)
            .await
    }

    async fn delete_grocery_item(&self, grocery_item_id: i64) -> Result<(), GatewayError> {
        let url = self.url(&format!("/grocery_items/{}", grocery_item_id));
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }

    async fn delete_grocery(&self, grocery_id: i64) -> Result<(), GatewayError> {
        let url = self.url(&format!("/groceries/{}", grocery_id));
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }
}
