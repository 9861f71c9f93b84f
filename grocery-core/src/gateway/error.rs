//! Gateway error types.

use thiserror::Error;

/// Errors returned by a [`GroceryGateway`](super::GroceryGateway) call.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Server returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl GatewayError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
