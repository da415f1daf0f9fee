//! Wire types for the backend product API.
//!
//! Every endpoint wraps its payload in the same envelope:
//! `{ "success": bool, "message"?: string, "data"?: ... }`. A `false`
//! `success` carries a human-readable `message` and no `data`.
//! Product payloads use the [`kitbag_core::AggregateProduct`] shape directly.

use serde::Deserialize;

/// Response envelope shared by the product API endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload, turning a reported failure into a message.
    ///
    /// A successful response without `data` yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns the API's message (or a generic one) when `success` is false.
    pub fn into_result(self) -> Result<T, String>
    where
        T: Default,
    {
        if self.success {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "request was not successful".to_owned()))
        }
    }
}
