//! Resource Services
//!
//! Thin async wrappers, one per endpoint. Each builds the request body,
//! calls the client and decodes the payload into domain types.

pub mod ads;
pub mod auth;
pub mod books;
pub mod borrowing;
pub mod catalog;
pub mod complaints;
pub mod delivery;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod preferences;

#[cfg(test)]
mod tests;

use serde::Serialize;
use serde_json::Value;

use super::client::encode_segment;
use super::error::{ApiError, ApiResult};

pub(crate) fn to_body<T: Serialize>(args: &T) -> ApiResult<Value> {
    serde_json::to_value(args).map_err(|e| ApiError::validation(format!("Failed to serialize args: {}", e)))
}

/// `/books/{id}` style path with the id percent-encoded.
pub(crate) fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, encode_segment(id))
}

pub(crate) fn action_path(collection: &str, id: &str, action: &str) -> String {
    format!("{}/{}", item_path(collection, id), action)
}

/// Refuse an empty id before building a path like `/books/`.
pub(crate) fn require_id(id: &str, what: &str) -> ApiResult<()> {
    if id.trim().is_empty() {
        Err(ApiError::validation(format!("Missing {} id", what)))
    } else {
        Ok(())
    }
}
