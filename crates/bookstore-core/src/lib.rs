//! Bookstore Client Core
//!
//! Platform-neutral layers shared by the UI:
//! - domain: Backend resources as typed models
//! - api: HTTP client, response normalization and per-resource services
//! - token, validation, format: Cross-cutting utilities
//! - prefs, config: Local settings and client configuration
//! - state, cart: Client-side state holders

pub mod api;
pub mod cart;
pub mod config;
pub mod domain;
pub mod format;
pub mod json;
pub mod prefs;
pub mod state;
pub mod token;
pub mod validation;

pub use api::{ApiClient, ApiError, ApiResult, ErrorCode};
pub use config::ClientConfig;
