//! API Layer
//!
//! HTTP plumbing shared by every resource:
//! - transport: The `Transport` seam and its reqwest implementation
//! - client: Base URL, bearer token and error normalization
//! - envelope: Digging payloads out of the backend's response shapes
//! - services: One module of endpoint functions per resource

mod client;
mod envelope;
mod error;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub mod services;

pub use client::{encode_segment, ApiClient};
pub use envelope::{decode_list, decode_object, decode_page, error_message, Page};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError};
