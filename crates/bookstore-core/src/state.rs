//! Client State Holders
//!
//! View-facing wrappers around fetched data. The UI keeps one `ListState`
//! per screen in its reactive store and an `ActionResult` for the outcome
//! of the last button press.

use crate::api::{ApiError, ApiResult, ErrorCode};
use crate::domain::Entity;

/// One fetched collection plus its loading/error flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Entity> ListState<T> {
    pub fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the items wholesale on success. On failure the previous
    /// items stay visible next to the error.
    pub fn finish(&mut self, result: ApiResult<Vec<T>>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => self.error = Some(e.message),
        }
    }

    /// Insert or replace by id; new items go first.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|i| i.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.insert(0, item),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.items.iter().position(|i| i.id() == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The last load failed before anything arrived, so only the error has
    /// something to say.
    pub fn failed_without_items(&self) -> bool {
        self.error.is_some() && self.items.is_empty()
    }

    /// Nothing to show yet and not loading: the empty-state message.
    pub fn show_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.items.is_empty()
    }
}

/// Transient feedback for a mutation (snackbar text).
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    pub error_code: Option<ErrorCode>,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_code: None,
        }
    }

    pub fn failed(error: &ApiError) -> Self {
        Self {
            success: false,
            message: error.message.clone(),
            error_code: Some(error.code),
        }
    }

    pub fn from_result<T>(result: &ApiResult<T>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self::ok(success_message),
            Err(e) => Self::failed(e),
        }
    }

    /// Whether the user should be sent back to the sign-in page.
    pub fn needs_sign_in(&self) -> bool {
        matches!(
            self.error_code,
            Some(ErrorCode::NoToken | ErrorCode::TokenExpired | ErrorCode::Unauthorized)
        )
    }
}
