//! Browser Storage
//!
//! `localStorage`-backed preferences. The handle is looked up on every call
//! because `web_sys::Storage` cannot be held in `Send` state.

use bookstore_core::prefs::{KeyValueStore, PrefsError, PrefsResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn local_storage() -> PrefsResult<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| PrefsError::Unavailable("no window".to_string()))?
        .local_storage()
        .map_err(|e| PrefsError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| PrefsError::Unavailable("localStorage disabled".to_string()))
}

fn js_err(e: wasm_bindgen::JsValue) -> PrefsError {
    PrefsError::Unavailable(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> PrefsResult<Option<String>> {
        local_storage()?.get_item(key).map_err(js_err)
    }

    fn set(&self, key: &str, value: &str) -> PrefsResult<()> {
        local_storage()?.set_item(key, value).map_err(js_err)
    }

    fn remove(&self, key: &str) -> PrefsResult<()> {
        local_storage()?.remove_item(key).map_err(js_err)
    }
}
