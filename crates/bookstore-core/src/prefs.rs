//! Local Preferences
//!
//! Small string key-value settings that survive a reload: the server
//! override, the theme and the signed-in session. The browser build backs
//! `KeyValueStore` with `localStorage`; tests and native builds use the
//! in-memory or JSON-file stores below.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;
use log::{debug, warn};
use thiserror::Error;

use crate::config::normalize_server;
use crate::domain::{AuthSession, User};
use crate::token;

pub const KEY_SERVER_OVERRIDE: &str = "server_override";
pub const KEY_THEME_MODE: &str = "theme_mode";
pub const KEY_AUTH_TOKEN: &str = "auth_token";
pub const KEY_CACHED_USER: &str = "cached_user";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type PrefsResult<T> = Result<T, PrefsError>;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> PrefsResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PrefsResult<()>;
    fn remove(&self, key: &str) -> PrefsResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> PrefsResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| PrefsError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PrefsResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PrefsResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PrefsResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use super::{KeyValueStore, PrefsError, PrefsResult};

    /// All keys in one pretty-printed JSON object on disk.
    #[derive(Debug)]
    pub struct JsonFileStore {
        path: PathBuf,
        guard: Mutex<()>,
    }

    impl JsonFileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                guard: Mutex::new(()),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> PrefsResult<BTreeMap<String, String>> {
            match std::fs::read_to_string(&self.path) {
                Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(text) => Ok(serde_json::from_str(&text)?),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn write_all(&self, values: &BTreeMap<String, String>) -> PrefsResult<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, serde_json::to_string_pretty(values)?)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }

        fn update<F>(&self, change: F) -> PrefsResult<()>
        where
            F: FnOnce(&mut BTreeMap<String, String>),
        {
            let _lock = self
                .guard
                .lock()
                .map_err(|_| PrefsError::Unavailable("file store lock poisoned".to_string()))?;
            let mut values = self.read_all()?;
            change(&mut values);
            self.write_all(&values)
        }
    }

    impl KeyValueStore for JsonFileStore {
        fn get(&self, key: &str) -> PrefsResult<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> PrefsResult<()> {
            self.update(|values| {
                values.insert(key.to_string(), value.to_string());
            })
        }

        fn remove(&self, key: &str) -> PrefsResult<()> {
            self.update(|values| {
                values.remove(key);
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => ThemeMode::Light,
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::System,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::System => "Follow system",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

/// Device-level settings shown on the settings page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppSettings {
    pub server_override: Option<String>,
    pub theme: ThemeMode,
}

impl AppSettings {
    /// Unreadable entries fall back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let read = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                None
            }
        };
        Self {
            server_override: read(KEY_SERVER_OVERRIDE).and_then(|s| normalize_server(&s)),
            theme: read(KEY_THEME_MODE).map(|t| ThemeMode::parse(&t)).unwrap_or_default(),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> PrefsResult<()> {
        match self.server_override.as_deref().and_then(normalize_server) {
            Some(server) => store.set(KEY_SERVER_OVERRIDE, &server)?,
            None => store.remove(KEY_SERVER_OVERRIDE)?,
        }
        store.set(KEY_THEME_MODE, self.theme.as_str())?;
        debug!("Saved settings: {:?}", self);
        Ok(())
    }
}

pub fn save_session(store: &dyn KeyValueStore, session: &AuthSession) -> PrefsResult<()> {
    store.set(KEY_AUTH_TOKEN, &session.token)?;
    match &session.user {
        Some(user) => store.set(KEY_CACHED_USER, &serde_json::to_string(user)?)?,
        None => store.remove(KEY_CACHED_USER)?,
    }
    Ok(())
}

/// The saved session, unless its token has expired (then it is cleared).
pub fn load_session(store: &dyn KeyValueStore) -> PrefsResult<Option<AuthSession>> {
    let Some(token) = store.get(KEY_AUTH_TOKEN)?.filter(|t| !t.trim().is_empty()) else {
        return Ok(None);
    };
    if token::is_expired(&token, Utc::now()) {
        debug!("Discarding expired saved session");
        clear_session(store)?;
        return Ok(None);
    }
    let user = match store.get(KEY_CACHED_USER)? {
        Some(raw) => match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Ignoring unreadable cached user: {}", e);
                None
            }
        },
        None => None,
    };
    Ok(Some(AuthSession { token, user }))
}

pub fn clear_session(store: &dyn KeyValueStore) -> PrefsResult<()> {
    store.remove(KEY_AUTH_TOKEN)?;
    store.remove(KEY_CACHED_USER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::token::make_token;
    use serde_json::json;

    fn session(exp: i64) -> AuthSession {
        AuthSession {
            token: make_token(&json!({"sub": "3", "exp": exp})),
            user: Some(User {
                id: "3".into(),
                name: "Lin".into(),
                role: Role::Librarian,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_settings_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(AppSettings::load(&store), AppSettings::default());

        let settings = AppSettings {
            server_override: Some("192.168.1.5:8000".into()),
            theme: ThemeMode::Dark,
        };
        settings.save(&store).unwrap();
        assert_eq!(
            store.get(KEY_SERVER_OVERRIDE).unwrap().as_deref(),
            Some("http://192.168.1.5:8000")
        );

        let loaded = AppSettings::load(&store);
        assert_eq!(loaded.theme, ThemeMode::Dark);
        assert_eq!(loaded.server_override.as_deref(), Some("http://192.168.1.5:8000"));

        AppSettings::default().save(&store).unwrap();
        assert!(store.get(KEY_SERVER_OVERRIDE).unwrap().is_none());
    }

    #[test]
    fn test_session_survives_reload() {
        let store = MemoryStore::new();
        save_session(&store, &session(4_102_444_800)).unwrap();
        let loaded = load_session(&store).unwrap().unwrap();
        assert_eq!(loaded.role(), Role::Librarian);
    }

    #[test]
    fn test_expired_session_is_cleared() {
        let store = MemoryStore::new();
        save_session(&store, &session(1_000)).unwrap();
        assert!(load_session(&store).unwrap().is_none());
        assert!(store.get(KEY_AUTH_TOKEN).unwrap().is_none());
        assert!(store.get(KEY_CACHED_USER).unwrap().is_none());
    }

    #[test]
    fn test_json_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let store = JsonFileStore::new(&path);
        assert!(store.get(KEY_THEME_MODE).unwrap().is_none());

        store.set(KEY_THEME_MODE, "light").unwrap();
        store.set(KEY_AUTH_TOKEN, "abc").unwrap();
        store.remove(KEY_AUTH_TOKEN).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get(KEY_THEME_MODE).unwrap().as_deref(), Some("light"));
        assert!(reopened.get(KEY_AUTH_TOKEN).unwrap().is_none());
        assert_eq!(AppSettings::load(&reopened).theme, ThemeMode::Light);
    }

    #[test]
    fn test_corrupt_file_reports_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(KEY_THEME_MODE), Err(PrefsError::Serialization(_))));
    }
}
