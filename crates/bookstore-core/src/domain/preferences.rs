//! Server-side User Preferences

use serde::{Deserialize, Serialize};

use crate::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct UserPreferences {
    #[serde(default, deserialize_with = "json::string_ids")]
    pub favorite_category_ids: Vec<String>,
    #[serde(default = "default_on", deserialize_with = "json::lenient_bool")]
    pub order_notifications: bool,
    #[serde(default = "default_on", deserialize_with = "json::lenient_bool")]
    pub borrow_notifications: bool,
    #[serde(default, deserialize_with = "json::lenient_bool")]
    pub newsletter: bool,
}

json::lenient_keys!(UserPreferences, serialize {
    favorite_category_ids: ["favoriteCategoryIds", "favorite_categories"],
    order_notifications: ["orderNotifications"],
    borrow_notifications: ["borrowNotifications"],
});

fn default_on() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            favorite_category_ids: Vec::new(),
            order_notifications: true,
            borrow_notifications: true,
            newsletter: false,
        }
    }
}

impl UserPreferences {
    pub fn toggle_favorite(&mut self, category_id: &str) {
        if let Some(pos) = self.favorite_category_ids.iter().position(|c| c == category_id) {
            self.favorite_category_ids.remove(pos);
        } else {
            self.favorite_category_ids.push(category_id.to_string());
        }
    }

    pub fn is_favorite(&self, category_id: &str) -> bool {
        self.favorite_category_ids.iter().any(|c| c == category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let prefs: UserPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, UserPreferences::default());
    }

    #[test]
    fn test_numeric_category_ids() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"favoriteCategoryIds": [1, "2"], "newsletter": "true"}"#).unwrap();
        assert_eq!(prefs.favorite_category_ids, vec!["1", "2"]);
        assert!(prefs.newsletter);
    }

    #[test]
    fn test_toggle_favorite() {
        let mut prefs = UserPreferences::default();
        prefs.toggle_favorite("3");
        assert!(prefs.is_favorite("3"));
        prefs.toggle_favorite("3");
        assert!(!prefs.is_favorite("3"));
    }

    #[test]
    fn test_both_spellings_keep_first() {
        let prefs: UserPreferences = serde_json::from_str(
            r#"{"favorite_category_ids": [4], "favoriteCategoryIds": [5],
                "order_notifications": false, "orderNotifications": true}"#,
        )
        .unwrap();
        assert_eq!(prefs.favorite_category_ids, vec!["4"]);
        assert!(!prefs.order_notifications);
    }
}
