//! Public Advertisement Entity
//!
//! Banners shown on the browse page between a start and end date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::json;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct PublicAd {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_active", deserialize_with = "json::lenient_bool")]
    pub active: bool,
}

json::lenient_keys!(PublicAd, serialize {
    id: ["adId", "ad_id"],
    content: ["description", "body"],
    image_url: ["imageUrl", "image"],
    link_url: ["linkUrl", "link", "url"],
    start_date: ["startDate"],
    end_date: ["endDate", "expiresAt", "expires_at"],
    active: ["isActive", "is_active"],
});

fn default_active() -> bool {
    true
}

impl PublicAd {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_some_and(|end| end < now)
    }

    /// Active, already started and not yet expired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active
            && !self.is_expired(now)
            && self.start_date.map_or(true, |start| start <= now)
    }
}

impl Entity for PublicAd {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_active_flag_defaults_true() {
        let ad: PublicAd = serde_json::from_str(r#"{"id": 1, "title": "Sale"}"#).unwrap();
        assert!(ad.active);
        assert!(ad.is_live(now()));
    }

    #[test]
    fn test_expiry_window() {
        let ad: PublicAd = serde_json::from_str(
            r#"{"id": 1, "title": "Sale", "startDate": "2024-06-01", "endDate": "2024-06-05"}"#,
        )
        .unwrap();
        assert!(ad.is_expired(now()));
        assert!(!ad.is_live(now()));

        let upcoming: PublicAd = serde_json::from_str(
            r#"{"id": 2, "title": "Soon", "start_date": "2024-07-01", "is_active": true}"#,
        )
        .unwrap();
        assert!(!upcoming.is_expired(now()));
        assert!(!upcoming.is_live(now()));
    }

    #[test]
    fn test_inactive_ad_not_live() {
        let ad: PublicAd =
            serde_json::from_str(r#"{"id": 3, "title": "Off", "isActive": 0}"#).unwrap();
        assert!(!ad.is_live(now()));
    }

    #[test]
    fn test_both_spellings_keep_first() {
        let ad: PublicAd = serde_json::from_str(
            r#"{"id": 4, "ad_id": 4, "title": "Fair", "isActive": true, "is_active": 1,
                "end_date": null, "endDate": "2024-06-30"}"#,
        )
        .unwrap();
        assert_eq!(ad.id(), "4");
        assert!(ad.is_live(now()));
        assert!(ad.end_date.is_some());
    }
}
