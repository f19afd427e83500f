//! Server-side Preferences

use super::to_body;
use crate::api::envelope::decode_object;
use crate::api::error::ApiResult;
use crate::api::ApiClient;
use crate::domain::UserPreferences;

/// A user who never saved preferences gets the defaults.
pub async fn get_preferences(client: &ApiClient) -> ApiResult<UserPreferences> {
    let body = client.get("/preferences", &[]).await?;
    if body.is_null() {
        return Ok(UserPreferences::default());
    }
    decode_object(body, &["preferences"])
}

pub async fn update_preferences(client: &ApiClient, prefs: &UserPreferences) -> ApiResult<UserPreferences> {
    let body = client.put("/preferences", to_body(prefs)?).await?;
    if body.is_null() {
        return Ok(prefs.clone());
    }
    decode_object(body, &["preferences"])
}
