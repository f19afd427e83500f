//! Notifications

use serde_json::{json, Value};

use super::{action_path, item_path, require_id};
use crate::api::envelope::{decode_list, error_message};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::Notification;

pub async fn list_notifications(client: &ApiClient) -> ApiResult<Vec<Notification>> {
    let body = client.get("/notifications", &[]).await?;
    decode_list(body, &["notifications"])
}

fn count_in(body: &Value) -> Option<usize> {
    match body {
        Value::Number(n) => n.as_u64().map(|v| v as usize),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => ["count", "unread_count", "unreadCount", "unread", "data"]
            .iter()
            .find_map(|k| map.get(*k).and_then(count_in)),
        _ => None,
    }
}

/// Accepts a bare number, `{count}`, `{unread_count}` or either under `data`.
pub async fn unread_count(client: &ApiClient) -> ApiResult<usize> {
    let body = client.get("/notifications/unread-count", &[]).await?;
    count_in(&body).ok_or_else(|| {
        ApiError::parse(error_message(&body).unwrap_or_else(|| "missing unread count".to_string()))
    })
}

pub async fn mark_read(client: &ApiClient, id: &str) -> ApiResult<()> {
    require_id(id, "notification")?;
    client
        .post(&action_path("/notifications", id, "read"), json!({}))
        .await?;
    Ok(())
}

pub async fn mark_all_read(client: &ApiClient) -> ApiResult<()> {
    client.post("/notifications/read-all", json!({})).await?;
    Ok(())
}

pub async fn delete_notification(client: &ApiClient, id: &str) -> ApiResult<()> {
    require_id(id, "notification")?;
    client.delete(&item_path("/notifications", id)).await?;
    Ok(())
}
