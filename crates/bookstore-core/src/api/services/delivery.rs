//! Delivery
//!
//! A delivery manager works their assigned tasks forward one status at a
//! time. Illegal moves are refused before a request is built.

use log::info;
use serde_json::json;

use super::action_path;
use crate::api::envelope::{decode_list, decode_object};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::{DeliveryManager, DeliveryStatus, DeliveryTask};

const TASK_KEYS: [&str; 2] = ["delivery", "task"];
const MANAGER_KEYS: [&str; 2] = ["manager", "delivery_manager"];

pub async fn my_deliveries(client: &ApiClient) -> ApiResult<Vec<DeliveryTask>> {
    let body = client.get("/deliveries/my", &[]).await?;
    decode_list(body, &["deliveries", "tasks"])
}

pub async fn update_delivery_status(
    client: &ApiClient,
    task: &DeliveryTask,
    next: DeliveryStatus,
    notes: Option<&str>,
) -> ApiResult<DeliveryTask> {
    if !task.status.can_transition_to(next) {
        return Err(ApiError::validation(format!(
            "Cannot move a delivery from {} to {}",
            task.status.label(),
            next.label()
        )));
    }
    let mut body = json!({"status": next.as_str()});
    if let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) {
        body["notes"] = json!(notes);
    }
    let response = client
        .patch(&action_path("/deliveries", &task.id, "status"), body)
        .await?;
    info!("Delivery {} -> {}", task.id, next.as_str());

    let mut updated: DeliveryTask = decode_object(response, &TASK_KEYS).unwrap_or_else(|_| task.clone());
    if updated.id.is_empty() {
        updated = task.clone();
    }
    updated.status = next;
    Ok(updated)
}

pub async fn list_managers(client: &ApiClient) -> ApiResult<Vec<DeliveryManager>> {
    let body = client.get("/delivery-managers", &[]).await?;
    decode_list(body, &["managers", "delivery_managers"])
}

/// The signed-in delivery manager's duty flag.
pub async fn my_availability(client: &ApiClient) -> ApiResult<bool> {
    let body = client.get("/delivery-managers/me", &[]).await?;
    let manager: DeliveryManager = decode_object(body, &MANAGER_KEYS)?;
    Ok(manager.available)
}

/// Returns the flag the server stored, or the requested one when the reply
/// carries no manager record.
pub async fn set_availability(client: &ApiClient, available: bool) -> ApiResult<bool> {
    let response = client
        .patch("/delivery-managers/me/availability", json!({"available": available}))
        .await?;
    let stored = decode_object::<DeliveryManager>(response, &MANAGER_KEYS)
        .ok()
        .filter(|m| !m.id.is_empty())
        .map_or(available, |m| m.available);
    info!("Availability set to {}", stored);
    Ok(stored)
}

