//! Orders
//!
//! Customer checkout and history, plus the admin side: status updates and
//! handing an order to a delivery manager.

use log::info;
use serde_json::json;

use super::{action_path, item_path, require_id, to_body};
use crate::api::envelope::{decode_list, decode_object};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::{Order, OrderStatus, PlaceOrderRequest};
use crate::validation;

const KEYS: [&str; 1] = ["order"];
const LIST_KEYS: [&str; 1] = ["orders"];

pub async fn place_order(client: &ApiClient, request: &PlaceOrderRequest) -> ApiResult<Order> {
    if request.items.is_empty() {
        return Err(ApiError::validation("Your cart is empty"));
    }
    let problem = validation::validate_all([
        validation::required(&request.shipping_address, "Shipping address"),
        validation::phone(&request.phone),
    ]);
    if let Some(msg) = problem {
        return Err(ApiError::validation(msg));
    }
    let body = client.post("/orders", to_body(request)?).await?;
    let order: Order = decode_object(body, &KEYS)?;
    info!("Placed order {}", order.id);
    Ok(order)
}

pub async fn my_orders(client: &ApiClient) -> ApiResult<Vec<Order>> {
    let body = client.get("/orders/my", &[]).await?;
    decode_list(body, &LIST_KEYS)
}

pub async fn get_order(client: &ApiClient, id: &str) -> ApiResult<Order> {
    require_id(id, "order")?;
    let body = client.get(&item_path("/orders", id), &[]).await?;
    decode_object(body, &KEYS)
}

/// Orders past confirmation are refused here without a request.
pub async fn cancel_order(client: &ApiClient, order: &Order) -> ApiResult<Order> {
    if !order.can_cancel() {
        return Err(ApiError::validation(format!(
            "An order that is {} can no longer be cancelled",
            order.status.label().to_lowercase()
        )));
    }
    let body = client
        .post(&action_path("/orders", &order.id, "cancel"), json!({}))
        .await?;
    // Some backends answer with just a message.
    let mut cancelled: Order = decode_object(body, &KEYS).unwrap_or_else(|_| order.clone());
    if cancelled.id.is_empty() {
        cancelled = order.clone();
    }
    cancelled.status = OrderStatus::Cancelled;
    Ok(cancelled)
}

/// Every order, optionally narrowed to one status (admin).
pub async fn all_orders(client: &ApiClient, status: Option<OrderStatus>) -> ApiResult<Vec<Order>> {
    let query: Vec<(&str, String)> = status
        .map(|s| vec![("status", s.as_str().to_string())])
        .unwrap_or_default();
    let body = client.get("/orders", &query).await?;
    decode_list(body, &LIST_KEYS)
}

pub async fn update_order_status(client: &ApiClient, id: &str, status: OrderStatus) -> ApiResult<Order> {
    require_id(id, "order")?;
    let body = client
        .patch(&action_path("/orders", id, "status"), json!({"status": status.as_str()}))
        .await?;
    decode_object(body, &KEYS)
}

pub async fn assign_delivery_manager(client: &ApiClient, order_id: &str, manager_id: &str) -> ApiResult<()> {
    require_id(order_id, "order")?;
    require_id(manager_id, "delivery manager")?;
    client
        .post(
            &action_path("/orders", order_id, "assign"),
            json!({"delivery_manager_id": manager_id}),
        )
        .await?;
    info!("Assigned order {} to manager {}", order_id, manager_id);
    Ok(())
}
