//! Delivery Entities
//!
//! Delivery tasks move through a fixed set of statuses. The delivery
//! manager's screen only offers the transitions listed here, and the
//! delivery service refuses anything else before touching the network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{normalize_key, Entity};
use super::Order;
use crate::json;

/// ```text
/// Pending -> Assigned -> PickedUp -> InTransit -> Delivered
///    |          |           |            |
///    v          v           +-> Failed <-+
/// Cancelled  Cancelled          |
///                               +-> Assigned (re-attempt)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
    Failed,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Assigned => "assigned",
            DeliveryStatus::PickedUp => "picked_up",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed => "failed",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalize_key(raw).as_str() {
            "assigned" | "accepted" => DeliveryStatus::Assigned,
            "pickedup" | "collected" => DeliveryStatus::PickedUp,
            "intransit" | "outfordelivery" | "ontheway" | "shipped" => DeliveryStatus::InTransit,
            "delivered" | "completed" => DeliveryStatus::Delivered,
            "failed" | "undelivered" => DeliveryStatus::Failed,
            "cancelled" | "canceled" => DeliveryStatus::Cancelled,
            _ => DeliveryStatus::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Assigned => "Assigned",
            DeliveryStatus::PickedUp => "Picked up",
            DeliveryStatus::InTransit => "In transit",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Failed => "Failed",
            DeliveryStatus::Cancelled => "Cancelled",
        }
    }

    /// Statuses reachable in one step, in the order the UI shows them.
    pub fn next_statuses(&self) -> &'static [DeliveryStatus] {
        use DeliveryStatus::*;
        match self {
            Pending => &[Assigned, Cancelled],
            Assigned => &[PickedUp, Cancelled],
            PickedUp => &[InTransit, Failed],
            InTransit => &[Delivered, Failed],
            Failed => &[Assigned],
            Delivered | Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: DeliveryStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }

    /// Verb for the button that moves a task into this status.
    pub fn action_label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Reset",
            DeliveryStatus::Assigned => "Re-attempt",
            DeliveryStatus::PickedUp => "Mark picked up",
            DeliveryStatus::InTransit => "Start delivery",
            DeliveryStatus::Delivered => "Mark delivered",
            DeliveryStatus::Failed => "Report failure",
            DeliveryStatus::Cancelled => "Cancel",
        }
    }
}

string_enum_serde!(DeliveryStatus);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct DeliveryTask {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default, deserialize_with = "json::string_id")]
    pub order_id: String,
    #[serde(default)]
    pub order: Option<Order>,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub status: DeliveryStatus,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

json::lenient_keys!(DeliveryTask, serialize {
    id: ["deliveryId", "delivery_id"],
    order_id: ["orderId"],
    manager_id: ["managerId", "deliveryManagerId", "delivery_manager_id"],
    status: ["deliveryStatus", "delivery_status"],
    address: ["deliveryAddress", "delivery_address", "shippingAddress"],
    customer_name: ["customerName"],
    customer_phone: ["customerPhone", "phone"],
    assigned_at: ["assignedAt"],
    delivered_at: ["deliveredAt"],
});

impl DeliveryTask {
    pub fn next_statuses(&self) -> &'static [DeliveryStatus] {
        self.status.next_statuses()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Address on the task, falling back to the embedded order.
    pub fn display_address(&self) -> &str {
        self.address
            .as_deref()
            .or_else(|| self.order.as_ref().and_then(|o| o.shipping_address.as_deref()))
            .unwrap_or("No address")
    }
}

impl Entity for DeliveryTask {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct DeliveryManager {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "json::lenient_bool")]
    pub available: bool,
    #[serde(default, deserialize_with = "json::lenient_u32")]
    pub active_deliveries: u32,
}

json::lenient_keys!(DeliveryManager, serialize {
    name: ["fullName", "full_name"],
    phone: ["phoneNumber", "phone_number"],
    available: ["isAvailable", "is_available"],
    active_deliveries: ["activeDeliveries", "active_orders"],
});

impl Entity for DeliveryManager {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DeliveryStatus::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(Pending.can_transition_to(Assigned));
        assert!(Assigned.can_transition_to(PickedUp));
        assert!(PickedUp.can_transition_to(InTransit));
        assert!(InTransit.can_transition_to(Delivered));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Assigned.can_transition_to(InTransit));
        assert!(!InTransit.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Failed));
        assert!(!Assigned.can_transition_to(Assigned));
    }

    #[test]
    fn test_failure_and_reattempt() {
        assert!(InTransit.can_transition_to(Failed));
        assert!(Failed.can_transition_to(Assigned));
        assert!(!Failed.is_terminal());
    }

    #[test]
    fn test_terminal_states() {
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn test_decode_task_with_order_fallback() {
        let task: DeliveryTask = serde_json::from_str(
            r#"{"deliveryId": 11, "orderId": 301, "deliveryStatus": "OUT_FOR_DELIVERY",
                "order": {"id": 301, "shipping_address": "9 Elm Rd"}}"#,
        )
        .unwrap();
        assert_eq!(task.id(), "11");
        assert_eq!(task.order_id, "301");
        assert_eq!(task.status, InTransit);
        assert_eq!(task.display_address(), "9 Elm Rd");
        assert_eq!(task.next_statuses(), &[Delivered, Failed]);
    }

    #[test]
    fn test_manager_availability_flag() {
        let m: DeliveryManager =
            serde_json::from_str(r#"{"id": 2, "name": "Ali", "is_available": 1}"#).unwrap();
        assert!(m.available);
    }

    #[test]
    fn test_both_spellings_keep_first() {
        let task: DeliveryTask = serde_json::from_str(
            r#"{"id": 11, "delivery_id": 11, "order_id": 301, "orderId": 301,
                "status": "PICKED_UP", "delivery_status": "ASSIGNED",
                "manager_id": 2, "delivery_manager_id": 2}"#,
        )
        .unwrap();
        assert_eq!(task.id(), "11");
        assert_eq!(task.order_id, "301");
        assert_eq!(task.status, PickedUp);
        assert_eq!(task.manager_id.as_deref(), Some("2"));

        let m: DeliveryManager = serde_json::from_str(
            r#"{"id": 2, "name": "Ali", "full_name": "Ali Khan", "is_available": 0, "isAvailable": true}"#,
        )
        .unwrap();
        assert_eq!(m.name, "Ali");
        assert!(m.available);
    }
}
