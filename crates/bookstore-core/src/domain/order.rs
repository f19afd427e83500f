//! Order Entity
//!
//! Customer purchase with its line items. Status drives which actions the
//! customer and admin views offer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{normalize_key, Entity};
use super::Book;
use crate::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalize_key(raw).as_str() {
            "confirmed" | "accepted" | "approved" => OrderStatus::Confirmed,
            "processing" | "preparing" => OrderStatus::Processing,
            "shipped" | "shipping" | "outfordelivery" | "intransit" => OrderStatus::Shipped,
            "delivered" | "completed" => OrderStatus::Delivered,
            "cancelled" | "canceled" | "rejected" => OrderStatus::Cancelled,
            "returned" | "refunded" => OrderStatus::Returned,
            _ => OrderStatus::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
        }
    }

    /// Customers may cancel until the order starts being prepared.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Returned
        )
    }
}

string_enum_serde!(OrderStatus);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct OrderItem {
    #[serde(default, deserialize_with = "json::string_id")]
    pub book_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "json::lenient_u32")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "json::lenient_f64")]
    pub unit_price: f64,
    #[serde(default)]
    pub book: Option<Book>,
}

json::lenient_keys!(OrderItem, serialize {
    book_id: ["bookId"],
    title: ["bookTitle", "book_title"],
    quantity: ["qty"],
    unit_price: ["unitPrice", "price"],
});

impl OrderItem {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or_else(|| self.book.as_ref().map(|b| b.title.as_str()))
            .unwrap_or("Untitled")
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Order {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "json::lenient_f64")]
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub delivery_manager_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

json::lenient_keys!(Order, serialize {
    id: ["orderId", "order_id"],
    customer_id: ["customerId", "userId", "user_id"],
    customer_name: ["customerName", "userName", "user_name"],
    items: ["orderItems", "order_items"],
    total_amount: ["totalAmount", "total", "totalPrice", "total_price"],
    payment_method: ["paymentMethod"],
    shipping_address: ["shippingAddress", "deliveryAddress", "delivery_address", "address"],
    phone: ["phoneNumber", "phone_number"],
    delivery_manager_id: ["deliveryManagerId"],
    created_at: ["createdAt", "orderDate", "order_date"],
    updated_at: ["updatedAt"],
});

impl Order {
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Backend total when it sent one, otherwise the sum of the lines.
    pub fn display_total(&self) -> f64 {
        if self.total_amount > 0.0 {
            self.total_amount
        } else {
            self.computed_total()
        }
    }

    pub fn can_cancel(&self) -> bool {
        self.status.can_cancel()
    }
}

impl Entity for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineRequest {
    pub book_id: String,
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderLineRequest>,
    pub shipping_address: String,
    pub phone: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
