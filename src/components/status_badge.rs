//! Status Badge Component

use bookstore_core::domain::{BorrowStatus, ComplaintStatus, DeliveryStatus, OrderStatus};
use leptos::prelude::*;

/// Colour family of a badge; maps to a `badge-*` CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    fn class(&self) -> &'static str {
        match self {
            Tone::Neutral => "badge badge-neutral",
            Tone::Info => "badge badge-info",
            Tone::Success => "badge badge-success",
            Tone::Warning => "badge badge-warning",
            Tone::Danger => "badge badge-danger",
        }
    }

    pub fn for_order(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Tone::Warning,
            OrderStatus::Confirmed | OrderStatus::Processing | OrderStatus::Shipped => Tone::Info,
            OrderStatus::Delivered => Tone::Success,
            OrderStatus::Cancelled | OrderStatus::Returned => Tone::Neutral,
        }
    }

    pub fn for_borrow(status: BorrowStatus) -> Self {
        match status {
            BorrowStatus::Requested => Tone::Warning,
            BorrowStatus::Active => Tone::Info,
            BorrowStatus::Overdue | BorrowStatus::Rejected => Tone::Danger,
            BorrowStatus::Returned => Tone::Success,
        }
    }

    pub fn for_delivery(status: DeliveryStatus) -> Self {
        match status {
            DeliveryStatus::Pending => Tone::Warning,
            DeliveryStatus::Assigned | DeliveryStatus::PickedUp | DeliveryStatus::InTransit => Tone::Info,
            DeliveryStatus::Delivered => Tone::Success,
            DeliveryStatus::Failed => Tone::Danger,
            DeliveryStatus::Cancelled => Tone::Neutral,
        }
    }

    pub fn for_complaint(status: ComplaintStatus) -> Self {
        match status {
            ComplaintStatus::Open => Tone::Warning,
            ComplaintStatus::InProgress => Tone::Info,
            ComplaintStatus::Resolved => Tone::Success,
            ComplaintStatus::Closed => Tone::Neutral,
        }
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] label: String, tone: Tone) -> impl IntoView {
    view! { <span class=tone.class()>{label}</span> }
}
