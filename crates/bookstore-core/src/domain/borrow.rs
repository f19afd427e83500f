//! Borrow Record Entity
//!
//! A library loan: requested by a customer, approved or rejected by a
//! librarian, returned by the customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{normalize_key, Entity};
use super::Book;
use crate::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorrowStatus {
    #[default]
    Requested,
    Active,
    Overdue,
    Returned,
    Rejected,
}

impl BorrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Requested => "requested",
            BorrowStatus::Active => "active",
            BorrowStatus::Overdue => "overdue",
            BorrowStatus::Returned => "returned",
            BorrowStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalize_key(raw).as_str() {
            "approved" | "active" | "borrowed" | "issued" => BorrowStatus::Active,
            "overdue" | "late" => BorrowStatus::Overdue,
            "returned" => BorrowStatus::Returned,
            "rejected" | "declined" | "cancelled" | "canceled" => BorrowStatus::Rejected,
            _ => BorrowStatus::Requested,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BorrowStatus::Requested => "Awaiting approval",
            BorrowStatus::Active => "Borrowed",
            BorrowStatus::Overdue => "Overdue",
            BorrowStatus::Returned => "Returned",
            BorrowStatus::Rejected => "Rejected",
        }
    }
}

string_enum_serde!(BorrowStatus);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct BorrowRecord {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default, deserialize_with = "json::string_id")]
    pub book_id: String,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub book: Option<Book>,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub borrow_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: BorrowStatus,
    #[serde(default, deserialize_with = "json::lenient_f64")]
    pub fine: f64,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

json::lenient_keys!(BorrowRecord, serialize {
    id: ["borrowId", "borrow_id"],
    book_id: ["bookId"],
    book_title: ["bookTitle"],
    user_id: ["userId"],
    user_name: ["userName", "customerName", "customer_name"],
    borrow_date: ["borrowDate", "borrowedAt", "borrowed_at"],
    due_date: ["dueDate"],
    return_date: ["returnDate", "returnedAt", "returned_at"],
    fine: ["fineAmount", "fine_amount"],
    rejection_reason: ["rejectionReason", "reason"],
});

impl BorrowRecord {
    pub fn display_title(&self) -> &str {
        self.book_title
            .as_deref()
            .or_else(|| self.book.as_ref().map(|b| b.title.as_str()))
            .unwrap_or("Untitled")
    }

    /// Overdue when flagged by the backend, or still out past the due date.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            BorrowStatus::Overdue => true,
            BorrowStatus::Active => {
                self.return_date.is_none() && self.due_date.is_some_and(|due| due < now)
            }
            _ => false,
        }
    }

    /// Whole days until the due date; negative once overdue.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.due_date.map(|due| (due - now).num_days())
    }

    pub fn can_return(&self) -> bool {
        matches!(self.status, BorrowStatus::Active | BorrowStatus::Overdue)
    }
}

impl Entity for BorrowRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /borrows`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorrowRequest {
    pub book_id: String,
    pub days: u32,
}
