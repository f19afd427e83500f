//! Customer Complaint Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{normalize_key, Entity};
use crate::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComplaintStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 4] = [
        ComplaintStatus::Open,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
        ComplaintStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "open",
            ComplaintStatus::InProgress => "in_progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Closed => "closed",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalize_key(raw).as_str() {
            "inprogress" | "processing" | "reviewing" | "underreview" => ComplaintStatus::InProgress,
            "resolved" | "answered" => ComplaintStatus::Resolved,
            "closed" | "rejected" => ComplaintStatus::Closed,
            _ => ComplaintStatus::Open,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "Open",
            ComplaintStatus::InProgress => "In progress",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Closed => "Closed",
        }
    }
}

string_enum_serde!(ComplaintStatus);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct CustomerComplaint {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

json::lenient_keys!(CustomerComplaint, serialize {
    id: ["complaintId", "complaint_id"],
    customer_id: ["customerId", "userId", "user_id"],
    customer_name: ["customerName", "userName", "user_name"],
    subject: ["title"],
    description: ["message", "body"],
    order_id: ["orderId"],
    response: ["adminResponse", "admin_response", "reply"],
    created_at: ["createdAt"],
});

impl CustomerComplaint {
    pub fn is_open(&self) -> bool {
        matches!(self.status, ComplaintStatus::Open | ComplaintStatus::InProgress)
    }

    pub fn has_response(&self) -> bool {
        self.response.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}

impl Entity for CustomerComplaint {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /complaints`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComplaint {
    pub subject: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_alternate_keys() {
        let c: CustomerComplaint = serde_json::from_str(
            r#"{"complaintId": 3, "title": "Late", "message": "Order took 3 weeks",
                "status": "UNDER_REVIEW", "admin_response": "  "}"#,
        )
        .unwrap();
        assert_eq!(c.id(), "3");
        assert_eq!(c.subject, "Late");
        assert_eq!(c.status, ComplaintStatus::InProgress);
        assert!(c.is_open());
        assert!(!c.has_response());
    }

    #[test]
    fn test_new_complaint_skips_missing_order() {
        let body = NewComplaint {
            subject: "Damaged".into(),
            description: "Cover torn".into(),
            order_id: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("order_id").is_none());
    }

    #[test]
    fn test_both_spellings_keep_first() {
        let c: CustomerComplaint = serde_json::from_str(
            r#"{"id": 3, "complaint_id": 3, "user_id": 9, "customer_id": 9,
                "subject": "Late", "title": "Late order", "response": null, "admin_response": "Refunded"}"#,
        )
        .unwrap();
        assert_eq!(c.id(), "3");
        assert_eq!(c.customer_id.as_deref(), Some("9"));
        assert_eq!(c.subject, "Late");
        assert!(c.has_response());
    }
}
