//! Notification Entity and Inbox
//!
//! The inbox mirrors the server's read/unread flags locally so the badge
//! count updates immediately after a mark-read call succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{normalize_key, Entity};
use crate::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationKind {
    Order,
    Borrow,
    Delivery,
    Complaint,
    Promotion,
    #[default]
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Order => "order",
            NotificationKind::Borrow => "borrow",
            NotificationKind::Delivery => "delivery",
            NotificationKind::Complaint => "complaint",
            NotificationKind::Promotion => "promotion",
            NotificationKind::System => "system",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalize_key(raw).as_str() {
            "order" | "orderstatus" | "orderupdate" => NotificationKind::Order,
            "borrow" | "borrowing" | "loan" | "duereminder" => NotificationKind::Borrow,
            "delivery" | "shipping" => NotificationKind::Delivery,
            "complaint" | "complaintresponse" => NotificationKind::Complaint,
            "promotion" | "promo" | "ad" | "offer" => NotificationKind::Promotion,
            _ => NotificationKind::System,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Order => "Order",
            NotificationKind::Borrow => "Borrowing",
            NotificationKind::Delivery => "Delivery",
            NotificationKind::Complaint => "Complaint",
            NotificationKind::Promotion => "Offer",
            NotificationKind::System => "System",
        }
    }
}

string_enum_serde!(NotificationKind);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Notification {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub kind: NotificationKind,
    #[serde(default, deserialize_with = "json::lenient_bool")]
    pub read: bool,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub reference_id: Option<String>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

json::lenient_keys!(Notification, serialize {
    id: ["notificationId", "notification_id"],
    message: ["body", "content"],
    kind: ["type", "notificationType", "notification_type"],
    read: ["isRead", "is_read", "seen"],
    reference_id: ["referenceId", "relatedId", "related_id"],
    created_at: ["createdAt"],
});

impl Entity for Notification {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Local notification list, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationInbox {
    items: Vec<Notification>,
}

impl NotificationInbox {
    pub fn new(items: Vec<Notification>) -> Self {
        let mut inbox = Self::default();
        inbox.replace(items);
        inbox
    }

    /// Swap in a freshly fetched list. Undated entries sort last.
    pub fn replace(&mut self, mut items: Vec<Notification>) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.items = items;
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Returns false when the id is unknown or already read.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                true
            }
            _ => false,
        }
    }

    /// Returns how many notifications changed state.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.items.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        changed
    }

    pub fn remove(&mut self, id: &str) -> Option<Notification> {
        let pos = self.items.iter().position(|n| n.id == id)?;
        Some(self.items.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(id: &str, read: bool, day: Option<u32>) -> Notification {
        Notification {
            id: id.into(),
            title: format!("Note {}", id),
            read,
            created_at: day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_replace_orders_newest_first() {
        let inbox = NotificationInbox::new(vec![
            note("a", false, Some(1)),
            note("b", false, None),
            note("c", true, Some(3)),
        ]);
        let ids: Vec<&str> = inbox.items().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(inbox.unread_count(), 2);
    }

    #[test]
    fn test_mark_read_bookkeeping() {
        let mut inbox = NotificationInbox::new(vec![note("a", false, Some(1)), note("b", true, Some(2))]);
        assert!(inbox.mark_read("a"));
        assert!(!inbox.mark_read("a"));
        assert!(!inbox.mark_read("b"));
        assert!(!inbox.mark_read("missing"));
        assert_eq!(inbox.unread_count(), 0);
    }

    #[test]
    fn test_mark_all_read_counts_changes() {
        let mut inbox = NotificationInbox::new(vec![
            note("a", false, Some(1)),
            note("b", true, Some(2)),
            note("c", false, Some(3)),
        ]);
        assert_eq!(inbox.mark_all_read(), 2);
        assert_eq!(inbox.mark_all_read(), 0);
    }

    #[test]
    fn test_remove() {
        let mut inbox = NotificationInbox::new(vec![note("a", false, Some(1))]);
        assert_eq!(inbox.remove("a").map(|n| n.id), Some("a".to_string()));
        assert!(inbox.remove("a").is_none());
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_decode_type_and_read_aliases() {
        let n: Notification = serde_json::from_str(
            r#"{"id": 1, "title": "Shipped", "body": "On its way", "type": "ORDER_UPDATE", "is_read": 0}"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::Order);
        assert!(!n.read);
        assert_eq!(n.message, "On its way");
    }

    #[test]
    fn test_both_spellings_keep_first() {
        let n: Notification = serde_json::from_str(
            r#"{"id": 1, "notification_id": 1, "title": "Due", "message": "Return soon", "body": "Return soon",
                "type": "BORROW_DUE", "notification_type": "BORROW_DUE", "is_read": 1, "isRead": true}"#,
        )
        .unwrap();
        assert_eq!(n.id(), "1");
        assert_eq!(n.message, "Return soon");
        assert!(n.read);
    }
}
