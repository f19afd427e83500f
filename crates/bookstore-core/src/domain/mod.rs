//! Domain Layer
//!
//! Backend resources as client-side models. Every model decodes
//! defensively: camelCase and snake_case keys, numeric or string ids.

#[macro_use]
mod entity;

mod ad;
mod author;
mod book;
mod borrow;
mod category;
mod complaint;
mod delivery;
mod notification;
mod order;
mod preferences;
mod user;

pub use ad::PublicAd;
pub use author::Author;
pub use book::Book;
pub use borrow::{BorrowRecord, BorrowRequest, BorrowStatus};
pub use category::Category;
pub use complaint::{ComplaintStatus, CustomerComplaint, NewComplaint};
pub use delivery::{DeliveryManager, DeliveryStatus, DeliveryTask};
pub use entity::{normalize_key, Entity};
pub use notification::{Notification, NotificationInbox, NotificationKind};
pub use order::{Order, OrderItem, OrderLineRequest, OrderStatus, PlaceOrderRequest};
pub use preferences::UserPreferences;
pub use user::{AuthSession, Role, User};
