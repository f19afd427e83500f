//! Pages
//!
//! One component per screen. `App` switches between them on the `Page`
//! signal in `AppContext`.

mod admin;
mod borrowing;
mod books;
mod cart;
mod complaints;
mod delivery;
mod login;
mod notifications;
mod orders;
mod settings;

pub use admin::AdminPage;
pub use books::BooksPage;
pub use borrowing::BorrowingPage;
pub use cart::CartPage;
pub use complaints::ComplaintsPage;
pub use delivery::DeliveryPage;
pub use login::{LoginPage, RegisterPage};
pub use notifications::NotificationsPage;
pub use orders::OrdersPage;
pub use settings::SettingsPage;

use bookstore_core::domain::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Books,
    Cart,
    Orders,
    Borrowing,
    Deliveries,
    Complaints,
    Notifications,
    Settings,
    Admin,
}

impl Page {
    /// Order of the navigation bar.
    pub const NAV: [Page; 9] = [
        Page::Books,
        Page::Cart,
        Page::Orders,
        Page::Borrowing,
        Page::Deliveries,
        Page::Complaints,
        Page::Notifications,
        Page::Admin,
        Page::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Login => "Sign in",
            Page::Register => "Create account",
            Page::Books => "Books",
            Page::Cart => "Cart",
            Page::Orders => "Orders",
            Page::Borrowing => "Borrowing",
            Page::Deliveries => "Deliveries",
            Page::Complaints => "Support",
            Page::Notifications => "Notifications",
            Page::Settings => "Settings",
            Page::Admin => "Manage",
        }
    }

    pub fn requires_sign_in(&self) -> bool {
        !matches!(self, Page::Login | Page::Register | Page::Books | Page::Settings)
    }

    pub fn visible_to(&self, role: Option<Role>) -> bool {
        match (self, role) {
            (Page::Login | Page::Register, None) => true,
            (Page::Login | Page::Register, Some(_)) => false,
            (_, None) => !self.requires_sign_in(),
            (Page::Admin, Some(role)) => role.can_manage_library(),
            (Page::Deliveries, Some(role)) => role.is_delivery_manager(),
            (Page::Cart | Page::Orders | Page::Borrowing | Page::Complaints, Some(role)) => {
                !role.is_delivery_manager()
            }
            _ => true,
        }
    }

    pub fn home_for(role: Role) -> Page {
        if role.is_delivery_manager() {
            Page::Deliveries
        } else if role.can_manage_library() {
            Page::Admin
        } else {
            Page::Books
        }
    }
}
