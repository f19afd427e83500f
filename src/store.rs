//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Each screen's
//! list lives in a `ListState` so loading and error flags travel with it.

use bookstore_core::cart::Cart;
use bookstore_core::domain::{
    Author, Book, BorrowRecord, Category, CustomerComplaint, DeliveryTask, NotificationInbox, Order,
    PublicAd, UserPreferences,
};
use bookstore_core::state::ListState;
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Current page of the catalogue
    pub books: ListState<Book>,
    pub categories: ListState<Category>,
    pub authors: ListState<Author>,
    /// Live banners for the browse page
    pub ads: Vec<PublicAd>,
    pub orders: ListState<Order>,
    pub borrows: ListState<BorrowRecord>,
    pub deliveries: ListState<DeliveryTask>,
    pub complaints: ListState<CustomerComplaint>,
    pub inbox: NotificationInbox,
    /// Server-side count, refreshed with the nav bar
    pub unread_count: usize,
    pub cart: Cart,
    pub preferences: UserPreferences,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace an order in place after a status change
pub fn store_update_order(store: &AppStore, order: Order) {
    store.orders().write().upsert(order);
}

pub fn store_update_borrow(store: &AppStore, record: BorrowRecord) {
    store.borrows().write().upsert(record);
}

pub fn store_update_delivery(store: &AppStore, task: DeliveryTask) {
    store.deliveries().write().upsert(task);
}

pub fn store_remove_book(store: &AppStore, book_id: &str) {
    store.books().write().remove(book_id);
    store.cart().write().remove(book_id);
}

/// Mark one notification read locally, keeping the badge in step
pub fn store_mark_read(store: &AppStore, id: &str) {
    if store.inbox().write().mark_read(id) {
        store.unread_count().update(|n| *n = n.saturating_sub(1));
    }
}

pub fn store_mark_all_read(store: &AppStore) {
    store.inbox().write().mark_all_read();
    store.unread_count().set(0);
}

pub fn store_remove_notification(store: &AppStore, id: &str) {
    let removed = store.inbox().write().remove(id);
    if removed.is_some_and(|n| !n.read) {
        store.unread_count().update(|n| *n = n.saturating_sub(1));
    }
}

/// Drop everything tied to the signed-out user
pub fn store_clear_user_data(store: &AppStore) {
    store.orders().set(ListState::default());
    store.borrows().set(ListState::default());
    store.deliveries().set(ListState::default());
    store.complaints().set(ListState::default());
    store.inbox().set(NotificationInbox::default());
    store.unread_count().set(0);
    store.cart().set(Cart::default());
    store.preferences().set(UserPreferences::default());
}
