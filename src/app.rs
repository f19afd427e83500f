//! Bookstore Frontend App
//!
//! Restores settings and the saved session, wires the API client into
//! context and switches between pages.

use bookstore_core::prefs::{self, AppSettings};
use bookstore_core::{ApiClient, ClientConfig};
use leptos::prelude::*;
use log::{info, warn};
use reactive_stores::Store;

use crate::components::{NavBar, Snackbar};
use crate::context::AppContext;
use crate::pages::{
    AdminPage, BooksPage, BorrowingPage, CartPage, ComplaintsPage, DeliveryPage, LoginPage, NotificationsPage,
    OrdersPage, Page, RegisterPage, SettingsPage,
};
use crate::storage::LocalStorageStore;
use crate::store::{store_clear_user_data, AppState};
use crate::theme::apply_theme;

#[component]
pub fn App() -> impl IntoView {
    let settings = AppSettings::load(&LocalStorageStore);
    apply_theme(settings.theme);

    let config = ClientConfig::default().with_override(settings.server_override.as_deref());
    info!("Using API at {}", config.api_base());
    let api = ApiClient::with_reqwest(&config);

    let session = match prefs::load_session(&LocalStorageStore) {
        Ok(session) => session,
        Err(e) => {
            warn!("Could not restore session: {}", e);
            None
        }
    };
    if let Some(s) = &session {
        api.set_token(Some(s.token.clone()));
    }

    let ctx = AppContext::new(api, session);
    let store = Store::new(AppState::default());
    provide_context(ctx);
    provide_context(store);
    provide_context(RwSignal::new(settings));

    // Signed out: drop the previous user's data
    Effect::new(move |_| {
        if ctx.session.with(Option::is_none) {
            store_clear_user_data(&store);
        }
    });

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Login => view! { <LoginPage /> }.into_any(),
                    Page::Register => view! { <RegisterPage /> }.into_any(),
                    Page::Books => view! { <BooksPage /> }.into_any(),
                    Page::Cart => view! { <CartPage /> }.into_any(),
                    Page::Orders => view! { <OrdersPage /> }.into_any(),
                    Page::Borrowing => view! { <BorrowingPage /> }.into_any(),
                    Page::Deliveries => view! { <DeliveryPage /> }.into_any(),
                    Page::Complaints => view! { <ComplaintsPage /> }.into_any(),
                    Page::Notifications => view! { <NotificationsPage /> }.into_any(),
                    Page::Settings => view! { <SettingsPage /> }.into_any(),
                    Page::Admin => view! { <AdminPage /> }.into_any(),
                }}
            </main>
            <Snackbar />
        </div>
    }
}
