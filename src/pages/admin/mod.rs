//! Library Management
//!
//! Back-office screens for librarians and administrators, one tab each.

mod ads;
mod catalog;
mod requests;

use bookstore_core::domain::Entity;
use bookstore_core::state::ListState;
use bookstore_core::{ApiClient, ApiResult};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

use crate::components::{EmptyState, LoadingView};
use crate::context::AppContext;

use ads::AdsAdmin;
use catalog::{AuthorsAdmin, BooksAdmin, CategoriesAdmin};
use requests::{BorrowRequestsAdmin, ComplaintsAdmin, OrdersAdmin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Books,
    Categories,
    Authors,
    Borrows,
    Orders,
    Complaints,
    Ads,
}

impl AdminTab {
    const ALL: [AdminTab; 7] = [
        AdminTab::Books,
        AdminTab::Categories,
        AdminTab::Authors,
        AdminTab::Borrows,
        AdminTab::Orders,
        AdminTab::Complaints,
        AdminTab::Ads,
    ];

    fn label(&self) -> &'static str {
        match self {
            AdminTab::Books => "Books",
            AdminTab::Categories => "Categories",
            AdminTab::Authors => "Authors",
            AdminTab::Borrows => "Borrow requests",
            AdminTab::Orders => "Orders",
            AdminTab::Complaints => "Complaints",
            AdminTab::Ads => "Ads",
        }
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let (tab, set_tab) = signal(AdminTab::Books);

    view! {
        <section class="admin-page">
            <h1>"Manage library"</h1>
            <nav class="tab-bar">
                {AdminTab::ALL.into_iter().map(|t| view! {
                    <button
                        class=move || if tab.get() == t { "tab active" } else { "tab" }
                        on:click=move |_| set_tab.set(t)
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </nav>
            {move || match tab.get() {
                AdminTab::Books => view! { <BooksAdmin /> }.into_any(),
                AdminTab::Categories => view! { <CategoriesAdmin /> }.into_any(),
                AdminTab::Authors => view! { <AuthorsAdmin /> }.into_any(),
                AdminTab::Borrows => view! { <BorrowRequestsAdmin /> }.into_any(),
                AdminTab::Orders => view! { <OrdersAdmin /> }.into_any(),
                AdminTab::Complaints => view! { <ComplaintsAdmin /> }.into_any(),
                AdminTab::Ads => view! { <AdsAdmin /> }.into_any(),
            }}
        </section>
    }
}

/// Fetch into a tab-local list, signing out on auth failures.
fn load_list<T, F, Fut>(ctx: AppContext, list: RwSignal<ListState<T>>, fetch: F)
where
    T: Entity + Send + Sync + 'static,
    F: FnOnce(ApiClient) -> Fut + 'static,
    Fut: Future<Output = ApiResult<Vec<T>>> + 'static,
{
    list.update(|l| l.start_loading());
    let api = ctx.api();
    spawn_local(async move {
        let result = fetch(api).await;
        if let Err(e) = &result {
            ctx.check_auth(e);
        }
        list.update(|l| l.finish(result));
    });
}

/// Loading or empty placeholder; `None` once there is something to list.
/// Errors render in the `ListErrorBanner` above the list.
fn list_placeholder<T: Entity>(state: &ListState<T>, empty: &'static str) -> Option<AnyView> {
    if state.failed_without_items() {
        return Some(().into_any());
    }
    if state.loading && state.items.is_empty() {
        return Some(view! { <LoadingView /> }.into_any());
    }
    if state.show_empty() {
        return Some(view! { <EmptyState text=empty /> }.into_any());
    }
    None
}

/// `None` for a blank field, otherwise the trimmed text.
fn optional_text(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(value: &str, field: &str) -> Result<Option<T>, String> {
    match optional_text(value) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| format!("{} must be a number", field)),
    }
}
