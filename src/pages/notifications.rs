//! Notification Inbox

use bookstore_core::api::services::notifications;
use bookstore_core::domain::NotificationKind;
use bookstore_core::format::{format_opt_date, format_relative};
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::components::{DeleteConfirmButton, EmptyState, ListErrorBanner, LoadingView};
use crate::context::use_app_context;
use crate::pages::Page;
use crate::store::{
    store_mark_all_read, store_mark_read, store_remove_notification, use_app_store, AppStateStoreFields,
};

/// Where tapping a notification leads.
fn target_page(kind: NotificationKind) -> Option<Page> {
    match kind {
        NotificationKind::Order => Some(Page::Orders),
        NotificationKind::Borrow => Some(Page::Borrowing),
        NotificationKind::Delivery => Some(Page::Deliveries),
        NotificationKind::Complaint => Some(Page::Complaints),
        NotificationKind::Promotion => Some(Page::Books),
        NotificationKind::System => None,
    }
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        set_loading.set(true);
        spawn_local(async move {
            match notifications::list_notifications(&api).await {
                Ok(items) => {
                    store.inbox().write().replace(items);
                    let unread = store.inbox().with(|i| i.unread_count());
                    store.unread_count().set(unread);
                    set_error.set(None);
                }
                Err(e) => {
                    ctx.check_auth(&e);
                    set_error.set(Some(e.message));
                }
            }
            set_loading.set(false);
        });
    });

    let open = move |id: String, kind: NotificationKind, read: bool| {
        if !read {
            store_mark_read(&store, &id);
            let api = ctx.api();
            spawn_local(async move {
                if let Err(e) = notifications::mark_read(&api, &id).await {
                    warn!("Could not mark {} read: {}", id, e);
                }
            });
        }
        if let Some(page) = target_page(kind) {
            ctx.navigate(page);
        }
    };

    let mark_all = move |_| {
        let api = ctx.api();
        spawn_local(async move {
            let result = notifications::mark_all_read(&api).await;
            if result.is_ok() {
                store_mark_all_read(&store);
            }
            ctx.report(&result, "All caught up");
        });
    };

    let delete = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let result = notifications::delete_notification(&api, &id).await;
            if result.is_ok() {
                store_remove_notification(&store, &id);
            }
            ctx.report(&result, "Notification deleted");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <section class="notifications-page">
            <header class="page-header">
                <h1>"Notifications"</h1>
                <button
                    class="btn"
                    disabled=move || store.inbox().with(|i| i.unread_count() == 0)
                    on:click=mark_all
                >
                    "Mark all read"
                </button>
            </header>
            <ListErrorBanner error=error on_retry=retry />
            {move || {
                let items = store.inbox().with(|i| i.items().to_vec());
                if error.with(Option::is_some) && items.is_empty() {
                    return ().into_any();
                }
                if loading.get() && items.is_empty() {
                    return view! { <LoadingView /> }.into_any();
                }
                if items.is_empty() {
                    return view! { <EmptyState text="Nothing new" /> }.into_any();
                }
                let now = Utc::now();
                view! {
                    <ul class="notification-list">
                        {items.into_iter().map(|n| {
                            let when = n
                                .created_at
                                .as_ref()
                                .map(|t| format_relative(t, &now))
                                .unwrap_or_else(|| format_opt_date(None));
                            let (id, kind, read) = (n.id.clone(), n.kind, n.read);
                            let delete_id = n.id.clone();
                            view! {
                                <li class=if n.read { "notification" } else { "notification unread" }>
                                    <div class="notification-body" on:click=move |_| open(id.clone(), kind, read)>
                                        <span class="notification-kind">{n.kind.label()}</span>
                                        <strong>{n.title.clone()}</strong>
                                        <p>{n.message.clone()}</p>
                                        <span class="muted">{when}</span>
                                    </div>
                                    <DeleteConfirmButton on_confirm=move |_| delete(delete_id.clone()) />
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_any()
            }}
        </section>
    }
}
