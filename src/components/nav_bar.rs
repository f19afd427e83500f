//! Navigation Bar Component
//!
//! Page tabs filtered by role, with cart and unread badges.

use bookstore_core::api::services::notifications;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use crate::context::use_app_context;
use crate::pages::Page;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // Refresh the unread badge whenever lists reload
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if !ctx.is_signed_in() {
            store.unread_count().set(0);
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            match notifications::unread_count(&api).await {
                Ok(count) => store.unread_count().set(count),
                Err(e) => debug!("Unread count unavailable: {}", e),
            }
        });
    });

    let badge = move |page: Page| -> Option<usize> {
        let count = match page {
            Page::Cart => store.cart().with(|c| c.item_count() as usize),
            Page::Notifications => store.unread_count().get(),
            _ => 0,
        };
        (count > 0).then_some(count)
    };

    view! {
        <nav class="nav-bar">
            <span class="nav-brand" on:click=move |_| ctx.navigate(Page::Books)>"Bookstore"</span>
            <div class="nav-tabs">
                {move || {
                    let role = ctx.role();
                    Page::NAV
                        .into_iter()
                        .filter(|p| p.visible_to(role))
                        .map(|page| {
                            let class = move || {
                                if ctx.page.get() == page { "nav-tab active" } else { "nav-tab" }
                            };
                            view! {
                                <button class=class on:click=move |_| ctx.navigate(page)>
                                    {page.label()}
                                    {move || badge(page).map(|n| view! { <span class="nav-badge">{n}</span> })}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="nav-user">
                {move || match ctx.session.get() {
                    Some(session) => {
                        let name = session
                            .user
                            .as_ref()
                            .map(|u| u.name.clone())
                            .filter(|n| !n.is_empty())
                            .unwrap_or_else(|| session.role().label().to_string());
                        view! { <span class="nav-username">{name}</span> }.into_any()
                    }
                    None => view! {
                        <button class="btn btn-primary" on:click=move |_| ctx.navigate(Page::Login)>
                            "Sign in"
                        </button>
                    }
                    .into_any(),
                }}
            </div>
        </nav>
    }
}
