//! Inline Load States
//!
//! What a list shows while loading, after a failed load (with a manual
//! retry), and when there is nothing to show.

use leptos::prelude::*;

#[component]
pub fn ErrorView(#[prop(into)] message: String, #[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="error-view" role="alert">
            <span class="error-text">{message}</span>
            <button class="btn" on:click=move |_| on_retry.run(())>"Retry"</button>
        </div>
    }
}

/// Error line above a list. Items from the last good load stay below it.
#[component]
pub fn ListErrorBanner(#[prop(into)] error: Signal<Option<String>>, #[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <ErrorView message=message on_retry=on_retry /> })
    }
}

#[component]
pub fn LoadingView(#[prop(into, default = "Loading…".to_string())] text: String) -> impl IntoView {
    view! { <div class="loading-view">{text}</div> }
}

#[component]
pub fn EmptyState(#[prop(into)] text: String) -> impl IntoView {
    view! { <div class="empty-state">{text}</div> }
}
