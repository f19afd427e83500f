//! Delivery Manager Workspace
//!
//! Assigned deliveries with one button per allowed next status.

use bookstore_core::api::services::delivery;
use bookstore_core::domain::{DeliveryStatus, DeliveryTask};
use bookstore_core::format::format_opt_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::components::{EmptyState, ListErrorBanner, LoadingView, StatusBadge, Tone};
use crate::context::use_app_context;
use crate::store::{store_update_delivery, use_app_store, AppStateStoreFields};

#[component]
pub fn DeliveryPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (available, set_available) = signal(None::<bool>);
    let (show_closed, set_show_closed) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        store.deliveries().write().start_loading();
        spawn_local(async move {
            match delivery::my_availability(&api).await {
                Ok(flag) => set_available.set(Some(flag)),
                Err(e) => warn!("Could not load availability: {}", e),
            }
            let result = delivery::my_deliveries(&api).await;
            if let Err(e) = &result {
                ctx.check_auth(e);
            }
            store.deliveries().write().finish(result);
        });
    });

    let toggle_availability = move |ev: web_sys::Event| {
        let next = event_target_checked(&ev);
        let api = ctx.api();
        spawn_local(async move {
            let result = delivery::set_availability(&api, next).await;
            let on_duty = *result.as_ref().unwrap_or(&next);
            let message = if on_duty { "You are available for deliveries" } else { "You are off duty" };
            match &result {
                Ok(stored) => set_available.set(Some(*stored)),
                // Snap the checkbox back to the last known state.
                Err(_) => set_available.set(available.get_untracked()),
            }
            ctx.report(&result, message);
        });
    };

    let advance = Callback::new(move |(task, next, notes): (DeliveryTask, DeliveryStatus, String)| {
        let api = ctx.api();
        spawn_local(async move {
            let notes = Some(notes.as_str()).filter(|n| !n.trim().is_empty());
            let result = delivery::update_delivery_status(&api, &task, next, notes).await;
            if let Ok(updated) = &result {
                store_update_delivery(&store, updated.clone());
            }
            ctx.report(&result, &format!("Delivery marked {}", next.label().to_lowercase()));
        });
    });

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <section class="delivery-page">
            <header class="page-header">
                <h1>"My deliveries"</h1>
                <label class="toggle">
                    <input type="checkbox" prop:checked=move || available.get().unwrap_or(false) on:change=toggle_availability />
                    <span>"Available"</span>
                </label>
                <label class="toggle">
                    <input type="checkbox" prop:checked=move || show_closed.get()
                        on:change=move |ev| set_show_closed.set(event_target_checked(&ev)) />
                    <span>"Show completed"</span>
                </label>
            </header>
            <ListErrorBanner error=Signal::derive(move || store.deliveries().with(|s| s.error.clone())) on_retry=retry />
            {move || store.deliveries().with(|state| {
                if state.failed_without_items() {
                    return ().into_any();
                }
                if state.loading && state.items.is_empty() {
                    return view! { <LoadingView /> }.into_any();
                }
                let tasks: Vec<DeliveryTask> = state
                    .items
                    .iter()
                    .filter(|t| show_closed.get() || !t.is_terminal())
                    .cloned()
                    .collect();
                if tasks.is_empty() {
                    return view! { <EmptyState text="No deliveries assigned to you" /> }.into_any();
                }
                tasks.into_iter().map(|task| view! { <DeliveryCard task=task on_advance=advance /> })
                    .collect_view()
                    .into_any()
            })}
        </section>
    }
}

#[component]
fn DeliveryCard(task: DeliveryTask, on_advance: Callback<(DeliveryTask, DeliveryStatus, String)>) -> impl IntoView {
    let notes = RwSignal::new(String::new());
    let next = task.next_statuses();

    view! {
        <article class="delivery-card">
            <header>
                <span class="order-id">{format!("Order #{}", task.order_id)}</span>
                <StatusBadge label=task.status.label() tone=Tone::for_delivery(task.status) />
            </header>
            <p class="delivery-address">{task.display_address().to_string()}</p>
            <p class="delivery-customer">
                {task.customer_name.clone().unwrap_or_default()}
                {task.customer_phone.clone().map(|p| view! { <a href=format!("tel:{}", p)>{format!(" · {}", p)}</a> })}
            </p>
            <p class="muted">{format!("Assigned {}", format_opt_date(task.assigned_at.as_ref()))}</p>
            {(!next.is_empty()).then(|| view! {
                <div class="delivery-actions">
                    <input
                        class="input"
                        placeholder="Notes (optional)"
                        prop:value=move || notes.get()
                        on:input=move |ev| notes.set(event_target_value(&ev))
                    />
                    {next.iter().map(|status| {
                        let status = *status;
                        let task = task.clone();
                        let class = if status == DeliveryStatus::Failed || status == DeliveryStatus::Cancelled {
                            "btn btn-danger-outline"
                        } else {
                            "btn btn-primary"
                        };
                        view! {
                            <button class=class on:click=move |_| on_advance.run((task.clone(), status, notes.get()))>
                                {status.action_label()}
                            </button>
                        }
                    }).collect_view()}
                </div>
            })}
        </article>
    }
}
