//! Order History

use bookstore_core::api::services::orders;
use bookstore_core::domain::Order;
use bookstore_core::format::{format_currency, format_opt_date};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{DeleteConfirmButton, EmptyState, ListErrorBanner, LoadingView, StatusBadge, Tone};
use crate::context::use_app_context;
use crate::store::{store_update_order, use_app_store, AppStateStoreFields};

#[component]
pub fn OrdersPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        store.orders().write().start_loading();
        spawn_local(async move {
            let result = orders::my_orders(&api).await;
            if let Err(e) = &result {
                ctx.check_auth(e);
            }
            store.orders().write().finish(result);
        });
    });

    let cancel = Callback::new(move |order: Order| {
        let api = ctx.api();
        spawn_local(async move {
            let result = orders::cancel_order(&api, &order).await;
            if let Ok(updated) = &result {
                store_update_order(&store, updated.clone());
            }
            ctx.report(&result, "Order cancelled");
        });
    });

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <section class="orders-page">
            <h1>"My orders"</h1>
            <ListErrorBanner error=Signal::derive(move || store.orders().with(|s| s.error.clone())) on_retry=retry />
            {move || store.orders().with(|state| {
                if state.failed_without_items() {
                    return ().into_any();
                }
                if state.loading && state.items.is_empty() {
                    return view! { <LoadingView /> }.into_any();
                }
                if state.show_empty() {
                    return view! { <EmptyState text="You have not ordered anything yet" /> }.into_any();
                }
                state.items.iter().cloned().map(|order| view! { <OrderCard order=order on_cancel=cancel /> })
                    .collect_view()
                    .into_any()
            })}
        </section>
    }
}

#[component]
pub fn OrderCard(order: Order, #[prop(optional, into)] on_cancel: Option<Callback<Order>>) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);
    let can_cancel = order.can_cancel();
    let cancel_target = order.clone();
    let items = order.items.clone();

    view! {
        <article class="order-card">
            <header class="order-header" on:click=move |_| set_expanded.update(|v| *v = !*v)>
                <span class="order-id">{format!("Order #{}", order.id)}</span>
                <StatusBadge label=order.status.label() tone=Tone::for_order(order.status) />
                <span class="order-date">{format_opt_date(order.created_at.as_ref())}</span>
                <span class="order-total">{format_currency(order.display_total())}</span>
            </header>
            <Show when=move || expanded.get()>
                <ul class="order-items">
                    {items.iter().map(|item| view! {
                        <li>
                            <span>{item.display_title().to_string()}</span>
                            <span>{format!(" × {}", item.quantity)}</span>
                            <span class="line-total">{format_currency(item.line_total())}</span>
                        </li>
                    }).collect_view()}
                </ul>
                {order.shipping_address.clone().map(|a| view! { <p class="order-address">{a}</p> })}
            </Show>
            {on_cancel.filter(|_| can_cancel).map(|cb| view! {
                <DeleteConfirmButton
                    label="Cancel order"
                    question="Cancel this order?"
                    on_confirm=move |_| cb.run(cancel_target.clone())
                />
            })}
        </article>
    }
}
