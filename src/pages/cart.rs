//! Cart and Checkout

use bookstore_core::api::services::orders;
use bookstore_core::format::format_currency;
use bookstore_core::validation;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

use crate::components::{EmptyState, FormField, TextAreaField};
use crate::context::use_app_context;
use crate::pages::Page;
use crate::store::{use_app_store, AppStateStoreFields};

const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("cash_on_delivery", "Cash on delivery"),
    ("card", "Card on delivery"),
    ("bank_transfer", "Bank transfer"),
];

#[component]
pub fn CartPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let user = ctx.session.get_untracked().and_then(|s| s.user);
    let address = RwSignal::new(user.as_ref().and_then(|u| u.address.clone()).unwrap_or_default());
    let phone = RwSignal::new(user.as_ref().and_then(|u| u.phone.clone()).unwrap_or_default());
    let notes = RwSignal::new(String::new());
    let payment = RwSignal::new(PAYMENT_METHODS[0].0.to_string());
    let (submitted, set_submitted) = signal(false);
    let (busy, set_busy) = signal(false);

    let checkout = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitted.set(true);
        let notes = notes.get();
        let request = store.cart().with(|cart| {
            cart.to_order_request(&address.get(), &phone.get(), &payment.get(), Some(notes.as_str()))
        });
        let request = match request {
            Ok(r) => r,
            Err(e) => {
                ctx.report_error(&e);
                return;
            }
        };
        set_busy.set(true);
        let api = ctx.api();
        spawn_local(async move {
            let result = orders::place_order(&api, &request).await;
            if let Ok(order) = &result {
                info!("Order {} placed with {} lines", order.id, request.items.len());
                store.cart().write().clear();
            }
            if ctx.report(&result, "Order placed") {
                ctx.navigate(Page::Orders);
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="cart-page">
            <h1>"Your cart"</h1>
            {move || {
                let lines = store.cart().with(|c| c.lines().to_vec());
                if lines.is_empty() {
                    return view! { <EmptyState text="Your cart is empty" /> }.into_any();
                }
                view! {
                    <table class="cart-table">
                        <thead>
                            <tr><th>"Book"</th><th>"Price"</th><th>"Qty"</th><th>"Total"</th><th></th></tr>
                        </thead>
                        <tbody>
                            {lines.into_iter().map(|line| {
                                let id = line.book.id.clone();
                                let id_remove = id.clone();
                                let stock = line.book.stock;
                                view! {
                                    <tr>
                                        <td>{line.book.title.clone()}</td>
                                        <td>{format_currency(line.unit_price())}</td>
                                        <td>
                                            <input
                                                type="number"
                                                class="input qty"
                                                min="0"
                                                max=stock.to_string()
                                                prop:value=line.quantity.to_string()
                                                on:change=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    if validation::quantity(&value).is_none() || value.trim() == "0" {
                                                        let qty = value.trim().parse().unwrap_or(0);
                                                        store.cart().write().set_quantity(&id, qty);
                                                    }
                                                }
                                            />
                                        </td>
                                        <td>{format_currency(line.line_total())}</td>
                                        <td>
                                            <button class="btn-link" on:click=move |_| {
                                                store.cart().write().remove(&id_remove);
                                            }>"Remove"</button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                    <p class="cart-total">
                        "Total: " <strong>{move || format_currency(store.cart().with(|c| c.total()))}</strong>
                    </p>
                }.into_any()
            }}

            <Show when=move || !store.cart().with(|c| c.is_empty())>
                <form class="checkout-form" on:submit=checkout>
                    <h2>"Delivery details"</h2>
                    <FormField label="Shipping address" value=address submitted=submitted
                        validator=|v: &str| validation::required(v, "Shipping address") />
                    <FormField label="Phone" value=phone input_type="tel" validator=validation::phone submitted=submitted />
                    <label class="form-field">
                        <span class="form-label">"Payment"</span>
                        <select class="input" on:change=move |ev| payment.set(event_target_value(&ev))>
                            {PAYMENT_METHODS.iter().map(|(value, label)| view! {
                                <option value=*value selected=move || payment.get() == *value>{*label}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    <TextAreaField label="Notes for the courier" value=notes />
                    <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                        {move || if busy.get() { "Placing order…" } else { "Place order" }}
                    </button>
                </form>
            </Show>
        </section>
    }
}
