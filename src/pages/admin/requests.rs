//! Request queues: borrow approvals, order handling and complaint replies.

use bookstore_core::api::services::{borrowing, complaints, delivery, orders};
use bookstore_core::domain::{
    BorrowRecord, ComplaintStatus, CustomerComplaint, DeliveryManager, Order, OrderStatus,
};
use bookstore_core::format::format_opt_date;
use bookstore_core::state::ListState;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{list_placeholder, load_list};
use crate::components::{ListErrorBanner, StatusBadge, Tone};
use crate::context::use_app_context;
use crate::pages::complaints::ComplaintCard;
use crate::pages::orders::OrderCard;

#[component]
pub(super) fn BorrowRequestsAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let requests = RwSignal::new(ListState::<BorrowRecord>::default());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        load_list(ctx, requests, |api| async move { borrowing::borrow_requests(&api).await });
    });

    let approve = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let result = borrowing::approve_borrow(&api, &id).await;
            if result.is_ok() {
                requests.update(|l| {
                    l.remove(&id);
                });
            }
            ctx.report(&result, "Borrow approved");
        });
    };

    let reject = move |id: String, reason: String| {
        let api = ctx.api();
        spawn_local(async move {
            let result = borrowing::reject_borrow(&api, &id, &reason).await;
            if result.is_ok() {
                requests.update(|l| {
                    l.remove(&id);
                });
            }
            ctx.report(&result, "Borrow rejected");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <ListErrorBanner error=Signal::derive(move || requests.with(|s| s.error.clone())) on_retry=retry />
        {move || requests.with(|state| {
            if let Some(placeholder) = list_placeholder(state, "No pending borrow requests") {
                return placeholder;
            }
            state.items.iter().cloned().map(|record| {
                let reason = RwSignal::new(String::new());
                let approve_id = record.id.clone();
                let reject_id = record.id.clone();
                view! {
                    <article class="request-card">
                        <header>
                            <strong>{record.display_title().to_string()}</strong>
                            <StatusBadge label=record.status.label() tone=Tone::for_borrow(record.status) />
                        </header>
                        <p class="muted">
                            {format!(
                                "{} · requested {} · due {}",
                                record.user_name.clone().unwrap_or_else(|| "Unknown reader".to_string()),
                                format_opt_date(record.borrow_date.as_ref()),
                                format_opt_date(record.due_date.as_ref()),
                            )}
                        </p>
                        <div class="row-actions">
                            <button class="btn btn-primary" on:click=move |_| approve(approve_id.clone())>"Approve"</button>
                            <input class="input" placeholder="Reason for rejecting"
                                prop:value=move || reason.get()
                                on:input=move |ev| reason.set(event_target_value(&ev)) />
                            <button class="btn btn-danger-outline"
                                on:click=move |_| reject(reject_id.clone(), reason.get())>
                                "Reject"
                            </button>
                        </div>
                    </article>
                }
            }).collect_view().into_any()
        })}
    }
}

#[component]
pub(super) fn OrdersAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let list = RwSignal::new(ListState::<Order>::default());
    let filter = RwSignal::new(None::<OrderStatus>);
    let managers = RwSignal::new(Vec::<DeliveryManager>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let status = filter.get();
        load_list(ctx, list, move |api| async move { orders::all_orders(&api, status).await });
    });

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            match delivery::list_managers(&api).await {
                Ok(found) => managers.set(found),
                Err(e) => ctx.check_auth(&e),
            }
        });
    });

    let set_status = move |id: String, status: OrderStatus| {
        let api = ctx.api();
        spawn_local(async move {
            let result = orders::update_order_status(&api, &id, status).await;
            if let Ok(order) = &result {
                list.update(|l| l.upsert(order.clone()));
            }
            ctx.report(&result, "Order status updated");
        });
    };

    let assign = move |order_id: String, manager_id: String| {
        if manager_id.is_empty() {
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            let result = orders::assign_delivery_manager(&api, &order_id, &manager_id).await;
            ctx.report(&result, "Delivery assigned");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <div class="filter-bar">
            <label>"Status"</label>
            <select class="input" on:change=move |ev| {
                let raw = event_target_value(&ev);
                filter.set(if raw.is_empty() { None } else { Some(OrderStatus::parse(&raw)) });
            }>
                <option value="">"All"</option>
                {OrderStatus::ALL.into_iter().map(|s| view! {
                    <option value=s.as_str()>{s.label()}</option>
                }).collect_view()}
            </select>
        </div>
        <ListErrorBanner error=Signal::derive(move || list.with(|s| s.error.clone())) on_retry=retry />
        {move || list.with(|state| {
            if let Some(placeholder) = list_placeholder(state, "No orders") {
                return placeholder;
            }
            state.items.iter().cloned().map(|order| {
                let status_id = order.id.clone();
                let assign_id = order.id.clone();
                let current = order.status;
                let assigned = order.delivery_manager_id.clone().unwrap_or_default();
                let closed = order.status.is_closed();
                let customer = order.customer_name.clone();
                view! {
                    <div class="admin-order">
                        {customer.map(|n| view! { <p class="muted">{n}</p> })}
                        <OrderCard order=order />
                        <div class="row-actions">
                            <select class="input" disabled=closed on:change=move |ev| {
                                set_status(status_id.clone(), OrderStatus::parse(&event_target_value(&ev)));
                            }>
                                {OrderStatus::ALL.into_iter().map(|s| view! {
                                    <option value=s.as_str() selected={s == current}>{s.label()}</option>
                                }).collect_view()}
                            </select>
                            <select class="input" disabled=closed on:change=move |ev| {
                                assign(assign_id.clone(), event_target_value(&ev));
                            }>
                                <option value="">"Assign delivery…"</option>
                                {move || managers.get().into_iter().map(|m| {
                                    let selected = m.id == assigned;
                                    let label = if m.available {
                                        format!("{} ({} active)", m.name, m.active_deliveries)
                                    } else {
                                        format!("{} (unavailable)", m.name)
                                    };
                                    view! { <option value=m.id.clone() selected={selected}>{label}</option> }
                                }).collect_view()}
                            </select>
                        </div>
                    </div>
                }
            }).collect_view().into_any()
        })}
    }
}

#[component]
pub(super) fn ComplaintsAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let list = RwSignal::new(ListState::<CustomerComplaint>::default());
    let (open_only, set_open_only) = signal(true);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        load_list(ctx, list, |api| async move { complaints::all_complaints(&api).await });
    });

    let respond = move |id: String, response: String, status: ComplaintStatus| {
        let api = ctx.api();
        spawn_local(async move {
            let result = complaints::respond_to_complaint(&api, &id, &response, status).await;
            if let Ok(updated) = &result {
                list.update(|l| l.upsert(updated.clone()));
            }
            ctx.report(&result, "Response sent");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <label class="toggle">
            <input type="checkbox" prop:checked=move || open_only.get()
                on:change=move |ev| set_open_only.set(event_target_checked(&ev)) />
            <span>"Open only"</span>
        </label>
        <ListErrorBanner error=Signal::derive(move || list.with(|s| s.error.clone())) on_retry=retry />
        {move || list.with(|state| {
            if let Some(placeholder) = list_placeholder(state, "No complaints") {
                return placeholder;
            }
            let only_open = open_only.get();
            state.items.iter().filter(|c| !only_open || c.is_open()).cloned().map(|complaint| {
                let id = complaint.id.clone();
                let reply = RwSignal::new(complaint.response.clone().unwrap_or_default());
                let status = RwSignal::new(match complaint.status {
                    ComplaintStatus::Open => ComplaintStatus::InProgress,
                    other => other,
                });
                view! {
                    <ComplaintCard complaint=complaint>
                        <div class="complaint-reply">
                            <textarea class="input" placeholder="Reply to the customer"
                                prop:value=move || reply.get()
                                on:input=move |ev| reply.set(event_target_value(&ev))></textarea>
                            <select class="input" on:change=move |ev| status.set(ComplaintStatus::parse(&event_target_value(&ev)))>
                                {ComplaintStatus::ALL.into_iter().map(|s| view! {
                                    <option value=s.as_str() selected=move || status.get() == s>{s.label()}</option>
                                }).collect_view()}
                            </select>
                            <button class="btn btn-primary"
                                on:click=move |_| respond(id.clone(), reply.get(), status.get())>
                                "Send reply"
                            </button>
                        </div>
                    </ComplaintCard>
                }
            }).collect_view().into_any()
        })}
    }
}
