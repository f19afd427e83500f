//! Customer Support
//!
//! File a complaint (optionally about an order) and follow the replies.

use bookstore_core::api::services::complaints::{self, MIN_DESCRIPTION_LEN};
use bookstore_core::domain::{CustomerComplaint, NewComplaint};
use bookstore_core::format::format_opt_date;
use bookstore_core::validation;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{EmptyState, FormField, ListErrorBanner, LoadingView, StatusBadge, TextAreaField, Tone};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ComplaintsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let subject = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let order_id = RwSignal::new(String::new());
    let (submitted, set_submitted) = signal(false);
    let (busy, set_busy) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        store.complaints().write().start_loading();
        spawn_local(async move {
            let result = complaints::my_complaints(&api).await;
            if let Err(e) = &result {
                ctx.check_auth(e);
            }
            store.complaints().write().finish(result);
        });
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitted.set(true);
        let complaint = NewComplaint {
            subject: subject.get().trim().to_string(),
            description: description.get().trim().to_string(),
            order_id: Some(order_id.get().trim().to_string()).filter(|s| !s.is_empty()),
        };
        set_busy.set(true);
        let api = ctx.api();
        spawn_local(async move {
            let result = complaints::submit_complaint(&api, &complaint).await;
            if let Ok(created) = &result {
                store.complaints().write().upsert(created.clone());
                subject.set(String::new());
                description.set(String::new());
                order_id.set(String::new());
                set_submitted.set(false);
            }
            ctx.report(&result, "Thanks, we will get back to you soon");
            set_busy.set(false);
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <section class="complaints-page">
            <h1>"Support"</h1>
            <form class="complaint-form" on:submit=submit>
                <FormField label="Subject" value=subject submitted=submitted
                    validator=|v: &str| validation::required(v, "Subject") />
                <FormField label="Order number (optional)" value=order_id />
                <TextAreaField label="What went wrong?" value=description
                    placeholder=format!("At least {} characters", MIN_DESCRIPTION_LEN) />
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>"Send"</button>
            </form>

            <h2>"Your requests"</h2>
            <ListErrorBanner error=Signal::derive(move || store.complaints().with(|s| s.error.clone())) on_retry=retry />
            {move || store.complaints().with(|state| {
                if state.failed_without_items() {
                    return ().into_any();
                }
                if state.loading && state.items.is_empty() {
                    return view! { <LoadingView /> }.into_any();
                }
                if state.show_empty() {
                    return view! { <EmptyState text="No support requests" /> }.into_any();
                }
                state.items.iter().cloned().map(|c| view! { <ComplaintCard complaint=c /> })
                    .collect_view()
                    .into_any()
            })}
        </section>
    }
}

#[component]
pub fn ComplaintCard(complaint: CustomerComplaint, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    view! {
        <article class="complaint-card">
            <header>
                <strong>{complaint.subject.clone()}</strong>
                <StatusBadge label=complaint.status.label() tone=Tone::for_complaint(complaint.status) />
                <span class="muted">{format_opt_date(complaint.created_at.as_ref())}</span>
            </header>
            {complaint.customer_name.clone().map(|n| view! { <p class="muted">{format!("From {}", n)}</p> })}
            {complaint.order_id.clone().map(|id| view! { <p class="muted">{format!("Order #{}", id)}</p> })}
            <p>{complaint.description.clone()}</p>
            {complaint.has_response().then(|| view! {
                <blockquote class="complaint-response">{complaint.response.clone().unwrap_or_default()}</blockquote>
            })}
            {children.map(|c| c())}
        </article>
    }
}
