//! Borrowed Books

use bookstore_core::api::services::borrowing;
use bookstore_core::domain::{BorrowRecord, BorrowStatus};
use bookstore_core::format::{format_currency, format_opt_date};
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{EmptyState, ListErrorBanner, LoadingView, StatusBadge, Tone};
use crate::context::use_app_context;
use crate::store::{store_update_borrow, use_app_store, AppStateStoreFields};

fn due_note(record: &BorrowRecord) -> Option<String> {
    let now = Utc::now();
    if !record.can_return() {
        return None;
    }
    if record.is_overdue(now) {
        return Some("Overdue, please return it as soon as possible".to_string());
    }
    record.days_remaining(now).map(|days| match days {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        n => format!("Due in {} days", n),
    })
}

#[component]
pub fn BorrowingPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        store.borrows().write().start_loading();
        spawn_local(async move {
            let result = borrowing::my_borrows(&api).await;
            if let Err(e) = &result {
                ctx.check_auth(e);
            }
            store.borrows().write().finish(result);
        });
    });

    let return_book = move |record: BorrowRecord| {
        let api = ctx.api();
        spawn_local(async move {
            let result = borrowing::return_book(&api, &record).await;
            if let Ok(updated) = &result {
                store_update_borrow(&store, updated.clone());
            }
            ctx.report(&result, "Book returned");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <section class="borrowing-page">
            <h1>"Borrowed books"</h1>
            <ListErrorBanner error=Signal::derive(move || store.borrows().with(|s| s.error.clone())) on_retry=retry />
            {move || store.borrows().with(|state| {
                if state.failed_without_items() {
                    return ().into_any();
                }
                if state.loading && state.items.is_empty() {
                    return view! { <LoadingView /> }.into_any();
                }
                if state.show_empty() {
                    return view! { <EmptyState text="No borrowed books. Find one in the catalogue" /> }.into_any();
                }
                view! {
                    <table class="borrow-table">
                        <thead>
                            <tr>
                                <th>"Book"</th><th>"Status"</th><th>"Borrowed"</th><th>"Due"</th><th>"Fine"</th><th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {state.items.iter().cloned().map(|record| {
                                let note = due_note(&record);
                                let status = if record.is_overdue(Utc::now()) {
                                    BorrowStatus::Overdue
                                } else {
                                    record.status
                                };
                                let can_return = record.can_return();
                                let fine = (record.fine > 0.0).then(|| format_currency(record.fine));
                                let reason = record.rejection_reason.clone();
                                view! {
                                    <tr>
                                        <td>{record.display_title().to_string()}</td>
                                        <td>
                                            <StatusBadge label=status.label() tone=Tone::for_borrow(status) />
                                            {reason.map(|r| view! { <div class="muted">{r}</div> })}
                                        </td>
                                        <td>{format_opt_date(record.borrow_date.as_ref())}</td>
                                        <td>
                                            {format_opt_date(record.due_date.as_ref())}
                                            {note.map(|n| view! { <div class="muted">{n}</div> })}
                                        </td>
                                        <td>{fine.unwrap_or_else(|| "-".to_string())}</td>
                                        <td>
                                            <Show when=move || can_return>
                                                <button class="btn" on:click={
                                                    let record = record.clone();
                                                    move |_| return_book(record.clone())
                                                }>"Return"</button>
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any()
            })}
        </section>
    }
}
