//! Book Catalogue
//!
//! Search, filter and page through books; add to cart or request a borrow.

use bookstore_core::api::services::books::{self, BookQuery, BookSort};
use bookstore_core::api::services::{ads, borrowing, catalog};
use bookstore_core::domain::Book;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use crate::components::{BookCard, EmptyState, ListErrorBanner, LoadingView};
use crate::context::use_app_context;
use crate::pages::Page;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BooksPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let query = RwSignal::new(BookQuery::default());
    let search_text = RwSignal::new(String::new());
    let (has_more, set_has_more) = signal(false);
    let (total, set_total) = signal::<Option<u32>>(None);

    // Books for the current query
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let q = query.get();
        let api = ctx.api();
        store.books().write().start_loading();
        spawn_local(async move {
            let result = books::list_books(&api, &q).await;
            let items = result.map(|page| {
                set_has_more.set(page.has_more);
                set_total.set(page.total);
                page.items
            });
            if let Err(e) = &items {
                ctx.check_auth(e);
            }
            store.books().write().finish(items);
        });
    });

    // Filters and banners
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            let result = catalog::list_categories(&api).await;
            store.categories().write().finish(result);
            match ads::active_ads(&api).await {
                Ok(list) => store.ads().set(list),
                Err(e) => debug!("No ads: {}", e),
            }
        });
    });

    let apply_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        query.update(|q| {
            q.search = search_text.get_untracked();
            q.page = 1;
        });
    };

    let add_to_cart = Callback::new(move |book: Book| {
        let added = store.cart().write().add(&book, 1);
        match added {
            Ok(n) => ctx.toast(format!("\"{}\" in cart ({})", book.title, n)),
            Err(e) => ctx.report_error(&e),
        }
    });

    let borrow = Callback::new(move |book: Book| {
        if !ctx.is_signed_in() {
            ctx.navigate(Page::Login);
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            let result = borrowing::request_borrow(&api, &book.id, borrowing::DEFAULT_BORROW_DAYS).await;
            ctx.report(&result, "Borrow request sent");
        });
    });

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <section class="books-page">
            {move || {
                let ads = store.ads().get();
                (!ads.is_empty()).then(|| view! {
                    <div class="ad-strip">
                        {ads.into_iter().map(|ad| view! {
                            <a class="ad-banner" href=ad.link_url.clone().unwrap_or_else(|| "#".to_string()) target="_blank">
                                {ad.image_url.clone().map(|src| view! { <img src=src alt="" /> })}
                                <strong>{ad.title.clone()}</strong>
                                <span>{ad.content.clone().unwrap_or_default()}</span>
                            </a>
                        }).collect_view()}
                    </div>
                })
            }}

            <form class="book-filters" on:submit=apply_search>
                <input
                    type="search"
                    class="input"
                    placeholder="Search title, author or ISBN"
                    prop:value=move || search_text.get()
                    on:input=move |ev| search_text.set(event_target_value(&ev))
                />
                <select
                    class="input"
                    on:change=move |ev| {
                        let id = event_target_value(&ev);
                        query.update(|q| {
                            q.category_id = Some(id).filter(|s| !s.is_empty());
                            q.page = 1;
                        });
                    }
                >
                    <option value="">"All categories"</option>
                    {move || store.categories().with(|c| c.items.clone()).into_iter().map(|cat| {
                        let selected = query.with(|q| q.category_id.as_deref() == Some(cat.id.as_str()));
                        view! { <option value=cat.id.clone() selected=selected>{cat.name.clone()}</option> }
                    }).collect_view()}
                </select>
                <select
                    class="input"
                    on:change=move |ev| {
                        let sort = BookSort::parse(&event_target_value(&ev));
                        query.update(|q| {
                            q.sort = sort;
                            q.page = 1;
                        });
                    }
                >
                    {BookSort::ALL.into_iter().map(|sort| view! {
                        <option value=sort.as_str() selected=move || query.with(|q| q.sort == sort)>{sort.label()}</option>
                    }).collect_view()}
                </select>
                <button type="submit" class="btn btn-primary">"Search"</button>
            </form>

            <ListErrorBanner error=Signal::derive(move || store.books().with(|s| s.error.clone())) on_retry=retry />
            {move || store.books().with(|state| {
                if state.failed_without_items() {
                    return ().into_any();
                }
                if state.loading && state.items.is_empty() {
                    return view! { <LoadingView /> }.into_any();
                }
                if state.show_empty() {
                    return view! { <EmptyState text="No books match your search" /> }.into_any();
                }
                let signed_out = !ctx.is_signed_in();
                let can_buy = signed_out || ctx.role().is_some_and(|r| !r.is_delivery_manager());
                view! {
                    <div class="book-grid">
                        {state.items.iter().cloned().map(|book| {
                            if can_buy {
                                view! { <BookCard book=book on_add_to_cart=add_to_cart on_borrow=borrow /> }.into_any()
                            } else {
                                view! { <BookCard book=book /> }.into_any()
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            })}

            <div class="pager">
                <button
                    class="btn"
                    disabled=move || query.with(|q| q.page <= 1)
                    on:click=move |_| query.update(|q| q.page = q.page.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span class="pager-info">
                    {move || {
                        let page = query.with(|q| q.page);
                        match total.get() {
                            Some(t) => format!("Page {} · {} books", page, t),
                            None => format!("Page {}", page),
                        }
                    }}
                </span>
                <button
                    class="btn"
                    disabled=move || !has_more.get()
                    on:click=move |_| query.update(|q| q.page += 1)
                >
                    "Next"
                </button>
            </div>
        </section>
    }
}
