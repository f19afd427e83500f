//! Catalogue tabs: books, categories and authors.

use bookstore_core::api::services::books::{self, BookInput, BookQuery};
use bookstore_core::api::services::catalog::{self, AuthorInput, CategoryInput};
use bookstore_core::domain::{Author, Book, Category};
use bookstore_core::format::format_currency;
use bookstore_core::{validation, ApiError};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{list_placeholder, optional_text, parse_number};
use crate::components::{DeleteConfirmButton, FormField, ListErrorBanner, TextAreaField};
use crate::context::{use_app_context, AppContext};
use crate::store::{store_remove_book, use_app_store, AppStateStoreFields, AppStore};

/// Admin lists show one large page instead of the shop pager.
const ADMIN_PAGE_SIZE: u32 = 100;

fn load_catalog(ctx: AppContext, store: AppStore) {
    let api = ctx.api();
    spawn_local(async move {
        let result = catalog::list_categories(&api).await;
        store.categories().write().finish(result);
        let result = catalog::list_authors(&api).await;
        store.authors().write().finish(result);
    });
}

#[derive(Clone, Copy)]
struct BookForm {
    editing: RwSignal<Option<String>>,
    title: RwSignal<String>,
    isbn: RwSignal<String>,
    description: RwSignal<String>,
    price: RwSignal<String>,
    discount: RwSignal<String>,
    stock: RwSignal<String>,
    author_id: RwSignal<String>,
    category_id: RwSignal<String>,
    cover_url: RwSignal<String>,
    publish_year: RwSignal<String>,
    borrowable: RwSignal<bool>,
}

impl BookForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            title: RwSignal::new(String::new()),
            isbn: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            discount: RwSignal::new(String::new()),
            stock: RwSignal::new(String::new()),
            author_id: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            cover_url: RwSignal::new(String::new()),
            publish_year: RwSignal::new(String::new()),
            borrowable: RwSignal::new(true),
        }
    }

    fn fill(&self, book: &Book) {
        let input = BookInput::from_book(book);
        self.editing.set(Some(book.id.clone()));
        self.title.set(input.title);
        self.isbn.set(input.isbn);
        self.description.set(input.description);
        self.price.set(input.price.to_string());
        self.discount.set(input.discount_price.map(|d| d.to_string()).unwrap_or_default());
        self.stock.set(input.stock.to_string());
        self.author_id.set(input.author_id);
        self.category_id.set(input.category_id);
        self.cover_url.set(input.cover_url.unwrap_or_default());
        self.publish_year.set(input.publish_year.map(|y| y.to_string()).unwrap_or_default());
        self.borrowable.set(input.borrowable);
    }

    fn clear(&self) {
        self.editing.set(None);
        for field in [
            self.title,
            self.isbn,
            self.description,
            self.price,
            self.discount,
            self.stock,
            self.author_id,
            self.category_id,
            self.cover_url,
            self.publish_year,
        ] {
            field.set(String::new());
        }
        self.borrowable.set(true);
    }

    fn to_input(&self) -> Result<BookInput, ApiError> {
        let price = self.price.get_untracked();
        if let Some(msg) = validation::price(&price) {
            return Err(ApiError::validation(msg));
        }
        Ok(BookInput {
            title: self.title.get_untracked().trim().to_string(),
            isbn: self.isbn.get_untracked().trim().to_string(),
            description: self.description.get_untracked().trim().to_string(),
            price: parse_number(&price, "Price").map_err(ApiError::validation)?.unwrap_or(0.0),
            discount_price: parse_number(&self.discount.get_untracked(), "Discount price")
                .map_err(ApiError::validation)?,
            stock: parse_number(&self.stock.get_untracked(), "Stock")
                .map_err(ApiError::validation)?
                .unwrap_or(0),
            author_id: self.author_id.get_untracked(),
            category_id: self.category_id.get_untracked(),
            cover_url: optional_text(&self.cover_url.get_untracked()),
            publish_year: parse_number(&self.publish_year.get_untracked(), "Publish year")
                .map_err(ApiError::validation)?,
            borrowable: self.borrowable.get_untracked(),
        })
    }
}

#[component]
pub(super) fn BooksAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let form = BookForm::new();
    let (submitted, set_submitted) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        let query = BookQuery {
            per_page: ADMIN_PAGE_SIZE,
            ..Default::default()
        };
        store.books().write().start_loading();
        spawn_local(async move {
            let result = books::list_books(&api, &query).await.map(|page| page.items);
            if let Err(e) = &result {
                ctx.check_auth(e);
            }
            store.books().write().finish(result);
        });
        load_catalog(ctx, store);
    });

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitted.set(true);
        let input = match form.to_input() {
            Ok(input) => input,
            Err(e) => return ctx.report_error(&e),
        };
        let editing = form.editing.get_untracked();
        let api = ctx.api();
        spawn_local(async move {
            let result = match &editing {
                Some(id) => books::update_book(&api, id, &input).await,
                None => books::create_book(&api, &input).await,
            };
            if let Ok(book) = &result {
                store.books().write().upsert(book.clone());
                form.clear();
                set_submitted.set(false);
            }
            ctx.report(&result, if editing.is_some() { "Book updated" } else { "Book added" });
        });
    };

    let delete = move |book_id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let result = books::delete_book(&api, &book_id).await;
            if result.is_ok() {
                store_remove_book(&store, &book_id);
            }
            ctx.report(&result, "Book deleted");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <form class="admin-form" on:submit=save>
            <h2>{move || if form.editing.get().is_some() { "Edit book" } else { "New book" }}</h2>
            <FormField label="Title" value=form.title submitted=submitted
                validator=|v: &str| validation::required(v, "Title") />
            <FormField label="ISBN" value=form.isbn placeholder="Optional" />
            <TextAreaField label="Description" value=form.description />
            <div class="form-row">
                <FormField label="Price" value=form.price submitted=submitted validator=validation::price />
                <FormField label="Discount price" value=form.discount placeholder="Optional" />
                <FormField label="Stock" value=form.stock placeholder="0" />
                <FormField label="Year" value=form.publish_year placeholder="Optional" />
            </div>
            <div class="form-row">
                <label class="form-field">
                    <span class="form-label">"Author"</span>
                    <select class="input" on:change=move |ev| form.author_id.set(event_target_value(&ev))>
                        <option value="" selected=move || form.author_id.with(String::is_empty)>"Choose…"</option>
                        {move || store.authors().with(|a| a.items.clone()).into_iter().map(|author: Author| {
                            let id = author.id.clone();
                            view! {
                                <option value=author.id.clone() selected=move || form.author_id.with(|v| *v == id)>
                                    {author.name.clone()}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </label>
                <label class="form-field">
                    <span class="form-label">"Category"</span>
                    <select class="input" on:change=move |ev| form.category_id.set(event_target_value(&ev))>
                        <option value="" selected=move || form.category_id.with(String::is_empty)>"Choose…"</option>
                        {move || store.categories().with(|c| c.items.clone()).into_iter().map(|cat: Category| {
                            let id = cat.id.clone();
                            view! {
                                <option value=cat.id.clone() selected=move || form.category_id.with(|v| *v == id)>
                                    {cat.name.clone()}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </label>
            </div>
            <FormField label="Cover image URL" value=form.cover_url placeholder="Optional" />
            <label class="toggle">
                <input type="checkbox" prop:checked=move || form.borrowable.get()
                    on:change=move |ev| form.borrowable.set(event_target_checked(&ev)) />
                <span>"Can be borrowed"</span>
            </label>
            <div class="form-actions">
                <button type="submit" class="btn btn-primary">
                    {move || if form.editing.get().is_some() { "Save changes" } else { "Add book" }}
                </button>
                <Show when=move || form.editing.get().is_some()>
                    <button type="button" class="btn" on:click=move |_| form.clear()>"Cancel"</button>
                </Show>
            </div>
        </form>

        <ListErrorBanner error=Signal::derive(move || store.books().with(|s| s.error.clone())) on_retry=retry />
        {move || store.books().with(|state| {
            if let Some(placeholder) = list_placeholder(state, "No books yet") {
                return placeholder;
            }
            view! {
                <table class="admin-table">
                    <thead>
                        <tr><th>"Title"</th><th>"Author"</th><th>"Price"</th><th>"Stock"</th><th></th></tr>
                    </thead>
                    <tbody>
                        {state.items.iter().cloned().map(|book| {
                            let id = book.id.clone();
                            let to_edit = book.clone();
                            view! {
                                <tr>
                                    <td>{book.title.clone()}</td>
                                    <td>{book.author_name().to_string()}</td>
                                    <td>{format_currency(book.final_price())}</td>
                                    <td>{book.stock}</td>
                                    <td class="row-actions">
                                        <button class="btn" on:click=move |_| form.fill(&to_edit)>"Edit"</button>
                                        <DeleteConfirmButton on_confirm=move |_| delete(id.clone()) />
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            }.into_any()
        })}
    }
}

#[component]
pub(super) fn CategoriesAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing = RwSignal::new(None::<String>);
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        store.categories().write().start_loading();
        load_catalog(ctx, store);
    });

    let reset = move || {
        editing.set(None);
        name.set(String::new());
        description.set(String::new());
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = CategoryInput {
            name: name.get().trim().to_string(),
            description: optional_text(&description.get()),
        };
        let target = editing.get_untracked();
        let api = ctx.api();
        spawn_local(async move {
            let result = match &target {
                Some(id) => catalog::update_category(&api, id, &input).await,
                None => catalog::create_category(&api, &input).await,
            };
            if let Ok(category) = &result {
                store.categories().write().upsert(category.clone());
                reset();
            }
            ctx.report(&result, "Category saved");
        });
    };

    let delete = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let result = catalog::delete_category(&api, &id).await;
            if result.is_ok() {
                store.categories().write().remove(&id);
            }
            ctx.report(&result, "Category deleted");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <form class="admin-form" on:submit=save>
            <FormField label="Category name" value=name />
            <FormField label="Description" value=description placeholder="Optional" />
            <div class="form-actions">
                <button type="submit" class="btn btn-primary">
                    {move || if editing.get().is_some() { "Save changes" } else { "Add category" }}
                </button>
                <Show when=move || editing.get().is_some()>
                    <button type="button" class="btn" on:click=move |_| reset()>"Cancel"</button>
                </Show>
            </div>
        </form>
        <ListErrorBanner error=Signal::derive(move || store.categories().with(|s| s.error.clone())) on_retry=retry />
        {move || store.categories().with(|state| {
            if let Some(placeholder) = list_placeholder(state, "No categories yet") {
                return placeholder;
            }
            view! {
                <ul class="admin-list">
                    {state.items.iter().cloned().map(|cat| {
                        let id = cat.id.clone();
                        let to_edit = cat.clone();
                        view! {
                            <li>
                                <span class="item-name">{cat.name.clone()}</span>
                                <span class="muted">{format!("{} books", cat.books_count)}</span>
                                <button class="btn" on:click=move |_| {
                                    editing.set(Some(to_edit.id.clone()));
                                    name.set(to_edit.name.clone());
                                    description.set(to_edit.description.clone().unwrap_or_default());
                                }>"Edit"</button>
                                <DeleteConfirmButton on_confirm=move |_| delete(id.clone()) />
                            </li>
                        }
                    }).collect_view()}
                </ul>
            }.into_any()
        })}
    }
}

#[component]
pub(super) fn AuthorsAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing = RwSignal::new(None::<String>);
    let name = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let nationality = RwSignal::new(String::new());
    let photo_url = RwSignal::new(String::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        store.authors().write().start_loading();
        load_catalog(ctx, store);
    });

    let reset = move || {
        editing.set(None);
        for field in [name, bio, nationality, photo_url] {
            field.set(String::new());
        }
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = AuthorInput {
            name: name.get().trim().to_string(),
            bio: optional_text(&bio.get()),
            nationality: optional_text(&nationality.get()),
            photo_url: optional_text(&photo_url.get()),
        };
        let target = editing.get_untracked();
        let api = ctx.api();
        spawn_local(async move {
            let result = match &target {
                Some(id) => catalog::update_author(&api, id, &input).await,
                None => catalog::create_author(&api, &input).await,
            };
            if let Ok(author) = &result {
                store.authors().write().upsert(author.clone());
                reset();
            }
            ctx.report(&result, "Author saved");
        });
    };

    let delete = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let result = catalog::delete_author(&api, &id).await;
            if result.is_ok() {
                store.authors().write().remove(&id);
            }
            ctx.report(&result, "Author deleted");
        });
    };

    let retry = Callback::new(move |_| ctx.reload());

    view! {
        <form class="admin-form" on:submit=save>
            <FormField label="Author name" value=name validator=validation::name />
            <FormField label="Nationality" value=nationality placeholder="Optional" />
            <FormField label="Photo URL" value=photo_url placeholder="Optional" />
            <TextAreaField label="Biography" value=bio />
            <div class="form-actions">
                <button type="submit" class="btn btn-primary">
                    {move || if editing.get().is_some() { "Save changes" } else { "Add author" }}
                </button>
                <Show when=move || editing.get().is_some()>
                    <button type="button" class="btn" on:click=move |_| reset()>"Cancel"</button>
                </Show>
            </div>
        </form>
        <ListErrorBanner error=Signal::derive(move || store.authors().with(|s| s.error.clone())) on_retry=retry />
        {move || store.authors().with(|state| {
            if let Some(placeholder) = list_placeholder(state, "No authors yet") {
                return placeholder;
            }
            view! {
                <ul class="admin-list">
                    {state.items.iter().cloned().map(|author| {
                        let id = author.id.clone();
                        let to_edit = author.clone();
                        view! {
                            <li>
                                <span class="avatar">{author.initials()}</span>
                                <span class="item-name">{author.name.clone()}</span>
                                <span class="muted">{format!("{} books", author.books_count)}</span>
                                <button class="btn" on:click=move |_| {
                                    editing.set(Some(to_edit.id.clone()));
                                    name.set(to_edit.name.clone());
                                    bio.set(to_edit.bio.clone().unwrap_or_default());
                                    nationality.set(to_edit.nationality.clone().unwrap_or_default());
                                    photo_url.set(to_edit.photo_url.clone().unwrap_or_default());
                                }>"Edit"</button>
                                <DeleteConfirmButton on_confirm=move |_| delete(id.clone()) />
                            </li>
                        }
                    }).collect_view()}
                </ul>
            }.into_any()
        })}
    }
}
