//! Book Card Component

use bookstore_core::domain::Book;
use bookstore_core::format::{format_currency, truncate};
use leptos::prelude::*;

const DESCRIPTION_PREVIEW: usize = 120;

/// Catalogue tile. Actions are hidden when no callback is given.
#[component]
pub fn BookCard(
    book: Book,
    #[prop(optional, into)] on_add_to_cart: Option<Callback<Book>>,
    #[prop(optional, into)] on_borrow: Option<Callback<Book>>,
) -> impl IntoView {
    let has_discount = book.has_discount();
    let in_stock = book.in_stock();
    let borrowable = book.borrowable;
    let price = format_currency(book.price);
    let final_price = format_currency(book.final_price());
    let discount = book.discount_percentage();
    let description = book
        .description
        .as_deref()
        .map(|d| truncate(d, DESCRIPTION_PREVIEW))
        .unwrap_or_default();
    let author = book.author_name().to_string();
    let category = book.category_name().map(str::to_string);
    let cover = book.cover_url.clone();
    let stock_label = if in_stock {
        format!("{} in stock", book.stock)
    } else {
        "Out of stock".to_string()
    };
    let cart_book = book.clone();
    let borrow_book = book.clone();

    view! {
        <article class="book-card">
            <div class="book-cover">
                {match cover {
                    Some(url) => view! { <img src=url alt=book.title.clone() /> }.into_any(),
                    None => view! { <div class="book-cover-placeholder">"📖"</div> }.into_any(),
                }}
                <Show when=move || has_discount>
                    <span class="discount-badge">{format!("-{}%", discount)}</span>
                </Show>
            </div>
            <div class="book-info">
                <h3 class="book-title">{book.title.clone()}</h3>
                <p class="book-author">{author}</p>
                {category.map(|c| view! { <p class="book-category">{c}</p> })}
                <p class="book-description">{description}</p>
                <div class="book-price">
                    <span class="price-final">{final_price}</span>
                    <Show when=move || has_discount>
                        <span class="price-original">{price.clone()}</span>
                    </Show>
                </div>
                <p class=if in_stock { "book-stock" } else { "book-stock out" }>{stock_label}</p>
            </div>
            <div class="book-actions">
                {on_add_to_cart.map(|cb| view! {
                    <button
                        class="btn btn-primary"
                        disabled={!in_stock}
                        on:click=move |_| cb.run(cart_book.clone())
                    >
                        "Add to cart"
                    </button>
                })}
                {on_borrow.filter(|_| borrowable).map(|cb| view! {
                    <button class="btn" on:click=move |_| cb.run(borrow_book.clone())>
                        "Borrow"
                    </button>
                })}
            </div>
        </article>
    }
}
