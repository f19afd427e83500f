//! UI Components
//!
//! Reusable Leptos components.

mod book_card;
mod delete_confirm_button;
mod error_view;
mod form_field;
mod nav_bar;
mod snackbar;
mod status_badge;

pub use book_card::BookCard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use error_view::{EmptyState, ErrorView, ListErrorBanner, LoadingView};
pub use form_field::{FormField, TextAreaField};
pub use nav_bar::NavBar;
pub use snackbar::Snackbar;
pub use status_badge::{StatusBadge, Tone};
