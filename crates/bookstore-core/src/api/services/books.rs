//! Books

use serde::Serialize;
use serde_json::Value;

use super::{item_path, require_id, to_body};
use crate::api::envelope::{decode_object, decode_page, Page};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::Book;
use crate::validation;

pub const DEFAULT_PER_PAGE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSort {
    #[default]
    Newest,
    TitleAsc,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl BookSort {
    pub const ALL: [BookSort; 5] = [
        BookSort::Newest,
        BookSort::TitleAsc,
        BookSort::PriceAsc,
        BookSort::PriceDesc,
        BookSort::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookSort::Newest => "newest",
            BookSort::TitleAsc => "title",
            BookSort::PriceAsc => "price_asc",
            BookSort::PriceDesc => "price_desc",
            BookSort::Rating => "rating",
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookSort::Newest => "Newest",
            BookSort::TitleAsc => "Title A-Z",
            BookSort::PriceAsc => "Price: low to high",
            BookSort::PriceDesc => "Price: high to low",
            BookSort::Rating => "Top rated",
        }
    }
}

/// Filters for the catalogue listing. Empty strings are not sent.
#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    pub search: String,
    pub category_id: Option<String>,
    pub author_id: Option<String>,
    pub page: u32,
    pub per_page: u32,
    pub sort: BookSort,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category_id: None,
            author_id: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: BookSort::default(),
        }
    }
}

impl BookQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        if let Some(id) = self.category_id.as_ref().filter(|s| !s.is_empty()) {
            params.push(("category_id", id.clone()));
        }
        if let Some(id) = self.author_id.as_ref().filter(|s| !s.is_empty()) {
            params.push(("author_id", id.clone()));
        }
        params.push(("page", self.page.max(1).to_string()));
        params.push(("per_page", self.per_page.max(1).to_string()));
        params.push(("sort", self.sort.as_str().to_string()));
        params
    }
}

/// Admin form for creating or editing a book.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BookInput {
    pub title: String,
    pub isbn: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    pub stock: u32,
    pub author_id: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<u32>,
    pub borrowable: bool,
}

impl BookInput {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            isbn: book.isbn.clone().unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
            price: book.price,
            discount_price: book.discount_price,
            stock: book.stock,
            author_id: book.resolved_author_id().unwrap_or_default().to_string(),
            category_id: book.resolved_category_id().unwrap_or_default().to_string(),
            cover_url: book.cover_url.clone(),
            publish_year: book.publish_year,
            borrowable: book.borrowable,
        }
    }

    pub fn validate(&self) -> Option<String> {
        let discount = match self.discount_price {
            Some(d) if d < 0.0 || d >= self.price => {
                Some("Discount price must be below the regular price".to_string())
            }
            _ => None,
        };
        let isbn = if self.isbn.trim().is_empty() {
            None
        } else {
            validation::isbn(&self.isbn)
        };
        validation::validate_all([
            validation::required(&self.title, "Title"),
            isbn,
            validation::price(&self.price.to_string()),
            discount,
            validation::required(&self.author_id, "Author"),
            validation::required(&self.category_id, "Category"),
        ])
    }
}

fn checked(input: &BookInput) -> ApiResult<Value> {
    match input.validate() {
        Some(msg) => Err(ApiError::validation(msg)),
        None => to_body(input),
    }
}

/// Browsing works signed out; the token is sent when held.
pub async fn list_books(client: &ApiClient, query: &BookQuery) -> ApiResult<Page<Book>> {
    let body = client.get_public("/books", &query.to_params()).await?;
    decode_page(body, &["books"], query.page.max(1))
}

pub async fn get_book(client: &ApiClient, id: &str) -> ApiResult<Book> {
    require_id(id, "book")?;
    let body = client.get_public(&item_path("/books", id), &[]).await?;
    decode_object(body, &["book"])
}

pub async fn create_book(client: &ApiClient, input: &BookInput) -> ApiResult<Book> {
    let body = client.post("/books", checked(input)?).await?;
    decode_object(body, &["book"])
}

pub async fn update_book(client: &ApiClient, id: &str, input: &BookInput) -> ApiResult<Book> {
    require_id(id, "book")?;
    let body = client.put(&item_path("/books", id), checked(input)?).await?;
    decode_object(body, &["book"])
}

pub async fn delete_book(client: &ApiClient, id: &str) -> ApiResult<()> {
    require_id(id, "book")?;
    client.delete(&item_path("/books", id)).await?;
    Ok(())
}
