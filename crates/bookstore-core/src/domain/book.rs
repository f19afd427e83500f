//! Book Entity
//!
//! The central catalog resource. Price fields drive the discount badge and
//! cart totals; stock drives the "out of stock" state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::{Author, Category};
use crate::json;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Book {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "json::lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "json::opt_f64")]
    pub discount_price: Option<f64>,
    #[serde(default, deserialize_with = "json::lenient_u32")]
    pub stock: u32,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default, deserialize_with = "Author::nested")]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "Category::nested")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "json::opt_u32")]
    pub publish_year: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "json::lenient_bool")]
    pub borrowable: bool,
    #[serde(default, deserialize_with = "json::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

json::lenient_keys!(Book, serialize {
    id: ["_id"],
    title: ["name"],
    discount_price: ["discountPrice", "discountedPrice", "discounted_price"],
    stock: ["quantity", "stockQuantity", "stock_quantity"],
    cover_url: ["coverUrl", "coverImage", "cover_image", "image"],
    author_id: ["authorId"],
    author_name: ["authorName"],
    category_id: ["categoryId"],
    publish_year: ["publishYear", "publicationYear", "publication_year"],
    borrowable: ["isBorrowable", "is_borrowable", "availableForBorrow", "available_for_borrow"],
    created_at: ["createdAt"],
});

impl Book {
    /// A discount only counts when it is actually below the list price.
    pub fn has_discount(&self) -> bool {
        matches!(self.discount_price, Some(d) if d >= 0.0 && d < self.price && self.price > 0.0)
    }

    /// Rounded percentage off the list price, 0 without a discount.
    pub fn discount_percentage(&self) -> u32 {
        match self.discount_price {
            Some(d) if self.has_discount() => (((self.price - d) / self.price) * 100.0).round() as u32,
            _ => 0,
        }
    }

    /// Price the customer pays per copy.
    pub fn final_price(&self) -> f64 {
        match self.discount_price {
            Some(d) if self.has_discount() => d,
            _ => self.price,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
            .or(self.author_name.as_deref())
            .unwrap_or("Unknown author")
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Effective author id, whether sent flat or nested.
    pub fn resolved_author_id(&self) -> Option<&str> {
        self.author_id
            .as_deref()
            .or_else(|| self.author.as_ref().map(|a| a.id.as_str()).filter(|id| !id.is_empty()))
    }

    /// Effective category id, whether sent flat or nested.
    pub fn resolved_category_id(&self) -> Option<&str> {
        self.category_id
            .as_deref()
            .or_else(|| self.category.as_ref().map(|c| c.id.as_str()).filter(|id| !id.is_empty()))
    }
}

impl Entity for Book {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price: f64, discount: Option<f64>) -> Book {
        Book {
            id: "1".into(),
            title: "Dune".into(),
            price,
            discount_price: discount,
            ..Default::default()
        }
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(priced(20.0, Some(15.0)).discount_percentage(), 25);
        assert_eq!(priced(30.0, Some(20.0)).discount_percentage(), 33);
        assert_eq!(priced(20.0, None).discount_percentage(), 0);
    }

    #[test]
    fn test_discount_not_below_price_is_ignored() {
        let book = priced(20.0, Some(25.0));
        assert!(!book.has_discount());
        assert_eq!(book.final_price(), 20.0);
        assert_eq!(priced(0.0, Some(0.0)).discount_percentage(), 0);
    }

    #[test]
    fn test_decode_snake_case_with_nested_objects() {
        let book: Book = serde_json::from_str(
            r#"{
                "id": 12,
                "title": "The Dispossessed",
                "price": "18.00",
                "discount_price": 12.6,
                "stock_quantity": 4,
                "cover_image": "c.jpg",
                "author": {"id": 3, "name": "Ursula K. Le Guin"},
                "category": {"id": 2, "name": "Science Fiction"},
                "is_borrowable": 1,
                "created_at": "2024-02-01 10:00:00"
            }"#,
        )
        .unwrap();
        assert_eq!(book.id(), "12");
        assert_eq!(book.price, 18.0);
        assert_eq!(book.discount_percentage(), 30);
        assert_eq!(book.stock, 4);
        assert!(book.in_stock());
        assert_eq!(book.cover_url.as_deref(), Some("c.jpg"));
        assert_eq!(book.author_name(), "Ursula K. Le Guin");
        assert_eq!(book.category_name(), Some("Science Fiction"));
        assert_eq!(book.resolved_author_id(), Some("3"));
        assert!(book.borrowable);
        assert!(book.created_at.is_some());
    }

    #[test]
    fn test_decode_camel_case_with_flat_author() {
        let book: Book = serde_json::from_str(
            r#"{"id":"b-9","name":"Kindred","discountPrice":null,"stockQuantity":0,
                "author":"Octavia Butler","categoryId":5,"isBorrowable":false,"publishYear":1979}"#,
        )
        .unwrap();
        assert_eq!(book.title, "Kindred");
        assert!(!book.in_stock());
        assert_eq!(book.author_name(), "Octavia Butler");
        assert_eq!(book.resolved_category_id(), Some("5"));
        assert_eq!(book.publish_year, Some(1979));
        assert!(!book.has_discount());
    }

    #[test]
    fn test_unknown_author_fallback() {
        assert_eq!(priced(1.0, None).author_name(), "Unknown author");
    }

    #[test]
    fn test_round_trip_keeps_fields() {
        let mut book = priced(10.0, Some(8.0));
        book.author = Some(Author { id: "4".into(), name: "N. K. Jemisin".into(), ..Default::default() });
        let json = serde_json::to_string(&book).unwrap();
        let back: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_both_spellings_keep_first() {
        let book: Book = serde_json::from_str(
            r#"{"id": 5, "_id": "abc", "title": "Beloved", "name": "Beloved",
                "stock": null, "stockQuantity": 3, "stock_quantity": 9,
                "discount_price": 8, "discountPrice": 7,
                "is_borrowable": true, "isBorrowable": false}"#,
        )
        .unwrap();
        assert_eq!(book.id(), "5");
        assert_eq!(book.title, "Beloved");
        assert_eq!(book.stock, 3);
        assert_eq!(book.discount_price, Some(8.0));
        assert!(!book.borrowable);
    }
}
