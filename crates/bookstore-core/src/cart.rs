//! Shopping Cart
//!
//! Lives only in the client until checkout turns it into a
//! `PlaceOrderRequest`.

use crate::api::{ApiError, ApiResult};
use crate::domain::{Book, Entity, OrderLineRequest, PlaceOrderRequest};
use crate::validation;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub book: Book,
    pub quantity: u32,
}

impl CartLine {
    pub fn unit_price(&self) -> f64 {
        self.book.final_price()
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of copies across all lines (badge count).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn quantity_of(&self, book_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.book.id() == book_id)
            .map_or(0, |l| l.quantity)
    }

    /// Add copies, merging with an existing line and capping at stock.
    /// Returns the resulting quantity; out-of-stock books are refused.
    pub fn add(&mut self, book: &Book, quantity: u32) -> ApiResult<u32> {
        if !book.in_stock() {
            return Err(ApiError::validation(format!("\"{}\" is out of stock", book.title)));
        }
        if quantity == 0 {
            return Err(ApiError::validation("Quantity must be at least 1"));
        }
        let line = match self.lines.iter_mut().position(|l| l.book.id() == book.id()) {
            Some(pos) => &mut self.lines[pos],
            None => {
                self.lines.push(CartLine {
                    book: book.clone(),
                    quantity: 0,
                });
                let last = self.lines.len() - 1;
                &mut self.lines[last]
            }
        };
        // Fresh copy of the book carries the latest price and stock.
        line.book = book.clone();
        line.quantity = line.quantity.saturating_add(quantity).min(book.stock);
        Ok(line.quantity)
    }

    /// Set a line's quantity; zero removes the line. Capped at stock.
    pub fn set_quantity(&mut self, book_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(book_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.book.id() == book_id) {
            line.quantity = quantity.min(line.book.stock.max(1));
        }
    }

    pub fn remove(&mut self, book_id: &str) -> Option<CartLine> {
        let pos = self.lines.iter().position(|l| l.book.id() == book_id)?;
        Some(self.lines.remove(pos))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn to_order_request(
        &self,
        shipping_address: &str,
        phone: &str,
        payment_method: &str,
        notes: Option<&str>,
    ) -> ApiResult<PlaceOrderRequest> {
        if self.is_empty() {
            return Err(ApiError::validation("Your cart is empty"));
        }
        let problem = validation::validate_all([
            validation::required(shipping_address, "Shipping address"),
            validation::phone(phone),
            validation::required(payment_method, "Payment method"),
        ]);
        if let Some(msg) = problem {
            return Err(ApiError::validation(msg));
        }
        Ok(PlaceOrderRequest {
            items: self
                .lines
                .iter()
                .map(|l| OrderLineRequest {
                    book_id: l.book.id.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            shipping_address: shipping_address.trim().to_string(),
            phone: phone.trim().to_string(),
            payment_method: payment_method.to_string(),
            notes: notes.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorCode;

    fn book(id: &str, price: f64, discount: Option<f64>, stock: u32) -> Book {
        Book {
            id: id.into(),
            title: format!("Book {}", id),
            price,
            discount_price: discount,
            stock,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_merges_and_caps_at_stock() {
        let mut cart = Cart::new();
        let b = book("1", 10.0, None, 3);
        assert_eq!(cart.add(&b, 2).unwrap(), 2);
        assert_eq!(cart.add(&b, 5).unwrap(), 3);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 3);

        let sold_out = book("2", 5.0, None, 0);
        assert_eq!(cart.add(&sold_out, 1).unwrap_err().code, ErrorCode::Validation);
    }

    #[test]
    fn test_total_uses_discount() {
        let mut cart = Cart::new();
        cart.add(&book("1", 20.0, Some(15.0), 10), 2).unwrap();
        cart.add(&book("2", 8.5, None, 10), 1).unwrap();
        assert!((cart.total() - 38.5).abs() < 1e-9);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&book("1", 10.0, None, 5), 1).unwrap();
        cart.set_quantity("1", 4);
        assert_eq!(cart.quantity_of("1"), 4);
        cart.set_quantity("1", 9);
        assert_eq!(cart.quantity_of("1"), 5);
        cart.set_quantity("1", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_order_request() {
        let cart = Cart::new();
        assert!(cart.to_order_request("1 Main St", "5551234567", "card", None).is_err());

        let mut cart = Cart::new();
        cart.add(&book("7", 10.0, None, 5), 2).unwrap();
        assert!(cart.to_order_request(" ", "5551234567", "card", None).is_err());

        let request = cart
            .to_order_request(" 1 Main St ", "5551234567", "card", Some("  "))
            .unwrap();
        assert_eq!(request.items, vec![OrderLineRequest { book_id: "7".into(), quantity: 2 }]);
        assert_eq!(request.shipping_address, "1 Main St");
        assert!(request.notes.is_none());
    }
}
