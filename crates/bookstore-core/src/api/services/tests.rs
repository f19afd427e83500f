use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::*;
use crate::api::mock::{test_client, test_config, MockTransport};
use crate::api::{ApiClient, ErrorCode, Method};
use crate::config::ClientConfig;
use crate::domain::{
    BorrowRecord, BorrowStatus, ComplaintStatus, DeliveryStatus, DeliveryTask, NewComplaint, Order,
    OrderLineRequest, OrderStatus, PlaceOrderRequest, Role, UserPreferences,
};

const BASE: &str = "http://localhost:8000/api";

#[tokio::test]
async fn test_login_stores_token_and_loads_profile() {
    let (client, mock) = test_client();
    client.set_token(None);
    let token = crate::api::mock::valid_token();
    mock.respond(200, json!({"success": true, "data": {"access_token": token}}));
    mock.respond(200, json!({"data": {"user": {"id": 7, "name": "Ada", "userType": "ADMIN"}}}));

    let session = auth::login(&client, " ada@example.com ", "secret123").await.unwrap();
    assert_eq!(session.role(), Role::Admin);
    assert_eq!(client.token().as_deref(), Some(token.as_str()));

    let sent = mock.requests();
    assert_eq!(sent[0].url, format!("{}/auth/login", BASE));
    assert!(sent[0].header("authorization").is_none());
    assert_eq!(sent[0].body, Some(json!({"email": "ada@example.com", "password": "secret123"})));
    assert_eq!(sent[1].url, format!("{}/auth/me", BASE));
}

#[tokio::test]
async fn test_login_without_token_is_parse_error() {
    let (client, mock) = test_client();
    client.set_token(None);
    mock.respond(200, json!({"success": true, "data": {"user": {"id": 1}}}));
    let err = auth::login(&client, "a@b.com", "x").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ParseError);
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_logout_clears_token_even_on_failure() {
    let (client, mock) = test_client();
    mock.fail_network();
    auth::logout(&client).await;
    assert!(client.token().is_none());
    assert_eq!(mock.requests().len(), 1);
}

#[test]
fn test_register_validation() {
    let request = auth::RegisterRequest {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "abcd1234".into(),
        ..Default::default()
    };
    assert!(request.validate("abcd1234").is_none());
    assert_eq!(request.validate("abcd"), Some("Passwords do not match".to_string()));
}

#[tokio::test]
async fn test_list_books_query_and_page() {
    let (client, mock) = test_client();
    mock.respond(
        200,
        json!({"data": {"books": [{"id": 1, "title": "Dune"}], "current_page": 2, "last_page": 4}}),
    );
    let query = books::BookQuery {
        search: "sci fi".into(),
        category_id: Some("3".into()),
        page: 2,
        sort: books::BookSort::PriceAsc,
        ..Default::default()
    };
    let page = books::list_books(&client, &query).await.unwrap();
    assert_eq!(page.items[0].title, "Dune");
    assert!(page.has_more);
    assert_eq!(
        mock.last_request().url,
        format!("{}/books?search=sci%20fi&category_id=3&page=2&per_page=20&sort=price_asc", BASE)
    );
}

#[tokio::test]
async fn test_create_book_validates_locally() {
    let (client, mock) = test_client();
    let input = books::BookInput {
        title: "Dune".into(),
        price: 10.0,
        discount_price: Some(12.0),
        author_id: "1".into(),
        category_id: "2".into(),
        ..Default::default()
    };
    let err = books::create_book(&client, &input).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_delete_category_path() {
    let (client, mock) = test_client();
    mock.respond_text(204, "");
    catalog::delete_category(&client, "sci fi").await.unwrap();
    let sent = mock.last_request();
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.url, format!("{}/categories/sci%20fi", BASE));

    let err = catalog::delete_category(&client, " ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn test_place_order_body() {
    let (client, mock) = test_client();
    mock.respond(201, json!({"success": true, "data": {"order": {"id": 55, "status": "PENDING"}}}));
    let request = PlaceOrderRequest {
        items: vec![OrderLineRequest {
            book_id: "9".into(),
            quantity: 2,
        }],
        shipping_address: "1 Main St".into(),
        phone: "+15551234567".into(),
        payment_method: "cash_on_delivery".into(),
        notes: None,
    };
    let order = orders::place_order(&client, &request).await.unwrap();
    assert_eq!(order.id, "55");
    assert_eq!(
        mock.last_request().body,
        Some(json!({
            "items": [{"book_id": "9", "quantity": 2}],
            "shipping_address": "1 Main St",
            "phone": "+15551234567",
            "payment_method": "cash_on_delivery"
        }))
    );
}

#[tokio::test]
async fn test_cancel_refused_after_shipping() {
    let (client, mock) = test_client();
    let order = Order {
        id: "3".into(),
        status: OrderStatus::Shipped,
        ..Default::default()
    };
    let err = orders::cancel_order(&client, &order).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(mock.requests().is_empty());

    let pending = Order {
        status: OrderStatus::Pending,
        ..order
    };
    mock.respond(200, json!({"success": true, "message": "Order cancelled"}));
    let cancelled = orders::cancel_order(&client, &pending).await.unwrap();
    assert_eq!(cancelled.id, "3");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(mock.last_request().url, format!("{}/orders/3/cancel", BASE));
}

#[tokio::test]
async fn test_all_orders_status_filter() {
    let (client, mock) = test_client();
    mock.respond(200, json!({"orders": [{"id": 1}, {"id": 2}]}));
    let list = orders::all_orders(&client, Some(OrderStatus::Confirmed)).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(mock.last_request().url, format!("{}/orders?status=confirmed", BASE));
}

#[tokio::test]
async fn test_borrow_request_and_return() {
    let (client, mock) = test_client();
    assert_eq!(
        borrowing::request_borrow(&client, "4", 0).await.unwrap_err().code,
        ErrorCode::Validation
    );

    mock.respond(201, json!({"data": {"id": 10, "book_id": 4, "status": "requested"}}));
    let record = borrowing::request_borrow(&client, "4", 14).await.unwrap();
    assert_eq!(record.status, BorrowStatus::Requested);
    assert_eq!(mock.last_request().body, Some(json!({"book_id": "4", "days": 14})));

    let active = BorrowRecord {
        id: "10".into(),
        status: BorrowStatus::Active,
        ..Default::default()
    };
    mock.respond(200, json!({"success": true}));
    let returned = borrowing::return_book(&client, &active).await.unwrap();
    assert_eq!(returned.status, BorrowStatus::Returned);
    assert_eq!(mock.last_request().url, format!("{}/borrows/10/return", BASE));
}

#[tokio::test]
async fn test_delivery_transition_checked() {
    let (client, mock) = test_client();
    let task = DeliveryTask {
        id: "8".into(),
        status: DeliveryStatus::Assigned,
        ..Default::default()
    };
    let err = delivery::update_delivery_status(&client, &task, DeliveryStatus::Delivered, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(mock.requests().is_empty());

    mock.respond(200, json!({"data": {"id": 8, "status": "picked_up"}}));
    let updated = delivery::update_delivery_status(&client, &task, DeliveryStatus::PickedUp, Some(" at door "))
        .await
        .unwrap();
    assert_eq!(updated.status, DeliveryStatus::PickedUp);
    let sent = mock.last_request();
    assert_eq!(sent.method, Method::Patch);
    assert_eq!(sent.url, format!("{}/deliveries/8/status", BASE));
    assert_eq!(sent.body, Some(json!({"status": "picked_up", "notes": "at door"})));
}

#[tokio::test]
async fn test_complaint_submit_and_respond() {
    let (client, mock) = test_client();
    let short = NewComplaint {
        subject: "Late".into(),
        description: "Slow".into(),
        order_id: None,
    };
    assert_eq!(
        complaints::submit_complaint(&client, &short).await.unwrap_err().code,
        ErrorCode::Validation
    );

    mock.respond(200, json!({"complaint": {"id": 2, "status": "resolved", "response": "Refunded"}}));
    let c = complaints::respond_to_complaint(&client, "2", "Refunded", ComplaintStatus::Resolved)
        .await
        .unwrap();
    assert!(c.has_response());
    assert_eq!(
        mock.last_request().body,
        Some(json!({"response": "Refunded", "status": "resolved"}))
    );
}

#[tokio::test]
async fn test_unread_count_shapes() {
    let (client, mock) = test_client();
    mock.respond(200, json!(4));
    assert_eq!(notifications::unread_count(&client).await.unwrap(), 4);
    mock.respond(200, json!({"success": true, "data": {"unread_count": 2}}));
    assert_eq!(notifications::unread_count(&client).await.unwrap(), 2);
    mock.respond(200, json!({"count": "3"}));
    assert_eq!(notifications::unread_count(&client).await.unwrap(), 3);
    mock.respond(200, json!({"success": true}));
    assert_eq!(
        notifications::unread_count(&client).await.unwrap_err().code,
        ErrorCode::ParseError
    );
}

#[tokio::test]
async fn test_active_ads_filters_expired() {
    let (client, mock) = test_client();
    client.set_token(None);
    mock.respond(
        200,
        json!([
            {"id": 1, "title": "Sale", "end_date": "2999-01-01"},
            {"id": 2, "title": "Old", "end_date": "2000-01-01"},
            {"id": 3, "title": "Off", "is_active": false}
        ]),
    );
    let ads = ads::active_ads(&client).await.unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].title, "Sale");
}

#[test]
fn test_ad_input_date_order() {
    let input = ads::AdInput {
        title: "Sale".into(),
        content: "Half off".into(),
        start_date: "2024-05-10".into(),
        end_date: "2024-05-01".into(),
        active: true,
        ..Default::default()
    };
    assert_eq!(
        input.validate(),
        Some("End date must not be before the start date".to_string())
    );
}

#[tokio::test]
async fn test_preferences_roundtrip_defaults() {
    let (client, mock) = test_client();
    mock.respond_text(200, "");
    assert_eq!(preferences::get_preferences(&client).await.unwrap(), UserPreferences::default());

    mock.respond(200, json!({"data": {"favoriteCategoryIds": [1, 2], "newsletter": 1}}));
    let prefs = preferences::get_preferences(&client).await.unwrap();
    assert!(prefs.is_favorite("2"));
    assert!(prefs.newsletter);
}

#[tokio::test]
async fn test_ping_is_unauthenticated() {
    let (client, mock) = test_client();
    mock.respond(200, json!({"status": "ok"}));
    health::ping(&client).await.unwrap();
    let sent = mock.last_request();
    assert_eq!(sent.url, format!("{}/health", BASE));
    assert!(sent.header("authorization").is_none());

    assert_eq!(sent.timeout, Some(client.connectivity_timeout()));

    mock.fail_timeout();
    assert_eq!(health::ping(&client).await.unwrap_err().code, ErrorCode::Timeout);
}

#[tokio::test]
async fn test_ping_uses_configured_timeout() {
    let mock = MockTransport::new();
    let config = ClientConfig {
        connectivity_timeout: Duration::from_secs(2),
        ..test_config()
    };
    let client = ApiClient::new(&config, Arc::new(mock.clone()));
    mock.respond(200, json!({}));
    health::ping(&client).await.unwrap();
    assert_eq!(mock.last_request().timeout, Some(Duration::from_secs(2)));
}

#[tokio::test]
async fn test_single_resource_lookups() {
    let (client, mock) = test_client();
    mock.respond(200, json!({"data": {"book": {"id": 4, "title": "Emma", "price": "9.99"}}}));
    let book = books::get_book(&client, "4").await.unwrap();
    assert_eq!(book.title, "Emma");
    assert!((book.price - 9.99).abs() < 1e-9);
    assert_eq!(mock.last_request().url, format!("{}/books/4", BASE));

    mock.respond(200, json!({"author": {"id": "12", "name": "Jane Austen", "books_count": 6}}));
    let author = catalog::get_author(&client, "12").await.unwrap();
    assert_eq!(author.books_count, 6);

    mock.respond(200, json!({"success": true, "data": {"order": {"id": 31, "status": "SHIPPED"}}}));
    let order = orders::get_order(&client, "31").await.unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
    assert_eq!(mock.last_request().header("authorization").map(|h| h.starts_with("Bearer ")), Some(true));

    let before = mock.requests().len();
    assert_eq!(books::get_book(&client, " ").await.unwrap_err().code, ErrorCode::Validation);
    assert_eq!(mock.requests().len(), before);
}

#[tokio::test]
async fn test_change_password_checks_strength_first() {
    let (client, mock) = test_client();
    let err = auth::change_password(&client, "old-pass1", "short").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(mock.requests().is_empty());

    mock.respond(200, json!({"success": true, "message": "Password updated"}));
    auth::change_password(&client, "old-pass1", "new-pass22").await.unwrap();
    let sent = mock.last_request();
    assert_eq!(sent.url, format!("{}/auth/change-password", BASE));
    assert_eq!(
        sent.body,
        Some(json!({"current_password": "old-pass1", "new_password": "new-pass22"}))
    );
}

#[tokio::test]
async fn test_availability_round_trip() {
    let (client, mock) = test_client();
    mock.respond(200, json!({"data": {"manager": {"id": 2, "name": "Ali", "is_available": 0}}}));
    assert!(!delivery::my_availability(&client).await.unwrap());
    assert_eq!(mock.last_request().url, format!("{}/delivery-managers/me", BASE));

    mock.respond(200, json!({"success": true, "message": "Updated"}));
    assert!(delivery::set_availability(&client, true).await.unwrap());
    let sent = mock.last_request();
    assert_eq!(sent.method, Method::Patch);
    assert_eq!(sent.body, Some(json!({"available": true})));

    mock.respond(200, json!({"data": {"id": 2, "isAvailable": false}}));
    assert!(!delivery::set_availability(&client, true).await.unwrap());
}
