//! Borrowing

use serde_json::json;

use super::{action_path, require_id, to_body};
use crate::api::envelope::{decode_list, decode_object};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::{BorrowRecord, BorrowRequest, BorrowStatus};

pub const DEFAULT_BORROW_DAYS: u32 = 14;
pub const MAX_BORROW_DAYS: u32 = 30;

const KEYS: [&str; 2] = ["borrow", "record"];
const LIST_KEYS: [&str; 2] = ["borrows", "records"];

pub async fn request_borrow(client: &ApiClient, book_id: &str, days: u32) -> ApiResult<BorrowRecord> {
    require_id(book_id, "book")?;
    if days == 0 || days > MAX_BORROW_DAYS {
        return Err(ApiError::validation(format!(
            "Borrow period must be between 1 and {} days",
            MAX_BORROW_DAYS
        )));
    }
    let request = BorrowRequest {
        book_id: book_id.to_string(),
        days,
    };
    let body = client.post("/borrows", to_body(&request)?).await?;
    decode_object(body, &KEYS)
}

pub async fn my_borrows(client: &ApiClient) -> ApiResult<Vec<BorrowRecord>> {
    let body = client.get("/borrows/my", &[]).await?;
    decode_list(body, &LIST_KEYS)
}

pub async fn return_book(client: &ApiClient, record: &BorrowRecord) -> ApiResult<BorrowRecord> {
    if !record.can_return() {
        return Err(ApiError::validation("This book is not currently borrowed"));
    }
    let body = client
        .post(&action_path("/borrows", &record.id, "return"), json!({}))
        .await?;
    let mut returned: BorrowRecord = decode_object(body, &KEYS).unwrap_or_else(|_| record.clone());
    if returned.id.is_empty() {
        returned = record.clone();
    }
    returned.status = BorrowStatus::Returned;
    Ok(returned)
}

/// Pending requests awaiting a librarian.
pub async fn borrow_requests(client: &ApiClient) -> ApiResult<Vec<BorrowRecord>> {
    let query = [("status", BorrowStatus::Requested.as_str().to_string())];
    let body = client.get("/borrows", &query).await?;
    decode_list(body, &LIST_KEYS)
}

pub async fn approve_borrow(client: &ApiClient, id: &str) -> ApiResult<BorrowRecord> {
    require_id(id, "borrow")?;
    let body = client.post(&action_path("/borrows", id, "approve"), json!({})).await?;
    decode_object(body, &KEYS)
}

pub async fn reject_borrow(client: &ApiClient, id: &str, reason: &str) -> ApiResult<()> {
    require_id(id, "borrow")?;
    if reason.trim().is_empty() {
        return Err(ApiError::validation("Please give a reason for the rejection"));
    }
    client
        .post(&action_path("/borrows", id, "reject"), json!({"reason": reason.trim()}))
        .await?;
    Ok(())
}
