//! Response Envelope Handling
//!
//! Endpoints answer in several shapes:
//! - `{success, message, data}` with `data` an object or array
//! - a bare array or object
//! - a list nested under `items`, `results` or a resource key (`books`)
//! - a paginated object with `total`/`page`/`last_page` beside the list
//!
//! Everything here works on `serde_json::Value` so services only name the
//! resource keys they expect.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{ApiError, ApiResult, ErrorCode};

const LIST_KEYS: [&str; 5] = ["items", "results", "data", "rows", "records"];

/// Human-readable message from an error body, if it has one.
pub fn error_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => {
            for key in ["message", "error", "detail", "msg"] {
                match map.get(key) {
                    Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
                    Some(nested @ Value::Object(_)) => {
                        if let Some(msg) = error_message(nested) {
                            return Some(msg);
                        }
                    }
                    _ => {}
                }
            }
            map.get("errors").and_then(first_validation_error)
        }
        _ => None,
    }
}

fn first_validation_error(errors: &Value) -> Option<String> {
    match errors {
        Value::Array(list) => list.iter().find_map(|e| match e {
            Value::String(s) => Some(s.clone()),
            other => error_message(other),
        }),
        Value::Object(fields) => fields.iter().find_map(|(field, msgs)| {
            let msg = match msgs {
                Value::String(s) => Some(s.clone()),
                Value::Array(list) => list.iter().find_map(|m| m.as_str().map(str::to_string)),
                _ => None,
            }?;
            Some(format!("{}: {}", field, msg))
        }),
        _ => None,
    }
}

/// Backend code from `error_code`/`errorCode`/`code`, when it is one we know.
pub(crate) fn error_code(body: &Value) -> Option<ErrorCode> {
    let map = body.as_object()?;
    ["error_code", "errorCode", "code"]
        .iter()
        .filter_map(|k| map.get(*k).and_then(Value::as_str))
        .find_map(ErrorCode::parse)
}

/// A 2xx body can still report failure through `success: false` or
/// `status: "error"`.
pub(crate) fn check_envelope(body: &Value) -> ApiResult<()> {
    let Some(map) = body.as_object() else {
        return Ok(());
    };
    // Resources have their own `status` field; only a body without an id
    // can be a JSend-style `{status: "error"}` report.
    let failed = matches!(map.get("success"), Some(Value::Bool(false)))
        || (!map.contains_key("id")
            && matches!(
                map.get("status").and_then(Value::as_str),
                Some("error") | Some("fail")
            ));
    if failed {
        let code = error_code(body).unwrap_or(ErrorCode::FetchFailed);
        let message = error_message(body).unwrap_or_else(|| "Request failed".to_string());
        return Err(ApiError::new(code, message));
    }
    Ok(())
}

/// Strip a `{data: ...}` wrapper when present.
fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(|d| !d.is_null()) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn take_list(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Vec<Value>> {
    keys.iter()
        .chain(LIST_KEYS.iter())
        .find_map(|k| match map.get(*k) {
            Some(Value::Array(_)) => Some(*k),
            _ => None,
        })
        .and_then(|k| match map.remove(k) {
            Some(Value::Array(list)) => Some(list),
            _ => None,
        })
}

fn decode_elements<T: DeserializeOwned>(list: Vec<Value>) -> Vec<T> {
    list.into_iter()
        .filter_map(|v| match serde_json::from_value(v) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping undecodable list element: {}", e);
                None
            }
        })
        .collect()
}

/// Decode a list payload. Elements that fail to decode are skipped so one
/// malformed record does not blank the whole screen.
pub fn decode_list<T: DeserializeOwned>(body: Value, keys: &[&str]) -> ApiResult<Vec<T>> {
    match unwrap_data(body) {
        Value::Array(list) => Ok(decode_elements(list)),
        Value::Object(mut map) => take_list(&mut map, keys)
            .map(decode_elements)
            .ok_or_else(|| ApiError::parse("expected a list")),
        Value::Null => Ok(Vec::new()),
        _ => Err(ApiError::parse("expected a list")),
    }
}

/// Decode a single object, looking under the given resource keys first
/// (`{"book": {...}}`) and otherwise taking the unwrapped body itself.
pub fn decode_object<T: DeserializeOwned>(body: Value, keys: &[&str]) -> ApiResult<T> {
    let value = match unwrap_data(body) {
        Value::Object(mut map) => {
            let key = keys
                .iter()
                .find(|k| matches!(map.get(**k), Some(Value::Object(_))));
            match key {
                Some(k) => map.remove(*k).unwrap_or(Value::Null),
                None => Value::Object(map),
            }
        }
        other => other,
    };
    serde_json::from_value(value).map_err(ApiError::parse)
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total: Option<u32>,
    pub has_more: bool,
}

fn number(map: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|k| match map.get(*k) {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// Decode a listing plus whatever pagination metadata travels with it.
/// Metadata may sit beside the list, inside `meta`/`pagination`, or be
/// absent (then the listing counts as the only page).
pub fn decode_page<T: DeserializeOwned>(body: Value, keys: &[&str], requested_page: u32) -> ApiResult<Page<T>> {
    let unwrapped = unwrap_data(body);
    let mut map = match unwrapped {
        Value::Object(map) => map,
        other => {
            return Ok(Page {
                items: decode_list(other, keys)?,
                page: requested_page,
                total: None,
                has_more: false,
            })
        }
    };

    let meta = ["meta", "pagination"]
        .iter()
        .find_map(|k| map.get(*k).and_then(Value::as_object).cloned())
        .unwrap_or_else(|| map.clone());

    let list = take_list(&mut map, keys).ok_or_else(|| ApiError::parse("expected a list"))?;
    let page = number(&meta, &["page", "current_page", "currentPage"]).unwrap_or(requested_page);
    let total = number(&meta, &["total", "total_count", "totalCount", "count"]);
    let last_page = number(&meta, &["last_page", "lastPage", "total_pages", "totalPages"]);
    let per_page = number(&meta, &["per_page", "perPage", "page_size", "limit"]);

    let has_more = match (last_page, total, per_page) {
        (Some(last), _, _) => page < last,
        (None, Some(total), Some(per)) if per > 0 => page.saturating_mul(per) < total,
        _ => false,
    };

    Ok(Page {
        items: decode_elements(list),
        page,
        total,
        has_more,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Book, Order};
    use serde_json::json;

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(&json!({"message": "Nope"})).as_deref(), Some("Nope"));
        assert_eq!(error_message(&json!({"detail": "Missing"})).as_deref(), Some("Missing"));
        assert_eq!(
            error_message(&json!({"error": {"message": "Nested"}})).as_deref(),
            Some("Nested")
        );
        assert_eq!(
            error_message(&json!({"errors": {"email": ["has already been taken"]}})).as_deref(),
            Some("email: has already been taken")
        );
        assert_eq!(error_message(&json!("plain text")).as_deref(), Some("plain text"));
        assert_eq!(error_message(&json!({"ok": true})), None);
    }

    #[test]
    fn test_check_envelope_failure() {
        let err = check_envelope(&json!({"success": false, "message": "Out of stock", "error_code": "CONFLICT"}))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Out of stock");

        let err = check_envelope(&json!({"status": "error"})).unwrap_err();
        assert_eq!(err.code, ErrorCode::FetchFailed);

        assert!(check_envelope(&json!({"success": true, "data": []})).is_ok());
        assert!(check_envelope(&json!({"id": 5, "status": "fail"})).is_ok());
        assert!(check_envelope(&json!([1, 2])).is_ok());
    }

    #[test]
    fn test_decode_list_shapes() {
        let bare: Vec<Book> = decode_list(json!([{"id": 1, "title": "A"}]), &["books"]).unwrap();
        assert_eq!(bare.len(), 1);

        let wrapped: Vec<Book> =
            decode_list(json!({"success": true, "data": [{"id": 1}, {"id": 2}]}), &["books"]).unwrap();
        assert_eq!(wrapped.len(), 2);

        let keyed: Vec<Book> =
            decode_list(json!({"data": {"books": [{"id": 3}]}}), &["books"]).unwrap();
        assert_eq!(keyed[0].id, "3");

        let items: Vec<Book> = decode_list(json!({"items": [{"id": 4}]}), &[]).unwrap();
        assert_eq!(items[0].id, "4");

        let empty: Vec<Book> = decode_list(json!({"success": true, "data": null}), &[]).unwrap();
        assert!(empty.is_empty());

        assert!(decode_list::<Book>(json!({"success": true}), &["books"]).is_err());
    }

    #[test]
    fn test_decode_list_skips_bad_elements() {
        let books: Vec<Book> = decode_list(json!([{"id": 1}, "garbage", {"id": 2}]), &[]).unwrap();
        assert_eq!(books.len(), 2);
    }

    #[test]
    fn test_decode_object_shapes() {
        let direct: Book = decode_object(json!({"id": 1, "title": "A"}), &["book"]).unwrap();
        assert_eq!(direct.title, "A");

        let keyed: Book =
            decode_object(json!({"success": true, "data": {"book": {"id": 2, "title": "B"}}}), &["book"])
                .unwrap();
        assert_eq!(keyed.title, "B");

        assert!(decode_object::<Book>(json!([1]), &["book"]).is_err());
    }

    #[test]
    fn test_decode_page_metadata() {
        let page: Page<Book> = decode_page(
            json!({"data": {"books": [{"id": 1}], "current_page": 1, "last_page": 3, "total": 25}}),
            &["books"],
            1,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, Some(25));
        assert!(page.has_more);

        let nested: Page<Book> = decode_page(
            json!({"items": [{"id": 1}], "meta": {"page": 2, "per_page": 10, "total": 20}}),
            &["books"],
            2,
        )
        .unwrap();
        assert!(!nested.has_more);

        let bare: Page<Book> = decode_page(json!([{"id": 1}]), &["books"], 1).unwrap();
        assert!(!bare.has_more);
        assert_eq!(bare.page, 1);
    }

    #[test]
    fn test_decode_list_keeps_elements_with_repeated_keys() {
        let orders: Vec<Order> = decode_list(
            json!([{"id": 1, "user_id": 7, "customer_id": 7,
                    "items": [{"book_id": 3, "quantity": 1, "price": 9.5, "unit_price": 9.5}]}]),
            &["orders"],
        )
        .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items[0].unit_price, 9.5);
    }

    #[test]
    fn test_out_of_range_page_numbers_are_ignored() {
        let page: Page<Book> = decode_page(
            json!({"items": [{"id": 1}], "page": 1, "per_page": 10, "total": 4_294_967_297_u64}),
            &["books"],
            1,
        )
        .unwrap();
        assert_eq!(page.total, None);
        assert!(!page.has_more);
    }
}
