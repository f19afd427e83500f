//! Lenient JSON Field Decoding
//!
//! The backend is inconsistent about field types: ids arrive as numbers or
//! strings, prices as numbers or numeric strings, flags as booleans or 0/1.
//! These helpers are used with `#[serde(default, deserialize_with = "...")]`.
//!
//! Key spellings vary too (`customerId`, `customer_id`, `user_id`), and some
//! payloads carry several of them at once. Models list their accepted
//! spellings with `lenient_keys!` instead of serde aliases, which reject a
//! body naming the same field twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::format::parse_backend_date;

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(
            n.as_i64()
                .map(|i| i.to_string())
                .or_else(|| n.as_u64().map(|u| u.to_string()))
                .unwrap_or_else(|| n.to_string()),
        ),
        _ => None,
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Id that may be a JSON number or string; normalized to `String`.
pub fn string_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(value_to_string).unwrap_or_default())
}

pub fn opt_string_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value
        .as_ref()
        .and_then(value_to_string)
        .filter(|s| !s.is_empty()))
}

/// List of ids, each a number or a string.
pub fn string_ids<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Vec<Value>>::deserialize(d)?;
    Ok(value
        .unwrap_or_default()
        .iter()
        .filter_map(value_to_string)
        .collect())
}

pub fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(value_to_f64).unwrap_or(0.0))
}

pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

pub fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value
        .as_ref()
        .and_then(value_to_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u32)
        .unwrap_or(0))
}

pub fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value
        .as_ref()
        .and_then(value_to_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u32))
}

pub fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(value_to_bool).unwrap_or(false))
}

/// Timestamp in any of the formats `parse_backend_date` understands.
/// Unparseable values become `None` rather than failing the whole record.
pub fn opt_datetime<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => parse_backend_date(&s),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    })
}

/// Keep the first non-null spelling of each field under its canonical key
/// and drop the rest. The canonical key wins over the listed spellings,
/// which are tried in order.
pub fn canonicalize_keys(map: &mut Map<String, Value>, fields: &[(&str, &[&str])]) {
    for (canonical, spellings) in fields {
        let chosen = std::iter::once(*canonical)
            .chain(spellings.iter().copied())
            .find(|key| map.get(*key).is_some_and(|v| !v.is_null()));
        let value = chosen.and_then(|key| map.remove(key));
        for key in spellings.iter() {
            map.remove(*key);
        }
        if let Some(value) = value {
            map.insert(canonical.to_string(), value);
        }
    }
}

/// Decode a model through `canonicalize_keys`. The struct carries
/// `#[serde(remote = "Self")]` so its derived impls become inherent
/// functions this macro wraps; `serialize` forwards the derived
/// `Serialize` unchanged.
macro_rules! lenient_keys {
    ($ty:ty, serialize { $($body:tt)* }) => {
        $crate::json::lenient_keys!($ty { $($body)* });

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                <$ty>::serialize(self, s)
            }
        }
    };
    ($ty:ty { $($field:ident: [$($spelling:literal),+ $(,)?]),* $(,)? }) => {
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let mut map = <serde_json::Map<String, serde_json::Value> as serde::Deserialize>::deserialize(d)?;
                $crate::json::canonicalize_keys(
                    &mut map,
                    &[$((stringify!($field), &[$($spelling),+][..])),*],
                );
                <$ty>::deserialize(serde_json::Value::Object(map)).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use lenient_keys;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "string_id")]
        id: String,
        #[serde(default, deserialize_with = "lenient_f64")]
        price: f64,
        #[serde(default, deserialize_with = "lenient_bool")]
        active: bool,
        #[serde(default, deserialize_with = "opt_u32")]
        stock: Option<u32>,
        #[serde(default, deserialize_with = "opt_datetime")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_numeric_id_becomes_string() {
        let p: Sample = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(p.id, "42");
    }

    #[test]
    fn test_string_values_are_coerced() {
        let p: Sample =
            serde_json::from_str(r#"{"id":"b-1","price":"12.50","active":"1","stock":"3"}"#)
                .unwrap();
        assert_eq!(p.id, "b-1");
        assert_eq!(p.price, 12.5);
        assert!(p.active);
        assert_eq!(p.stock, Some(3));
    }

    #[test]
    fn test_nulls_and_garbage_fall_back() {
        let p: Sample =
            serde_json::from_str(r#"{"id":null,"price":"abc","active":null,"at":"not a date"}"#)
                .unwrap();
        assert_eq!(p.id, "");
        assert_eq!(p.price, 0.0);
        assert!(!p.active);
        assert!(p.at.is_none());
    }

    #[test]
    fn test_epoch_seconds_timestamp() {
        let p: Sample = serde_json::from_str(r#"{"at": 0}"#).unwrap();
        assert_eq!(p.at.unwrap().timestamp(), 0);
    }

    #[test]
    fn test_first_present_spelling_wins() {
        let mut map = serde_json::from_str::<Map<String, Value>>(
            r#"{"customer_id": null, "customerId": 7, "user_id": 8, "price": 9.5, "unitPrice": 9.0}"#,
        )
        .unwrap();
        canonicalize_keys(
            &mut map,
            &[
                ("customer_id", &["customerId", "user_id"][..]),
                ("unit_price", &["unitPrice", "price"][..]),
            ],
        );
        assert_eq!(map.get("customer_id"), Some(&Value::from(7)));
        assert_eq!(map.get("unit_price"), Some(&Value::from(9.0)));
        assert_eq!(map.len(), 2);
    }
}
