//! Domain Layer - Core Entity Trait
//!
//! All backend resources carry an identifier. The backend sends integers for
//! most tables and strings for a few; the client keeps every id as a string.

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// Returns the entity's identifier, normalized to a string
    fn id(&self) -> &str;
}

/// Fold a status/enum spelling to a comparable key:
/// `IN_TRANSIT`, `inTransit`, `in-transit` and `in transit` all become `intransit`.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Wire a status enum's `as_str`/`parse` pair into serde. Decoding never
/// fails: unknown or null spellings become the enum's `Default`.
macro_rules! string_enum_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let raw = <Option<serde_json::Value> as serde::Deserialize>::deserialize(d)?;
                Ok(match raw {
                    Some(serde_json::Value::String(s)) => <$ty>::parse(&s),
                    _ => <$ty>::default(),
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_spellings() {
        assert_eq!(normalize_key("IN_TRANSIT"), "intransit");
        assert_eq!(normalize_key("inTransit"), "intransit");
        assert_eq!(normalize_key("in-transit"), "intransit");
        assert_eq!(normalize_key(" in transit "), "intransit");
    }
}
