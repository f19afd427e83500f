//! Author Entity

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::entity::Entity;
use crate::json;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Author {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "json::lenient_u32")]
    pub books_count: u32,
}

json::lenient_keys!(Author, serialize {
    id: ["authorId", "author_id"],
    name: ["fullName", "full_name"],
    bio: ["biography"],
    photo_url: ["photoUrl", "photo", "image"],
    books_count: ["booksCount", "book_count"],
});

impl Author {
    /// Up to two uppercase initials for avatar placeholders.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(|c| c.to_uppercase())
            .collect()
    }

    /// Decode an `author` field that is either a nested object or a bare name.
    pub(crate) fn nested<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Author>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(obj @ Value::Object(_)) => serde_json::from_value(obj).ok(),
            Some(Value::String(name)) if !name.trim().is_empty() => Some(Author {
                name,
                ..Default::default()
            }),
            _ => None,
        })
    }
}

impl Entity for Author {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_from_camel_case() {
        let author: Author = serde_json::from_str(
            r#"{"authorId": 7, "fullName": "Ursula K. Le Guin", "booksCount": "12", "photoUrl": "x.png"}"#,
        )
        .unwrap();
        assert_eq!(author.id(), "7");
        assert_eq!(author.name, "Ursula K. Le Guin");
        assert_eq!(author.books_count, 12);
        assert_eq!(author.photo_url.as_deref(), Some("x.png"));
    }

    #[test]
    fn test_initials() {
        let author = Author { name: "ursula le guin".into(), ..Default::default() };
        assert_eq!(author.initials(), "UL");
        assert_eq!(Author::default().initials(), "");
    }

    #[test]
    fn test_both_spellings_keep_first() {
        let author: Author = serde_json::from_str(
            r#"{"id": 7, "author_id": 7, "name": "Le Guin", "full_name": "Ursula K. Le Guin",
                "booksCount": 12, "book_count": 11}"#,
        )
        .unwrap();
        assert_eq!(author.id(), "7");
        assert_eq!(author.name, "Le Guin");
        assert_eq!(author.books_count, 12);
    }
}
