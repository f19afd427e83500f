//! Category Entity

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::entity::Entity;
use crate::json;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Category {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "json::lenient_u32")]
    pub books_count: u32,
}

json::lenient_keys!(Category, serialize {
    id: ["categoryId", "category_id"],
    name: ["title"],
    books_count: ["booksCount", "book_count"],
});

impl Category {
    /// Decode a `category` field that is either a nested object or a bare name.
    pub(crate) fn nested<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Category>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(obj @ Value::Object(_)) => serde_json::from_value(obj).ok(),
            Some(Value::String(name)) if !name.trim().is_empty() => Some(Category {
                name,
                ..Default::default()
            }),
            _ => None,
        })
    }
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_spellings_keep_first() {
        let category: Category = serde_json::from_str(
            r#"{"id": 2, "category_id": 2, "name": "Poetry", "title": "Verse", "books_count": "4", "booksCount": 4}"#,
        )
        .unwrap();
        assert_eq!(category.id(), "2");
        assert_eq!(category.name, "Poetry");
        assert_eq!(category.books_count, 4);
    }

    #[test]
    fn test_bare_name_category() {
        let book: crate::domain::Book =
            serde_json::from_str(r#"{"id": 1, "category": "Drama"}"#).unwrap();
        assert_eq!(book.category.map(|c| c.name), Some("Drama".to_string()));
    }
}
