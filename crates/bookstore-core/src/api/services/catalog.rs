//! Categories and Authors

use serde::Serialize;
use serde_json::Value;

use super::{item_path, require_id, to_body};
use crate::api::envelope::{decode_list, decode_object};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::{Author, Category};
use crate::validation;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn validate(&self) -> Option<String> {
        validation::required(&self.name, "Category name")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AuthorInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl AuthorInput {
    pub fn validate(&self) -> Option<String> {
        validation::name(&self.name)
    }
}

fn checked<T: Serialize>(input: &T, problem: Option<String>) -> ApiResult<Value> {
    match problem {
        Some(msg) => Err(ApiError::validation(msg)),
        None => to_body(input),
    }
}

// ========================
// Categories
// ========================

pub async fn list_categories(client: &ApiClient) -> ApiResult<Vec<Category>> {
    let body = client.get_public("/categories", &[]).await?;
    decode_list(body, &["categories"])
}

pub async fn create_category(client: &ApiClient, input: &CategoryInput) -> ApiResult<Category> {
    let body = client.post("/categories", checked(input, input.validate())?).await?;
    decode_object(body, &["category"])
}

pub async fn update_category(client: &ApiClient, id: &str, input: &CategoryInput) -> ApiResult<Category> {
    require_id(id, "category")?;
    let body = client
        .put(&item_path("/categories", id), checked(input, input.validate())?)
        .await?;
    decode_object(body, &["category"])
}

pub async fn delete_category(client: &ApiClient, id: &str) -> ApiResult<()> {
    require_id(id, "category")?;
    client.delete(&item_path("/categories", id)).await?;
    Ok(())
}

// ========================
// Authors
// ========================

pub async fn list_authors(client: &ApiClient) -> ApiResult<Vec<Author>> {
    let body = client.get_public("/authors", &[]).await?;
    decode_list(body, &["authors"])
}

pub async fn get_author(client: &ApiClient, id: &str) -> ApiResult<Author> {
    require_id(id, "author")?;
    let body = client.get_public(&item_path("/authors", id), &[]).await?;
    decode_object(body, &["author"])
}

pub async fn create_author(client: &ApiClient, input: &AuthorInput) -> ApiResult<Author> {
    let body = client.post("/authors", checked(input, input.validate())?).await?;
    decode_object(body, &["author"])
}

pub async fn update_author(client: &ApiClient, id: &str, input: &AuthorInput) -> ApiResult<Author> {
    require_id(id, "author")?;
    let body = client
        .put(&item_path("/authors", id), checked(input, input.validate())?)
        .await?;
    decode_object(body, &["author"])
}

pub async fn delete_author(client: &ApiClient, id: &str) -> ApiResult<()> {
    require_id(id, "author")?;
    client.delete(&item_path("/authors", id)).await?;
    Ok(())
}
