//! Public Advertisements

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{item_path, require_id, to_body};
use crate::api::envelope::{decode_list, decode_object};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::PublicAd;
use crate::validation;

/// Admin form for an advertisement. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AdInput {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub active: bool,
}

impl AdInput {
    pub fn validate(&self) -> Option<String> {
        let first = validation::validate_all([
            validation::required(&self.title, "Title"),
            validation::date(&self.start_date),
            validation::date(&self.end_date),
        ]);
        if first.is_some() {
            return first;
        }
        let start = NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d");
        let end = NaiveDate::parse_from_str(self.end_date.trim(), "%Y-%m-%d");
        match (start, end) {
            (Ok(s), Ok(e)) if e < s => Some("End date must not be before the start date".to_string()),
            _ => None,
        }
    }
}

fn checked(input: &AdInput) -> ApiResult<Value> {
    match input.validate() {
        Some(msg) => Err(ApiError::validation(msg)),
        None => to_body(input),
    }
}

/// Ads currently on show. The backend filters by date too; expired or
/// inactive ones that slip through are dropped here.
pub async fn active_ads(client: &ApiClient) -> ApiResult<Vec<PublicAd>> {
    let body = client.get_public("/ads/active", &[]).await?;
    let ads: Vec<PublicAd> = decode_list(body, &["ads"])?;
    let now = Utc::now();
    Ok(ads.into_iter().filter(|ad| ad.is_live(now)).collect())
}

pub async fn all_ads(client: &ApiClient) -> ApiResult<Vec<PublicAd>> {
    let body = client.get("/ads", &[]).await?;
    decode_list(body, &["ads"])
}

pub async fn create_ad(client: &ApiClient, input: &AdInput) -> ApiResult<PublicAd> {
    let body = client.post("/ads", checked(input)?).await?;
    decode_object(body, &["ad"])
}

pub async fn update_ad(client: &ApiClient, id: &str, input: &AdInput) -> ApiResult<PublicAd> {
    require_id(id, "ad")?;
    let body = client.put(&item_path("/ads", id), checked(input)?).await?;
    decode_object(body, &["ad"])
}

pub async fn delete_ad(client: &ApiClient, id: &str) -> ApiResult<()> {
    require_id(id, "ad")?;
    client.delete(&item_path("/ads", id)).await?;
    Ok(())
}
