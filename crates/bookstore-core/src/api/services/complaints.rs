//! Customer Complaints

use serde_json::json;

use super::{action_path, require_id, to_body};
use crate::api::envelope::{decode_list, decode_object};
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::{ComplaintStatus, CustomerComplaint, NewComplaint};
use crate::validation;

const KEYS: [&str; 1] = ["complaint"];
const LIST_KEYS: [&str; 1] = ["complaints"];

pub const MIN_DESCRIPTION_LEN: usize = 10;

pub async fn submit_complaint(client: &ApiClient, complaint: &NewComplaint) -> ApiResult<CustomerComplaint> {
    let problem = validation::validate_all([
        validation::required(&complaint.subject, "Subject"),
        validation::min_length(&complaint.description, MIN_DESCRIPTION_LEN, "Description"),
    ]);
    if let Some(msg) = problem {
        return Err(ApiError::validation(msg));
    }
    let body = client.post("/complaints", to_body(complaint)?).await?;
    decode_object(body, &KEYS)
}

pub async fn my_complaints(client: &ApiClient) -> ApiResult<Vec<CustomerComplaint>> {
    let body = client.get("/complaints/my", &[]).await?;
    decode_list(body, &LIST_KEYS)
}

pub async fn all_complaints(client: &ApiClient) -> ApiResult<Vec<CustomerComplaint>> {
    let body = client.get("/complaints", &[]).await?;
    decode_list(body, &LIST_KEYS)
}

pub async fn respond_to_complaint(
    client: &ApiClient,
    id: &str,
    response: &str,
    status: ComplaintStatus,
) -> ApiResult<CustomerComplaint> {
    require_id(id, "complaint")?;
    if let Some(msg) = validation::required(response, "Response") {
        return Err(ApiError::validation(msg));
    }
    let body = client
        .post(
            &action_path("/complaints", id, "respond"),
            json!({"response": response.trim(), "status": status.as_str()}),
        )
        .await?;
    decode_object(body, &KEYS)
}
