//! Connectivity Check

use std::time::Duration;

use log::info;

use crate::api::error::ApiResult;
use crate::api::ApiClient;

/// Unauthenticated `GET /health` bounded by the configured connectivity
/// timeout. Any 2xx counts as reachable.
pub async fn ping(client: &ApiClient) -> ApiResult<()> {
    ping_with_timeout(client, client.connectivity_timeout()).await
}

pub async fn ping_with_timeout(client: &ApiClient, timeout: Duration) -> ApiResult<()> {
    client.probe("/health", timeout).await?;
    info!("Server at {} is reachable", client.base_url());
    Ok(())
}
