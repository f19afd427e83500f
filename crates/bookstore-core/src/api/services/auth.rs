//! Authentication
//!
//! Sign-in stores the bearer token in the client so every later call is
//! authenticated; sign-out always forgets it.

use log::{info, warn};
use serde::Serialize;
use serde_json::json;

use super::to_body;
use crate::api::envelope::decode_object;
use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiClient;
use crate::domain::{AuthSession, User};
use crate::validation;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl RegisterRequest {
    /// First problem with the form, if any.
    pub fn validate(&self, confirmation: &str) -> Option<String> {
        validation::validate_all([
            validation::name(&self.name),
            validation::email(&self.email),
            self.phone.as_deref().and_then(validation::phone),
            validation::password(&self.password),
            validation::confirm_password(&self.password, confirmation),
        ])
    }
}

#[derive(Serialize)]
struct ChangePasswordArgs<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

async fn start_session(client: &ApiClient, body: serde_json::Value) -> ApiResult<AuthSession> {
    let mut session: AuthSession = decode_object(body, &[])?;
    if session.token.trim().is_empty() {
        return Err(ApiError::parse("response did not include a token"));
    }
    client.set_token(Some(session.token.clone()));

    if session.user.is_none() {
        match current_user(client).await {
            Ok(user) => session.user = Some(user),
            Err(e) => warn!("Signed in but could not load profile: {}", e),
        }
    }
    info!("Signed in as {:?}", session.role());
    Ok(session)
}

pub async fn login(client: &ApiClient, email: &str, password: &str) -> ApiResult<AuthSession> {
    let body = client
        .post_public("/auth/login", json!({"email": email.trim(), "password": password}))
        .await?;
    start_session(client, body).await
}

pub async fn register(client: &ApiClient, request: &RegisterRequest) -> ApiResult<AuthSession> {
    let body = client.post_public("/auth/register", to_body(request)?).await?;
    start_session(client, body).await
}

pub async fn current_user(client: &ApiClient) -> ApiResult<User> {
    let body = client.get("/auth/me", &[]).await?;
    decode_object(body, &["user"])
}

pub async fn change_password(client: &ApiClient, current: &str, new_password: &str) -> ApiResult<()> {
    if let Some(msg) = validation::password(new_password) {
        return Err(ApiError::validation(msg));
    }
    let args = ChangePasswordArgs {
        current_password: current,
        new_password,
    };
    client.post("/auth/change-password", to_body(&args)?).await?;
    Ok(())
}

pub async fn forgot_password(client: &ApiClient, email: &str) -> ApiResult<()> {
    if let Some(msg) = validation::email(email) {
        return Err(ApiError::validation(msg));
    }
    client
        .post_public("/auth/forgot-password", json!({"email": email.trim()}))
        .await?;
    Ok(())
}

/// Tell the backend, then drop the token regardless of the answer.
pub async fn logout(client: &ApiClient) {
    if client.token().is_some() {
        if let Err(e) = client.post("/auth/logout", json!({})).await {
            warn!("Logout request failed: {}", e);
        }
    }
    client.set_token(None);
    info!("Signed out");
}
