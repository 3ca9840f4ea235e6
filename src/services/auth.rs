use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Stable identifier for an authenticated user.
pub type UserId = String;

/// Verifies bearer tokens against the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Returns the stable user id the token belongs to, or `Unauthorized`.
    async fn verify(&self, token: &str) -> AppResult<UserId>;
}

/// Verifier backed by the Identity Toolkit `accounts:lookup` endpoint, the
/// REST surface the hosted identity provider exposes for ID-token checks.
pub struct IdentityToolkitVerifier {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl IdentityToolkitVerifier {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
}

#[async_trait::async_trait]
impl TokenVerifier for IdentityToolkitVerifier {
    async fn verify(&self, token: &str) -> AppResult<UserId> {
        let url = format!("{}/accounts:lookup", self.api_url);
        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized(
                "Invalid or expired token".to_string(),
            ));
        }

        let lookup: LookupResponse = response.json().await?;
        lookup
            .users
            .first()
            .map(|user| user.local_id.clone())
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}
