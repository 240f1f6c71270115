use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::utils::error::{Result, VerifyError};

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    user_id: String,
}

/// Anonymous or custom-token sign-in against the identity provider.
/// The returned user id scopes audit entries. Callers wrap `sign_in`
/// in the backoff helper.
pub struct HttpIdentity {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpIdentity {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            token,
        }
    }

    pub async fn sign_in(&self) -> Result<String> {
        let body = SignInRequest {
            token: self.token.as_deref(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| VerifyError::AuthError { source })?;

        let payload: SignInResponse = response
            .json()
            .await
            .map_err(|source| VerifyError::AuthError { source })?;
        Ok(payload.user_id)
    }
}
