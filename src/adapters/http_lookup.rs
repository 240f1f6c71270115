use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::model::{LookupRecord, SerialId};
use crate::domain::ports::LookupService;
use crate::utils::error::Result;

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    serial: &'a SerialId,
}

/// Remote lookup against the verification endpoint.
pub struct HttpLookup {
    client: Client,
    endpoint: String,
}

impl HttpLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl LookupService for HttpLookup {
    async fn lookup(&self, serial: &SerialId) -> Result<LookupRecord> {
        tracing::debug!("POST {} serial={}", self.endpoint, serial);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&VerifyRequest { serial })
            .send()
            .await?
            .error_for_status()?;

        // Decoding enforces the closed status type: an unrecognized
        // status from the server fails here instead of silently
        // rendering nothing downstream.
        let record = response.json::<LookupRecord>().await?;
        Ok(record)
    }
}
