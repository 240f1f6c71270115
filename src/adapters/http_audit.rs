use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::model::AuditEntry;
use crate::domain::ports::AuditSink;
use crate::utils::error::{Result, VerifyError};

#[derive(Debug, Deserialize)]
struct LogResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Audit writer backed by the remote log endpoint. Every failure maps
/// to `LogWriteError`; the dispatching side treats it as diagnostics.
pub struct HttpAuditSink {
    client: Client,
    endpoint: String,
}

impl HttpAuditSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl AuditSink for HttpAuditSink {
    async fn record(&self, entry: &AuditEntry) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(entry)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| VerifyError::LogWriteError {
                message: e.to_string(),
            })?;

        let payload: LogResponse =
            response
                .json()
                .await
                .map_err(|e| VerifyError::LogWriteError {
                    message: e.to_string(),
                })?;

        if !payload.success {
            return Err(VerifyError::LogWriteError {
                message: payload
                    .error
                    .unwrap_or_else(|| "log endpoint reported failure".to_string()),
            });
        }
        Ok(())
    }
}
