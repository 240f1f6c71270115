use crate::domain::model::{AuditEntry, LookupRecord, SerialId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Resolves a serial identifier to its classification record. The
/// in-memory stock table and the remote endpoint are interchangeable
/// behind this seam.
#[async_trait]
pub trait LookupService: Send + Sync {
    async fn lookup(&self, serial: &SerialId) -> Result<LookupRecord>;
}

/// Durably records verification attempts. Best-effort from the
/// pipeline's point of view: a failed write is diagnostics only.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: &AuditEntry) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn verify_endpoint(&self) -> &str;
    fn log_endpoint(&self) -> &str;
    fn auth_endpoint(&self) -> Option<&str>;
    fn auth_token(&self) -> Option<&str>;
    fn auth_attempts(&self) -> u32;
    fn app_id(&self) -> &str;
}
