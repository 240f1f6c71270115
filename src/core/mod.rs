pub mod backoff;
pub mod engine;
pub mod render;
pub mod status;
pub mod verifier;

pub use crate::domain::model::{AuditEntry, LookupRecord, Outcome, SerialId, Session, Status};
pub use crate::domain::ports::{AuditSink, ConfigProvider, LookupService};
pub use crate::utils::error::Result;
