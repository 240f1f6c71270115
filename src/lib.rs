pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{
    http_audit::HttpAuditSink, http_lookup::HttpLookup, identity::HttpIdentity,
    mock_lookup::MockLookup,
};
pub use crate::config::CliConfig;
pub use crate::core::backoff::with_backoff;
pub use crate::core::engine::{establish_session, VerifyEngine};
pub use crate::core::render::{render, Severity, Verdict};
pub use crate::core::status::{ConnectionState, StatusReporter, TransportEvent};
pub use crate::core::verifier::Verifier;
pub use crate::domain::model::{
    AuditEntry, ExpiryDate, LookupRecord, Outcome, SerialId, Session, Status,
};
pub use crate::utils::error::{Result, VerifyError};
