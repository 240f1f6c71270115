use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::{Result, VerifyError};

/// Minimum length of a serial/batch identifier after normalization.
pub const MIN_SERIAL_LEN: usize = 5;

/// Normalized serial or batch identifier used as the lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SerialId(String);

impl SerialId {
    /// Trim surrounding whitespace and upper-case the input. Length is
    /// the only validation rule; charset is deliberately unchecked.
    pub fn normalize(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.len() < MIN_SERIAL_LEN {
            return Err(VerifyError::TooShort {
                len: normalized.len(),
                min: MIN_SERIAL_LEN,
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SerialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classification of a product unit. Closed set: anything else coming
/// off the wire is rejected at the lookup boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
    Authentic,
    Counterfeit,
    Expired,
    NotFound,
}

impl Status {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Status::Authentic => "AUTHENTIC",
            Status::Counterfeit => "COUNTERFEIT",
            Status::Expired => "EXPIRED",
            Status::NotFound => "NOT FOUND",
        }
    }
}

impl FromStr for Status {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self> {
        // The remote service speaks upper case, the demo stock table
        // lower case; separators in "not found" vary.
        match s.trim().to_uppercase().replace(['_', '-'], " ").as_str() {
            "AUTHENTIC" => Ok(Status::Authentic),
            "COUNTERFEIT" => Ok(Status::Counterfeit),
            "EXPIRED" => Ok(Status::Expired),
            "NOT FOUND" | "NOTFOUND" => Ok(Status::NotFound),
            _ => Err(VerifyError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = VerifyError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.wire_name().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Expiry date of a batch, or the `"N/A"` sentinel for records that
/// carry none (counterfeit and not-found results).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExpiryDate {
    Date(NaiveDate),
    #[default]
    NotAvailable,
}

impl ExpiryDate {
    pub fn is_past(&self, today: NaiveDate) -> bool {
        matches!(self, ExpiryDate::Date(date) if *date < today)
    }
}

impl TryFrom<String> for ExpiryDate {
    type Error = VerifyError;

    fn try_from(value: String) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case("N/A") {
            return Ok(ExpiryDate::NotAvailable);
        }
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(ExpiryDate::Date)
            .map_err(|_| VerifyError::InvalidExpiryDate { value })
    }
}

impl From<ExpiryDate> for String {
    fn from(expiry: ExpiryDate) -> Self {
        match expiry {
            ExpiryDate::Date(date) => date.format("%Y-%m-%d").to_string(),
            ExpiryDate::NotAvailable => "N/A".to_string(),
        }
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from(*self))
    }
}

/// Classification record returned by the lookup service. The remote
/// counterfeit response carries only `status`, so the remaining fields
/// default to the `"N/A"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRecord {
    pub status: Status,
    #[serde(default)]
    pub expiry_date: ExpiryDate,
    #[serde(default = "not_available")]
    pub batch: String,
    #[serde(default = "not_available")]
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

fn not_available() -> String {
    "N/A".to_string()
}

impl LookupRecord {
    /// Expiry override: a past expiry date forces `Expired` unless the
    /// record is already counterfeit. Idempotent.
    pub fn resolved_status(&self, today: NaiveDate) -> Status {
        if self.expiry_date.is_past(today) && self.status != Status::Counterfeit {
            Status::Expired
        } else {
            self.status
        }
    }
}

/// Derived, possibly status-corrected view of a lookup record. Built
/// fresh on every verification call.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub serial: SerialId,
    pub status: Status,
    pub record: LookupRecord,
    pub timestamp: DateTime<Utc>,
}

/// Session context threaded through the pipeline and audit dispatch
/// instead of being read from shared globals.
#[derive(Debug, Clone)]
pub struct Session {
    pub app_id: String,
    pub user_id: Option<String>,
}

impl Session {
    pub fn new(app_id: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            app_id: app_id.into(),
            user_id,
        }
    }

    pub fn anonymous(app_id: impl Into<String>) -> Self {
        Self::new(app_id, None)
    }
}

/// Write-once record of a verification attempt. Storage belongs to the
/// audit sink; the pipeline only dispatches it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub serial: SerialId,
    pub timestamp: DateTime<Utc>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub app_id: String,
}

impl AuditEntry {
    pub fn from_outcome(outcome: &Outcome, session: &Session) -> Self {
        Self {
            serial: outcome.serial.clone(),
            timestamp: outcome.timestamp,
            status: outcome.status,
            user_id: session.user_id.clone(),
            app_id: session.app_id.clone(),
        }
    }
}
