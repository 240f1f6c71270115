use std::sync::Arc;

use chrono::Utc;

use crate::domain::model::{AuditEntry, Outcome, SerialId, Session};
use crate::domain::ports::{AuditSink, LookupService};
use crate::utils::error::Result;

/// The serial-verification pipeline: normalize the input, look it up,
/// re-derive the status, dispatch the audit entry, return the outcome.
pub struct Verifier<L, A> {
    lookup: L,
    audit: Arc<A>,
    session: Session,
}

impl<L, A> Verifier<L, A>
where
    L: LookupService,
    A: AuditSink + 'static,
{
    pub fn new(lookup: L, audit: A, session: Session) -> Self {
        Self {
            lookup,
            audit: Arc::new(audit),
            session,
        }
    }

    /// Verify raw user input. Rejects before any lookup when the
    /// normalized input is too short.
    pub async fn verify(&self, raw: &str) -> Result<Outcome> {
        let serial = SerialId::normalize(raw)?;
        self.verify_serial(serial).await
    }

    pub async fn verify_serial(&self, serial: SerialId) -> Result<Outcome> {
        tracing::debug!("looking up serial {}", serial);
        let record = self.lookup.lookup(&serial).await?;

        let timestamp = Utc::now();
        let status = record.resolved_status(timestamp.date_naive());
        let outcome = Outcome {
            serial,
            status,
            record,
            timestamp,
        };

        self.dispatch_audit(&outcome);
        Ok(outcome)
    }

    // Detached on purpose: a slow or failing audit store must never
    // delay or reorder the user-visible result.
    fn dispatch_audit(&self, outcome: &Outcome) {
        let entry = AuditEntry::from_outcome(outcome, &self.session);
        let sink = Arc::clone(&self.audit);
        tokio::spawn(async move {
            if let Err(err) = sink.record(&entry).await {
                tracing::warn!("failed to log verification attempt: {}", err);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ExpiryDate, LookupRecord, Status};
    use crate::utils::error::VerifyError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::sync::Mutex;

    struct StubLookup {
        calls: Arc<AtomicU32>,
        record: Option<LookupRecord>,
    }

    impl StubLookup {
        fn returning(record: LookupRecord) -> Self {
            Self {
                calls: Arc::new(AtomicU32::new(0)),
                record: Some(record),
            }
        }

        fn failing() -> Self {
            Self {
                calls: Arc::new(AtomicU32::new(0)),
                record: None,
            }
        }
    }

    #[async_trait]
    impl LookupService for StubLookup {
        async fn lookup(&self, _serial: &SerialId) -> Result<LookupRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.record
                .clone()
                .ok_or_else(|| VerifyError::UnknownStatus {
                    value: "stub failure".to_string(),
                })
        }
    }

    #[derive(Clone)]
    struct MemoryAuditSink {
        entries: Arc<Mutex<Vec<AuditEntry>>>,
    }

    impl MemoryAuditSink {
        fn new() -> Self {
            Self {
                entries: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn wait_for_entries(&self, expected: usize) -> Vec<AuditEntry> {
            for _ in 0..100 {
                {
                    let entries = self.entries.lock().await;
                    if entries.len() >= expected {
                        return entries.clone();
                    }
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            self.entries.lock().await.clone()
        }
    }

    #[async_trait]
    impl AuditSink for MemoryAuditSink {
        async fn record(&self, entry: &AuditEntry) -> Result<()> {
            self.entries.lock().await.push(entry.clone());
            Ok(())
        }
    }

    fn authentic_record() -> LookupRecord {
        LookupRecord {
            status: Status::Authentic,
            expiry_date: ExpiryDate::Date(
                Utc::now().date_naive() + chrono::Duration::days(300),
            ),
            batch: "BTX-45".to_string(),
            manufacturer: "PharmaCo Kenya".to_string(),
            serial: None,
        }
    }

    fn session() -> Session {
        Session::new("default-app-id", Some("user-1234".to_string()))
    }

    #[tokio::test]
    async fn test_short_input_rejected_before_lookup() {
        let lookup = StubLookup::returning(authentic_record());
        let calls = Arc::clone(&lookup.calls);
        let verifier = Verifier::new(lookup, MemoryAuditSink::new(), session());

        let err = verifier.verify("E111").await.unwrap_err();

        assert!(matches!(err, VerifyError::TooShort { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_verify_dispatches_exactly_one_audit_entry() {
        let sink = MemoryAuditSink::new();
        let verifier = Verifier::new(
            StubLookup::returning(authentic_record()),
            sink.clone(),
            session(),
        );

        let outcome = verifier.verify("a1234567890").await.unwrap();
        assert_eq!(outcome.status, Status::Authentic);
        assert_eq!(outcome.serial.as_str(), "A1234567890");

        let entries = sink.wait_for_entries(1).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].serial.as_str(), "A1234567890");
        assert_eq!(entries[0].status, Status::Authentic);
        assert_eq!(entries[0].app_id, "default-app-id");
        assert_eq!(entries[0].user_id.as_deref(), Some("user-1234"));
    }

    #[tokio::test]
    async fn test_lookup_failure_produces_no_audit_entry() {
        let sink = MemoryAuditSink::new();
        let verifier = Verifier::new(StubLookup::failing(), sink.clone(), session());

        let result = verifier.verify("A1234567890").await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(sink.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_expiry_override_applies_during_verify() {
        let expired = LookupRecord {
            status: Status::Authentic,
            expiry_date: ExpiryDate::Date(
                Utc::now().date_naive() - chrono::Duration::days(30),
            ),
            batch: "OLD-22".to_string(),
            manufacturer: "Global Meds".to_string(),
            serial: None,
        };
        let sink = MemoryAuditSink::new();
        let verifier = Verifier::new(StubLookup::returning(expired), sink.clone(), session());

        let outcome = verifier.verify("E4445556667").await.unwrap();
        assert_eq!(outcome.status, Status::Expired);

        // The audited status is the resolved one.
        let entries = sink.wait_for_entries(1).await;
        assert_eq!(entries[0].status, Status::Expired);
    }

    #[tokio::test]
    async fn test_not_found_outcome_is_still_audited() {
        let not_found = LookupRecord {
            status: Status::NotFound,
            expiry_date: ExpiryDate::NotAvailable,
            batch: "N/A".to_string(),
            manufacturer: "N/A".to_string(),
            serial: None,
        };
        let sink = MemoryAuditSink::new();
        let verifier = Verifier::new(StubLookup::returning(not_found), sink.clone(), session());

        let outcome = verifier.verify("ZZZZZ9999").await.unwrap();
        assert_eq!(outcome.status, Status::NotFound);

        let entries = sink.wait_for_entries(1).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, Status::NotFound);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_affect_outcome() {
        struct RejectingSink;

        #[async_trait]
        impl AuditSink for RejectingSink {
            async fn record(&self, _entry: &AuditEntry) -> Result<()> {
                Err(VerifyError::LogWriteError {
                    message: "store unavailable".to_string(),
                })
            }
        }

        let verifier = Verifier::new(
            StubLookup::returning(authentic_record()),
            RejectingSink,
            session(),
        );

        let outcome = verifier.verify("A1234567890").await.unwrap();
        assert_eq!(outcome.status, Status::Authentic);
    }
}
