use crate::domain::model::{Outcome, Status};

/// Display class of a verdict; the presentation layer maps it to its
/// own styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Authentic,
    Expired,
    Counterfeit,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Authentic => "result-authentic",
            Severity::Expired => "result-expired",
            Severity::Counterfeit => "result-counterfeit",
        }
    }
}

/// Human-readable verification result: a headline message plus detail
/// lines for the result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub message: String,
    pub severity: Severity,
    pub details: Vec<String>,
}

/// Map a resolved outcome to its user-facing verdict. A `NotFound`
/// outcome deliberately produces nothing; see DESIGN.md.
pub fn render(outcome: &Outcome) -> Option<Verdict> {
    let record = &outcome.record;
    match outcome.status {
        Status::Authentic => {
            let mut details = vec![
                "Status: Authentic and Safe".to_string(),
                format!("Expiry Date: {}", record.expiry_date),
                format!("Batch Number: {}", record.batch),
            ];
            if let Some(serial) = &record.serial {
                details.push(format!("Serial Number: {}", serial));
            }
            details.push(format!("Manufacturer: {}", record.manufacturer));

            Some(Verdict {
                message: "✅ VERIFIED: This Serial ID is Authentic and Valid.".to_string(),
                severity: Severity::Authentic,
                details,
            })
        }
        Status::Expired => {
            let mut details = vec![
                "Status: EXPIRED!".to_string(),
                format!("Expiry Date: {} (Past Date)", record.expiry_date),
                format!("Batch Number: {}", record.batch),
            ];
            if let Some(serial) = &record.serial {
                details.push(format!("Serial Number: {}", serial));
            }
            details.push(format!("Manufacturer: {}", record.manufacturer));
            details.push("ACTION: Quarantine stock immediately.".to_string());

            Some(Verdict {
                message: "⚠️ WARNING: This Serial ID is Expired. Do Not Dispense.".to_string(),
                severity: Severity::Expired,
                details,
            })
        }
        Status::Counterfeit => Some(Verdict {
            message: "❌ ALERT: Potential Counterfeit Detected".to_string(),
            severity: Severity::Counterfeit,
            details: vec![
                "Status: COUNTERFEIT".to_string(),
                "Reason: Serial number flagged or matched a known fraudulent identifier."
                    .to_string(),
                format!("Batch/Serial Number: {}", outcome.serial),
                "ACTION: Immediately quarantine product and report to the regulator.".to_string(),
            ],
        }),
        Status::NotFound => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ExpiryDate, LookupRecord, SerialId};
    use chrono::{NaiveDate, Utc};

    fn outcome(status: Status, record: LookupRecord) -> Outcome {
        Outcome {
            serial: SerialId::normalize("A1234567890").unwrap(),
            status,
            record,
            timestamp: Utc::now(),
        }
    }

    fn record(status: Status) -> LookupRecord {
        LookupRecord {
            status,
            expiry_date: ExpiryDate::Date(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()),
            batch: "BTX-45".to_string(),
            manufacturer: "PharmaCo Kenya".to_string(),
            serial: None,
        }
    }

    #[test]
    fn test_authentic_verdict() {
        let verdict = render(&outcome(Status::Authentic, record(Status::Authentic))).unwrap();

        assert!(verdict.message.contains("Authentic and Valid"));
        assert_eq!(verdict.severity, Severity::Authentic);
        assert!(verdict.details.contains(&"Batch Number: BTX-45".to_string()));
        assert!(verdict
            .details
            .contains(&"Manufacturer: PharmaCo Kenya".to_string()));
    }

    #[test]
    fn test_authentic_verdict_includes_unit_serial_when_present() {
        let mut unit_record = record(Status::Authentic);
        unit_record.serial = Some("A1234567890".to_string());

        let verdict = render(&outcome(Status::Authentic, unit_record)).unwrap();
        assert!(verdict
            .details
            .contains(&"Serial Number: A1234567890".to_string()));
    }

    #[test]
    fn test_expired_verdict() {
        let verdict = render(&outcome(Status::Expired, record(Status::Expired))).unwrap();

        assert!(verdict.message.contains("Do Not Dispense"));
        assert_eq!(verdict.severity, Severity::Expired);
        assert!(verdict
            .details
            .contains(&"Expiry Date: 2026-10-01 (Past Date)".to_string()));
        assert!(verdict
            .details
            .contains(&"ACTION: Quarantine stock immediately.".to_string()));
    }

    #[test]
    fn test_counterfeit_verdict_names_the_queried_serial() {
        let verdict = render(&outcome(Status::Counterfeit, record(Status::Counterfeit))).unwrap();

        assert!(verdict.message.contains("Potential Counterfeit Detected"));
        assert_eq!(verdict.severity, Severity::Counterfeit);
        assert!(verdict
            .details
            .contains(&"Batch/Serial Number: A1234567890".to_string()));
    }

    // Intentional asymmetry, questionable but kept: a not-found
    // result renders no message at all.
    #[test]
    fn test_not_found_renders_nothing() {
        let not_found = LookupRecord {
            status: Status::NotFound,
            expiry_date: ExpiryDate::NotAvailable,
            batch: "N/A".to_string(),
            manufacturer: "N/A".to_string(),
            serial: None,
        };
        assert_eq!(render(&outcome(Status::NotFound, not_found)), None);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Authentic.label(), "result-authentic");
        assert_eq!(Severity::Expired.label(), "result-expired");
        assert_eq!(Severity::Counterfeit.label(), "result-counterfeit");
    }
}
