use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::model::{ExpiryDate, LookupRecord, SerialId, Status};
use crate::domain::ports::LookupService;
use crate::utils::error::Result;

/// In-memory stand-in for the remote lookup: a seeded stock table plus
/// the counterfeit-prefix fallback for unmatched serials.
pub struct MockLookup {
    stock: HashMap<String, LookupRecord>,
}

fn seed(status: Status, expiry: NaiveDate, batch: &str, manufacturer: &str) -> LookupRecord {
    LookupRecord {
        status,
        expiry_date: ExpiryDate::Date(expiry),
        batch: batch.to_string(),
        manufacturer: manufacturer.to_string(),
        serial: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

impl MockLookup {
    pub fn new() -> Self {
        let mut stock = HashMap::new();
        stock.insert(
            "A1234567890".to_string(),
            seed(Status::Authentic, date(2026, 10, 1), "BTX-45", "PharmaCo Kenya"),
        );
        stock.insert(
            "C9876543210".to_string(),
            seed(Status::Counterfeit, date(2025, 1, 1), "XXX-01", "Unknown"),
        );
        stock.insert(
            "E1112223334".to_string(),
            seed(Status::Expired, date(2024, 1, 1), "BTX-30", "PharmaCo Kenya"),
        );
        stock.insert(
            "A0000000000".to_string(),
            seed(Status::Authentic, date(2025, 12, 31), "BTX-46", "PharmaCo Kenya"),
        );
        // Cloned serial: real batch data, but flagged counterfeit.
        stock.insert(
            "C1111111111".to_string(),
            seed(Status::Counterfeit, date(2026, 3, 1), "BTX-45", "PharmaCo Kenya"),
        );
        stock.insert(
            "E4445556667".to_string(),
            seed(Status::Expired, date(2023, 5, 15), "OLD-22", "Global Meds"),
        );
        Self { stock }
    }

    /// Add or replace a stock entry; handy for tests.
    pub fn with_record(mut self, serial: &str, record: LookupRecord) -> Self {
        self.stock.insert(serial.to_string(), record);
        self
    }
}

impl Default for MockLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LookupService for MockLookup {
    async fn lookup(&self, serial: &SerialId) -> Result<LookupRecord> {
        if let Some(record) = self.stock.get(serial.as_str()) {
            return Ok(record.clone());
        }

        // Fallback heuristic: a C-prefixed serial with no exact match
        // is treated as a known fraudulent identifier.
        if serial.as_str().starts_with('C') {
            return Ok(LookupRecord {
                status: Status::Counterfeit,
                expiry_date: ExpiryDate::NotAvailable,
                batch: "UNK-FF".to_string(),
                manufacturer: "N/A".to_string(),
                serial: None,
            });
        }

        Ok(LookupRecord {
            status: Status::NotFound,
            expiry_date: ExpiryDate::NotAvailable,
            batch: "N/A".to_string(),
            manufacturer: "N/A".to_string(),
            serial: None,
        })
    }
}
