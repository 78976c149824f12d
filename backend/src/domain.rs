use anyhow::Result;
use chrono::NaiveDate;
use shared::{AvailabilityRecord, AvailabilityStatus, SaveAvailabilityRequest};
use thiserror::Error;
use tracing::{info, warn};

use crate::db::DbConnection;

/// Errors from saving an availability record
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Domain service for per-person availability records
#[derive(Clone)]
pub struct AvailabilityStore {
    db: DbConnection,
}

impl AvailabilityStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List every stored record for a person
    pub async fn list(&self, person_id: &str) -> Result<Vec<AvailabilityRecord>> {
        let rows = self.db.list_availability(person_id).await?;

        let records: Vec<AvailabilityRecord> = rows
            .into_iter()
            .filter_map(|(date, status)| match AvailabilityStatus::parse(&status) {
                Some(status) => Some(AvailabilityRecord { date, status }),
                None => {
                    warn!("Skipping row with unknown status {:?} for {}", status, date);
                    None
                }
            })
            .collect();

        info!(
            "Listed {} availability records for {}",
            records.len(),
            person_id
        );
        Ok(records)
    }

    /// Create-or-update the record for one date
    pub async fn save(
        &self,
        person_id: &str,
        request: &SaveAvailabilityRequest,
    ) -> Result<(), SaveError> {
        // The date is the record's identity; reject anything that is not
        // a real calendar date before it becomes a storage key.
        if NaiveDate::parse_from_str(&request.date, "%Y-%m-%d").is_err() {
            return Err(SaveError::InvalidDate(request.date.clone()));
        }

        self.db
            .upsert_availability(person_id, &request.date, request.status.as_str())
            .await?;

        info!(
            "Saved availability for {}: {} -> {}",
            person_id, request.date, request.status
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> AvailabilityStore {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        AvailabilityStore::new(db)
    }

    fn request(date: &str, status: AvailabilityStatus) -> SaveAvailabilityRequest {
        SaveAvailabilityRequest {
            date: date.to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn test_save_then_list() {
        let store = setup_test().await;

        store
            .save("alice", &request("2024-03-10", AvailabilityStatus::Unavailable))
            .await
            .expect("Failed to save");

        let records = store.list("alice").await.expect("Failed to list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2024-03-10");
        assert_eq!(records[0].status, AvailabilityStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_save_updates_existing_date() {
        let store = setup_test().await;

        store
            .save("alice", &request("2024-03-10", AvailabilityStatus::Unavailable))
            .await
            .expect("Failed to save");
        store
            .save("alice", &request("2024-03-10", AvailabilityStatus::Preferred))
            .await
            .expect("Failed to re-save");

        let records = store.list("alice").await.expect("Failed to list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AvailabilityStatus::Preferred);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_date() {
        let store = setup_test().await;

        let result = store
            .save("alice", &request("2024-03-99", AvailabilityStatus::Preferred))
            .await;
        assert!(matches!(result, Err(SaveError::InvalidDate(_))));

        let result = store
            .save("alice", &request("not a date", AvailabilityStatus::Preferred))
            .await;
        assert!(matches!(result, Err(SaveError::InvalidDate(_))));
    }

    #[tokio::test]
    async fn test_list_skips_rows_with_unknown_status() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        // Simulate a row written by an older build
        db.upsert_availability("alice", "2024-03-01", "busy")
            .await
            .expect("Failed to upsert");
        db.upsert_availability("alice", "2024-03-02", "preferred")
            .await
            .expect("Failed to upsert");

        let store = AvailabilityStore::new(db);
        let records = store.list("alice").await.expect("Failed to list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2024-03-02");
    }
}
