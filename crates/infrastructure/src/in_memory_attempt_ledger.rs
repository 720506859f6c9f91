//! Process-local attempt ledger for single-instance deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use movify_application::{AttemptLedger, LedgerWrite};
use movify_core::AppResult;
use movify_domain::{AttemptRecord, ClientKey};

#[derive(Debug, Clone)]
struct StoredAttempt {
    record: AttemptRecord,
    written_at: DateTime<Utc>,
}

/// In-memory attempt ledger keyed by client key.
///
/// State is lost on restart, which lifts every active lockout.
#[derive(Debug, Default)]
pub struct InMemoryAttemptLedger {
    records: RwLock<HashMap<String, StoredAttempt>>,
}

impl InMemoryAttemptLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptLedger for InMemoryAttemptLedger {
    async fn find(&self, client_key: &ClientKey) -> AppResult<Option<AttemptRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(client_key.as_str())
            .map(|stored| stored.record.clone()))
    }

    async fn insert(
        &self,
        record: &AttemptRecord,
        written_at: DateTime<Utc>,
    ) -> AppResult<LedgerWrite> {
        let mut records = self.records.write().await;
        if records.contains_key(record.client_key.as_str()) {
            return Ok(LedgerWrite::Conflict);
        }

        records.insert(
            record.client_key.as_str().to_owned(),
            StoredAttempt {
                record: record.clone(),
                written_at,
            },
        );
        Ok(LedgerWrite::Applied)
    }

    async fn update(
        &self,
        record: &AttemptRecord,
        expected_version: i64,
        written_at: DateTime<Utc>,
    ) -> AppResult<LedgerWrite> {
        let mut records = self.records.write().await;
        match records.get_mut(record.client_key.as_str()) {
            Some(stored)
                if stored.record.id == record.id && stored.record.version == expected_version =>
            {
                stored.record = record.clone();
                stored.written_at = written_at;
                Ok(LedgerWrite::Applied)
            }
            _ => Ok(LedgerWrite::Conflict),
        }
    }

    async fn delete(&self, client_key: &ClientKey) -> AppResult<bool> {
        Ok(self
            .records
            .write()
            .await
            .remove(client_key.as_str())
            .is_some())
    }

    async fn purge_stale(
        &self,
        written_before: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, stored| {
            stored.written_at >= written_before || stored.record.is_locked_at(now)
        });

        Ok(u64::try_from(before - records.len()).unwrap_or(u64::MAX))
    }
}
