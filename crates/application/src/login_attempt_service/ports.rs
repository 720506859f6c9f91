use async_trait::async_trait;
use chrono::{DateTime, Utc};

use movify_core::AppResult;
use movify_domain::{AttemptRecord, ClientKey};

/// Outcome of a conditional ledger write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerWrite {
    /// The write was persisted.
    Applied,
    /// Another writer got there first; re-read and decide again.
    Conflict,
}

/// Repository port for per-client attempt records.
#[async_trait]
pub trait AttemptLedger: Send + Sync {
    /// Finds the record tracking `client_key`.
    async fn find(&self, client_key: &ClientKey) -> AppResult<Option<AttemptRecord>>;

    /// Inserts a new record unless one already exists for its client key.
    async fn insert(
        &self,
        record: &AttemptRecord,
        written_at: DateTime<Utc>,
    ) -> AppResult<LedgerWrite>;

    /// Replaces the stored record if it is still at `expected_version`.
    async fn update(
        &self,
        record: &AttemptRecord,
        expected_version: i64,
        written_at: DateTime<Utc>,
    ) -> AppResult<LedgerWrite>;

    /// Deletes the record for `client_key`. Returns whether one existed.
    async fn delete(&self, client_key: &ClientKey) -> AppResult<bool>;

    /// Deletes records last written before `written_before` unless their
    /// lockout is still active at `now`. Returns the number removed.
    async fn purge_stale(
        &self,
        written_before: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<u64>;
}
