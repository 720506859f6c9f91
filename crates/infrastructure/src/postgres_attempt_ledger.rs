//! PostgreSQL-backed login attempt ledger using the `auth_attempts` table.
//!
//! Writes are conditional: inserts lose to an existing row for the same
//! client key and updates only apply while the stored version matches.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use movify_application::{AttemptLedger, LedgerWrite};
use movify_core::{AppError, AppResult};
use movify_domain::{AttemptRecord, AttemptRecordId, ClientKey};


/// PostgreSQL implementation of the attempt ledger port.
#[derive(Clone)]
pub struct PostgresAttemptLedger {
    pool: PgPool,
}

impl PostgresAttemptLedger {
    /// Creates a ledger with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttemptRow {
    id: uuid::Uuid,
    client_key: String,
    attempts_remaining: i32,
    lockout_until: Option<DateTime<Utc>>,
    version: i64,
}

impl TryFrom<AttemptRow> for AttemptRecord {
    type Error = AppError;

    fn try_from(row: AttemptRow) -> Result<Self, Self::Error> {
        let attempts_remaining = u32::try_from(row.attempts_remaining).map_err(|_| {
            AppError::Internal(format!(
                "attempt record '{}' has negative allowance",
                row.id
            ))
        })?;

        Ok(Self {
            id: AttemptRecordId::from_uuid(row.id),
            client_key: ClientKey::new(row.client_key)?,
            attempts_remaining,
            lockout_until: row.lockout_until,
            version: row.version,
        })
    }
}

fn stored_allowance(record: &AttemptRecord) -> AppResult<i32> {
    i32::try_from(record.attempts_remaining).map_err(|_| {
        AppError::Validation("attempt allowance exceeds the storable range".to_owned())
    })
}

fn write_outcome(rows_affected: u64) -> LedgerWrite {
    if rows_affected == 0 {
        LedgerWrite::Conflict
    } else {
        LedgerWrite::Applied
    }
}

#[async_trait]
impl AttemptLedger for PostgresAttemptLedger {
    async fn find(&self, client_key: &ClientKey) -> AppResult<Option<AttemptRecord>> {
        let row = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT id, client_key, attempts_remaining, lockout_until, version
            FROM auth_attempts
            WHERE client_key = $1
            "#,
        )
        .bind(client_key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load attempt record: {error}")))?;

        row.map(AttemptRecord::try_from).transpose()
    }

    async fn insert(
        &self,
        record: &AttemptRecord,
        written_at: DateTime<Utc>,
    ) -> AppResult<LedgerWrite> {
        let result = sqlx::query(
            r#"
            INSERT INTO auth_attempts (
                id, client_key, attempts_remaining, lockout_until, version, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (client_key) DO NOTHING
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.client_key.as_str())
        .bind(stored_allowance(record)?)
        .bind(record.lockout_until)
        .bind(record.version)
        .bind(written_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert attempt record: {error}")))?;

        Ok(write_outcome(result.rows_affected()))
    }

    async fn update(
        &self,
        record: &AttemptRecord,
        expected_version: i64,
        written_at: DateTime<Utc>,
    ) -> AppResult<LedgerWrite> {
        let result = sqlx::query(
            r#"
            UPDATE auth_attempts
            SET attempts_remaining = $3,
                lockout_until = $4,
                version = $5,
                updated_at = $6
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(expected_version)
        .bind(stored_allowance(record)?)
        .bind(record.lockout_until)
        .bind(record.version)
        .bind(written_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update attempt record: {error}")))?;

        Ok(write_outcome(result.rows_affected()))
    }

    async fn delete(&self, client_key: &ClientKey) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM auth_attempts
            WHERE client_key = $1
            "#,
        )
        .bind(client_key.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete attempt record: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_stale(
        &self,
        written_before: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM auth_attempts
            WHERE updated_at < $1
              AND NOT (
                  attempts_remaining = 0
                  AND lockout_until IS NOT NULL
                  AND lockout_until > $2
              )
            "#,
        )
        .bind(written_before)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to purge attempt records: {error}")))?;

        Ok(result.rows_affected())
    }
}
