//! PostgreSQL-backed personal list repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use movify_application::PersonalListRepository;
use movify_core::{AppError, AppResult};
use movify_domain::{ContentId, FavoriteEntry, FavoriteEntryId, UserId};

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the personal list repository port.
#[derive(Clone)]
pub struct PostgresPersonalListRepository {
    pool: PgPool,
}

impl PostgresPersonalListRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FavoriteEntryRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    content_id: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl From<FavoriteEntryRow> for FavoriteEntry {
    fn from(row: FavoriteEntryRow) -> Self {
        Self {
            id: FavoriteEntryId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            content_id: ContentId::from_uuid(row.content_id),
            created_at: row.created_at,
        }
    }
}

fn entry_write_error(error: sqlx::Error, entry: &FavoriteEntry) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error {
        match database_error.code().as_deref() {
            Some("23505") => {
                return AppError::Conflict(format!(
                    "content '{}' is already in the personal list of user '{}'",
                    entry.content_id, entry.user_id
                ));
            }
            Some("23503") => {
                return AppError::NotFound(format!(
                    "user '{}' or content '{}' not found",
                    entry.user_id, entry.content_id
                ));
            }
            _ => {}
        }
    }

    AppError::Internal(format!("failed to add personal list entry: {error}"))
}

#[async_trait]
impl PersonalListRepository for PostgresPersonalListRepository {
    async fn find(&self, entry_id: FavoriteEntryId) -> AppResult<Option<FavoriteEntry>> {
        let row = sqlx::query_as::<_, FavoriteEntryRow>(
            r#"
            SELECT id, user_id, content_id, created_at
            FROM personal_list_entries
            WHERE id = $1
            "#,
        )
        .bind(entry_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load personal list entry: {error}"))
        })?;

        Ok(row.map(FavoriteEntry::from))
    }

    async fn find_by_pair(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> AppResult<Option<FavoriteEntry>> {
        let row = sqlx::query_as::<_, FavoriteEntryRow>(
            r#"
            SELECT id, user_id, content_id, created_at
            FROM personal_list_entries
            WHERE user_id = $1 AND content_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(content_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load personal list entry: {error}"))
        })?;

        Ok(row.map(FavoriteEntry::from))
    }

    async fn insert(&self, entry: &FavoriteEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO personal_list_entries (id, user_id, content_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_uuid())
        .bind(entry.content_id.as_uuid())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|error| entry_write_error(error, entry))?;

        Ok(())
    }

    async fn delete(&self, entry_id: FavoriteEntryId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM personal_list_entries
            WHERE id = $1
            "#,
        )
        .bind(entry_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete personal list entry: {error}"))
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<FavoriteEntry>> {
        let rows = sqlx::query_as::<_, FavoriteEntryRow>(
            r#"
            SELECT id, user_id, content_id, created_at
            FROM personal_list_entries
            WHERE user_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list personal list entries: {error}"))
        })?;

        Ok(rows.into_iter().map(FavoriteEntry::from).collect())
    }
}
