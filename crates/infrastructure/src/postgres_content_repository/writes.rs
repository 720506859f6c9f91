use super::cast::replace_cast;
use super::*;

impl PostgresContentRepository {
    pub(super) async fn insert_impl(&self, content: &Content) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start content transaction: {error}"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO contents (
                id, title, quality, genre, category, age_restriction,
                description, thumbnail, publisher, release_year, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(content.id.as_uuid())
        .bind(content.title.as_str())
        .bind(content.quality.as_str())
        .bind(content.genre.as_str())
        .bind(content.category.as_str())
        .bind(content.age_restriction.as_str())
        .bind(content.description.as_deref())
        .bind(content.thumbnail.as_deref())
        .bind(content.publisher.as_deref())
        .bind(content.release_year)
        .bind(content.created_at)
        .bind(content.updated_at)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create content: {error}")))?;

        replace_cast(&mut transaction, content).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to commit content '{}': {error}",
                content.id
            ))
        })
    }

    pub(super) async fn save_impl(&self, content: &Content) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to start content transaction: {error}"))
        })?;

        let result = sqlx::query(
            r#"
            UPDATE contents
            SET title = $2,
                quality = $3,
                genre = $4,
                category = $5,
                age_restriction = $6,
                description = $7,
                thumbnail = $8,
                publisher = $9,
                release_year = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(content.id.as_uuid())
        .bind(content.title.as_str())
        .bind(content.quality.as_str())
        .bind(content.genre.as_str())
        .bind(content.category.as_str())
        .bind(content.age_restriction.as_str())
        .bind(content.description.as_deref())
        .bind(content.thumbnail.as_deref())
        .bind(content.publisher.as_deref())
        .bind(content.release_year)
        .bind(content.updated_at)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update content: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "content '{}' not found",
                content.id
            )));
        }

        replace_cast(&mut transaction, content).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to commit content '{}': {error}",
                content.id
            ))
        })
    }

    pub(super) async fn delete_impl(&self, content_id: ContentId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM contents
            WHERE id = $1
            "#,
        )
        .bind(content_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete content: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
