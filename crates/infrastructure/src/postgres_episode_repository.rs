//! PostgreSQL-backed episode repository.

use async_trait::async_trait;
use sqlx::PgPool;

use movify_application::EpisodeRepository;
use movify_core::{AppError, AppResult};
use movify_domain::{ContentId, Episode, EpisodeId};


/// PostgreSQL implementation of the episode repository port.
#[derive(Clone)]
pub struct PostgresEpisodeRepository {
    pool: PgPool,
}

impl PostgresEpisodeRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EpisodeRow {
    id: uuid::Uuid,
    content_id: uuid::Uuid,
    title: Option<String>,
    storyline: Option<String>,
    status: String,
    video_url: Option<String>,
    episode_number: Option<i32>,
    season_number: Option<i32>,
}

impl TryFrom<EpisodeRow> for Episode {
    type Error = AppError;

    fn try_from(row: EpisodeRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            AppError::Internal(format!(
                "episode '{}' has invalid status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(Self {
            id: EpisodeId::from_uuid(row.id),
            content_id: ContentId::from_uuid(row.content_id),
            title: row.title,
            storyline: row.storyline,
            status,
            video_url: row.video_url,
            episode_number: row.episode_number,
            season_number: row.season_number,
        })
    }
}

fn missing_content_or_internal(error: sqlx::Error, episode: &Episode) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23503")
    {
        return AppError::NotFound(format!("content '{}' not found", episode.content_id));
    }

    AppError::Internal(format!("failed to store episode '{}': {error}", episode.id))
}

#[async_trait]
impl EpisodeRepository for PostgresEpisodeRepository {
    async fn find(&self, episode_id: EpisodeId) -> AppResult<Option<Episode>> {
        let row = sqlx::query_as::<_, EpisodeRow>(
            r#"
            SELECT id, content_id, title, storyline, status, video_url,
                   episode_number, season_number
            FROM episodes
            WHERE id = $1
            "#,
        )
        .bind(episode_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load episode: {error}")))?;

        row.map(Episode::try_from).transpose()
    }

    async fn insert(&self, episode: &Episode) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO episodes (
                id, content_id, title, storyline, status, video_url,
                episode_number, season_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(episode.id.as_uuid())
        .bind(episode.content_id.as_uuid())
        .bind(episode.title.as_deref())
        .bind(episode.storyline.as_deref())
        .bind(episode.status.as_str())
        .bind(episode.video_url.as_deref())
        .bind(episode.episode_number)
        .bind(episode.season_number)
        .execute(&self.pool)
        .await
        .map_err(|error| missing_content_or_internal(error, episode))?;

        Ok(())
    }

    async fn save(&self, episode: &Episode) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE episodes
            SET title = $2,
                storyline = $3,
                status = $4,
                video_url = $5,
                episode_number = $6,
                season_number = $7
            WHERE id = $1
            "#,
        )
        .bind(episode.id.as_uuid())
        .bind(episode.title.as_deref())
        .bind(episode.storyline.as_deref())
        .bind(episode.status.as_str())
        .bind(episode.video_url.as_deref())
        .bind(episode.episode_number)
        .bind(episode.season_number)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update episode: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "episode '{}' not found",
                episode.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, episode_id: EpisodeId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM episodes
            WHERE id = $1
            "#,
        )
        .bind(episode_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete episode: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_content(&self, content_id: ContentId) -> AppResult<Vec<Episode>> {
        let rows = sqlx::query_as::<_, EpisodeRow>(
            r#"
            SELECT id, content_id, title, storyline, status, video_url,
                   episode_number, season_number
            FROM episodes
            WHERE content_id = $1
            ORDER BY season_number NULLS LAST, episode_number NULLS LAST, id
            "#,
        )
        .bind(content_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list episodes: {error}")))?;

        rows.into_iter().map(Episode::try_from).collect()
    }
}
