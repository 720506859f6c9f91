//! PostgreSQL-backed content repository.
//!
//! Cast members live in their own table and are always written in the same
//! transaction as the owning content row.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use movify_application::ContentRepository;
use movify_core::{AppError, AppResult};
use movify_domain::{
    CastMember, CastMemberId, Content, ContentFilter, ContentId, Page, PageRequest,
};

mod cast;
mod search;
mod writes;


/// PostgreSQL implementation of the content repository port.
#[derive(Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CONTENT_COLUMNS: &str = "id, title, quality, genre, category, age_restriction, \
     description, thumbnail, publisher, release_year, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    id: uuid::Uuid,
    title: String,
    quality: String,
    genre: String,
    category: String,
    age_restriction: String,
    description: Option<String>,
    thumbnail: Option<String>,
    publisher: Option<String>,
    release_year: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CastMemberRow {
    id: uuid::Uuid,
    content_id: uuid::Uuid,
    full_name: String,
    role_name: String,
}

impl ContentRow {
    fn into_content(self, cast_members: Vec<CastMember>) -> AppResult<Content> {
        let corrupt = |column: &str, value: &str| {
            AppError::Internal(format!(
                "content '{}' has invalid {column} '{value}'",
                self.id
            ))
        };

        let quality = self
            .quality
            .parse()
            .map_err(|_| corrupt("quality", &self.quality))?;
        let genre = self
            .genre
            .parse()
            .map_err(|_| corrupt("genre", &self.genre))?;
        let category = self
            .category
            .parse()
            .map_err(|_| corrupt("category", &self.category))?;
        let age_restriction = self
            .age_restriction
            .parse()
            .map_err(|_| corrupt("age restriction", &self.age_restriction))?;

        Ok(Content {
            id: ContentId::from_uuid(self.id),
            title: self.title,
            quality,
            genre,
            category,
            age_restriction,
            description: self.description,
            thumbnail: self.thumbnail,
            publisher: self.publisher,
            release_year: self.release_year,
            cast_members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<CastMemberRow> for CastMember {
    fn from(row: CastMemberRow) -> Self {
        Self {
            id: CastMemberId::from_uuid(row.id),
            full_name: row.full_name,
            role_name: row.role_name,
        }
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn find(&self, content_id: ContentId) -> AppResult<Option<Content>> {
        let contents = self.find_many_impl(&[content_id]).await?;
        Ok(contents.into_iter().next())
    }

    async fn find_many(&self, content_ids: &[ContentId]) -> AppResult<Vec<Content>> {
        self.find_many_impl(content_ids).await
    }

    async fn insert(&self, content: &Content) -> AppResult<()> {
        self.insert_impl(content).await
    }

    async fn save(&self, content: &Content) -> AppResult<()> {
        self.save_impl(content).await
    }

    async fn delete(&self, content_id: ContentId) -> AppResult<bool> {
        self.delete_impl(content_id).await
    }

    async fn search(&self, filter: &ContentFilter, page: PageRequest) -> AppResult<Page<Content>> {
        self.search_impl(filter, page).await
    }
}

impl PostgresContentRepository {
    async fn find_many_impl(&self, content_ids: &[ContentId]) -> AppResult<Vec<Content>> {
        if content_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<uuid::Uuid> = content_ids.iter().map(ContentId::as_uuid).collect();
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents WHERE id = ANY($1)"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load contents: {error}")))?;

        let mut by_id: HashMap<uuid::Uuid, Content> = self
            .assemble(rows)
            .await?
            .into_iter()
            .map(|content| (content.id.as_uuid(), content))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Attaches cast lists to content rows, keeping row order.
    async fn assemble(&self, rows: Vec<ContentRow>) -> AppResult<Vec<Content>> {
        let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
        let mut casts = self.load_cast(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let cast_members = casts.remove(&row.id).unwrap_or_default();
                row.into_content(cast_members)
            })
            .collect()
    }
}
