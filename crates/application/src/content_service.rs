//! Catalog content ports and application service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use movify_core::{AppError, AppResult};
use movify_domain::{
    Content, ContentFilter, ContentId, ContentPatch, Episode, NewContent, Page, PageRequest,
};

use crate::{Clock, EpisodeRepository};


// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Repository port for content items and their cast.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Finds a content item with its cast.
    async fn find(&self, content_id: ContentId) -> AppResult<Option<Content>>;

    /// Finds several content items, preserving the order of `content_ids`
    /// and skipping unknown ones.
    async fn find_many(&self, content_ids: &[ContentId]) -> AppResult<Vec<Content>>;

    /// Inserts a content item with its cast.
    async fn insert(&self, content: &Content) -> AppResult<()>;

    /// Overwrites a content item, replacing its cast.
    async fn save(&self, content: &Content) -> AppResult<()>;

    /// Deletes a content item with its episodes, cast and list entries.
    /// Returns whether one existed.
    async fn delete(&self, content_id: ContentId) -> AppResult<bool>;

    /// Returns one page of items matching `filter`, ordered by title then id.
    async fn search(&self, filter: &ContentFilter, page: PageRequest) -> AppResult<Page<Content>>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for catalog content.
#[derive(Clone)]
pub struct ContentService {
    repository: Arc<dyn ContentRepository>,
    episode_repository: Arc<dyn EpisodeRepository>,
    clock: Arc<dyn Clock>,
}

impl ContentService {
    /// Creates a new content service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        episode_repository: Arc<dyn EpisodeRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            episode_repository,
            clock,
        }
    }

    /// Creates a content item.
    pub async fn create(&self, input: NewContent) -> AppResult<Content> {
        let content = Content::create(input, self.clock.now())?;
        self.repository.insert(&content).await?;

        info!(content_id = %content.id, title = %content.title, "content created");
        Ok(content)
    }

    /// Returns a content item.
    pub async fn get(&self, content_id: ContentId) -> AppResult<Content> {
        self.repository
            .find(content_id)
            .await?
            .ok_or_else(|| not_found(content_id))
    }

    /// Returns one page of the whole catalog.
    pub async fn list(&self, page: PageRequest) -> AppResult<Page<Content>> {
        self.repository
            .search(&ContentFilter::default(), page)
            .await
    }

    /// Returns one page of items matching every present criterion.
    pub async fn search(&self, filter: ContentFilter, page: PageRequest) -> AppResult<Page<Content>> {
        self.repository.search(&filter, page).await
    }

    /// Applies a partial update to a content item.
    pub async fn update(&self, content_id: ContentId, patch: ContentPatch) -> AppResult<Content> {
        let mut content = self.get(content_id).await?;
        content.apply_patch(patch, self.clock.now())?;
        self.repository.save(&content).await?;

        Ok(content)
    }

    /// Points a content item at a new cover image.
    pub async fn set_thumbnail(&self, content_id: ContentId, url: String) -> AppResult<Content> {
        if url.trim().is_empty() {
            return Err(AppError::Validation(
                "thumbnail url must not be empty".to_owned(),
            ));
        }

        self.update(
            content_id,
            ContentPatch {
                thumbnail: Some(url),
                ..ContentPatch::default()
            },
        )
        .await
    }

    /// Deletes a content item.
    pub async fn delete(&self, content_id: ContentId) -> AppResult<()> {
        if !self.repository.delete(content_id).await? {
            return Err(not_found(content_id));
        }

        info!(content_id = %content_id, "content deleted");
        Ok(())
    }

    /// Returns the episodes of a content item, by season then episode number.
    pub async fn episodes(&self, content_id: ContentId) -> AppResult<Vec<Episode>> {
        self.get(content_id).await?;
        self.episode_repository.list_for_content(content_id).await
    }
}

fn not_found(content_id: ContentId) -> AppError {
    AppError::NotFound(format!("content '{content_id}' does not exist"))
}
