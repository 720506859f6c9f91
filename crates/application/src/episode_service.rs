//! Episode ports and application service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use movify_core::{AppError, AppResult};
use movify_domain::{ContentId, Episode, EpisodeId, EpisodePatch, EpisodeStatus, NewEpisode};

use crate::ContentRepository;


// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Repository port for episodes.
#[async_trait]
pub trait EpisodeRepository: Send + Sync {
    /// Finds an episode.
    async fn find(&self, episode_id: EpisodeId) -> AppResult<Option<Episode>>;

    /// Inserts an episode.
    async fn insert(&self, episode: &Episode) -> AppResult<()>;

    /// Overwrites an episode.
    async fn save(&self, episode: &Episode) -> AppResult<()>;

    /// Deletes an episode. Returns whether one existed.
    async fn delete(&self, episode_id: EpisodeId) -> AppResult<bool>;

    /// Lists episodes of a content item by season then episode number.
    async fn list_for_content(&self, content_id: ContentId) -> AppResult<Vec<Episode>>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for episodes.
#[derive(Clone)]
pub struct EpisodeService {
    repository: Arc<dyn EpisodeRepository>,
    content_repository: Arc<dyn ContentRepository>,
}

impl EpisodeService {
    /// Creates a new episode service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn EpisodeRepository>,
        content_repository: Arc<dyn ContentRepository>,
    ) -> Self {
        Self {
            repository,
            content_repository,
        }
    }

    /// Creates an episode under an existing content item.
    pub async fn create(&self, content_id: ContentId, input: NewEpisode) -> AppResult<Episode> {
        self.require_content(content_id).await?;

        let episode = Episode::create(content_id, input)?;
        self.repository.insert(&episode).await?;

        info!(episode_id = %episode.id, content_id = %content_id, "episode created");
        Ok(episode)
    }

    /// Returns an episode.
    pub async fn get(&self, episode_id: EpisodeId) -> AppResult<Episode> {
        self.repository
            .find(episode_id)
            .await?
            .ok_or_else(|| not_found(episode_id))
    }

    /// Applies a partial update to an episode.
    pub async fn update(&self, episode_id: EpisodeId, patch: EpisodePatch) -> AppResult<Episode> {
        let mut episode = self.get(episode_id).await?;
        episode.apply_patch(patch)?;
        self.repository.save(&episode).await?;

        Ok(episode)
    }

    /// Records where an episode's video lives and its processing state.
    pub async fn set_video(
        &self,
        episode_id: EpisodeId,
        url: String,
        status: EpisodeStatus,
    ) -> AppResult<Episode> {
        if url.trim().is_empty() {
            return Err(AppError::Validation("video url must not be empty".to_owned()));
        }

        let episode = self
            .update(
                episode_id,
                EpisodePatch {
                    video_url: Some(url),
                    status: Some(status),
                    ..EpisodePatch::default()
                },
            )
            .await?;

        info!(episode_id = %episode_id, status = status.as_str(), "episode video updated");
        Ok(episode)
    }

    /// Deletes an episode.
    pub async fn delete(&self, episode_id: EpisodeId) -> AppResult<()> {
        if !self.repository.delete(episode_id).await? {
            return Err(not_found(episode_id));
        }

        Ok(())
    }

    /// Lists the episodes of a content item.
    pub async fn list_for_content(&self, content_id: ContentId) -> AppResult<Vec<Episode>> {
        self.require_content(content_id).await?;
        self.repository.list_for_content(content_id).await
    }

    async fn require_content(&self, content_id: ContentId) -> AppResult<()> {
        if self.content_repository.find(content_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "content '{content_id}' does not exist"
            )));
        }

        Ok(())
    }
}

fn not_found(episode_id: EpisodeId) -> AppError {
    AppError::NotFound(format!("episode '{episode_id}' does not exist"))
}
