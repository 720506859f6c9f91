//! Personal favorite list ports and application service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use movify_core::{AppError, AppResult};
use movify_domain::{Content, ContentId, FavoriteEntry, FavoriteEntryId, UserId, UserLookup};

use crate::{Clock, ContentRepository, UserRepository};


// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Repository port for personal list entries.
#[async_trait]
pub trait PersonalListRepository: Send + Sync {
    /// Finds an entry by identifier.
    async fn find(&self, entry_id: FavoriteEntryId) -> AppResult<Option<FavoriteEntry>>;

    /// Finds the entry saving `content_id` for `user_id`.
    async fn find_by_pair(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> AppResult<Option<FavoriteEntry>>;

    /// Inserts an entry. A duplicate pair is a conflict.
    async fn insert(&self, entry: &FavoriteEntry) -> AppResult<()>;

    /// Deletes an entry. Returns whether one existed.
    async fn delete(&self, entry_id: FavoriteEntryId) -> AppResult<bool>;

    /// Lists a user's entries, newest first.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<FavoriteEntry>>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for users' favorite lists.
#[derive(Clone)]
pub struct PersonalListService {
    repository: Arc<dyn PersonalListRepository>,
    user_repository: Arc<dyn UserRepository>,
    content_repository: Arc<dyn ContentRepository>,
    clock: Arc<dyn Clock>,
}

impl PersonalListService {
    /// Creates a new personal list service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn PersonalListRepository>,
        user_repository: Arc<dyn UserRepository>,
        content_repository: Arc<dyn ContentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            user_repository,
            content_repository,
            clock,
        }
    }

    /// Saves a content item to a user's list. Saving twice returns the
    /// existing entry.
    pub async fn add(&self, user_id: UserId, content_id: ContentId) -> AppResult<FavoriteEntry> {
        self.require_user(user_id).await?;
        if self.content_repository.find(content_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "content '{content_id}' does not exist"
            )));
        }

        if let Some(existing) = self.repository.find_by_pair(user_id, content_id).await? {
            return Ok(existing);
        }

        let entry = FavoriteEntry::new(user_id, content_id, self.clock.now());
        match self.repository.insert(&entry).await {
            Ok(()) => {
                info!(user_id = %user_id, content_id = %content_id, "content added to personal list");
                Ok(entry)
            }
            Err(AppError::Conflict(_)) => self
                .repository
                .find_by_pair(user_id, content_id)
                .await?
                .ok_or_else(|| {
                    AppError::Conflict("personal list entry changed concurrently".to_owned())
                }),
            Err(error) => Err(error),
        }
    }

    /// Removes an entry by identifier.
    pub async fn remove(&self, entry_id: FavoriteEntryId) -> AppResult<()> {
        if !self.repository.delete(entry_id).await? {
            return Err(AppError::NotFound(format!(
                "personal list entry '{entry_id}' does not exist"
            )));
        }

        Ok(())
    }

    /// Removes `content_id` from a user's list.
    pub async fn remove_by_pair(&self, user_id: UserId, content_id: ContentId) -> AppResult<()> {
        let entry = self
            .repository
            .find_by_pair(user_id, content_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "content '{content_id}' is not in the personal list of user '{user_id}'"
                ))
            })?;

        self.remove(entry.id).await
    }

    /// Returns the owner of an entry.
    pub async fn owner_of(&self, entry_id: FavoriteEntryId) -> AppResult<UserId> {
        self.repository
            .find(entry_id)
            .await?
            .map(|entry| entry.user_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("personal list entry '{entry_id}' does not exist"))
            })
    }

    /// Returns a user's saved content items, newest first.
    pub async fn favorites(&self, user_id: UserId) -> AppResult<Vec<Content>> {
        self.require_user(user_id).await?;

        let content_ids: Vec<ContentId> = self
            .repository
            .list_for_user(user_id)
            .await?
            .into_iter()
            .map(|entry| entry.content_id)
            .collect();

        self.content_repository.find_many(&content_ids).await
    }

    async fn require_user(&self, user_id: UserId) -> AppResult<()> {
        if self
            .user_repository
            .find(&UserLookup::Id(user_id))
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }

        Ok(())
    }
}
