use chrono::{DateTime, Utc};

use crate::ids::{ContentId, FavoriteEntryId, UserId};

/// Content item saved to a user's personal list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    /// Entry identifier.
    pub id: FavoriteEntryId,
    /// Owner of the list.
    pub user_id: UserId,
    /// Saved content item.
    pub content_id: ContentId,
    /// Time the item was saved.
    pub created_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Creates a new list entry.
    #[must_use]
    pub fn new(user_id: UserId, content_id: ContentId, now: DateTime<Utc>) -> Self {
        Self {
            id: FavoriteEntryId::new(),
            user_id,
            content_id,
            created_at: now,
        }
    }
}
