use chrono::{DateTime, Utc};
use movify_domain::FavoriteEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub user_id: Uuid,
    pub content_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFavoriteRequest {
    pub user_id: Uuid,
    pub content_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct FavoriteEntryResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<FavoriteEntry> for FavoriteEntryResponse {
    fn from(value: FavoriteEntry) -> Self {
        Self {
            id: value.id.as_uuid(),
            user_id: value.user_id.as_uuid(),
            content_id: value.content_id.as_uuid(),
            created_at: value.created_at,
        }
    }
}
