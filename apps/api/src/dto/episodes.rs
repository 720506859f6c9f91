use movify_domain::{Episode, EpisodePatch, EpisodeStatus, NewEpisode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query string for listing a content item's episodes.
#[derive(Debug, Deserialize)]
pub struct EpisodeListQuery {
    pub content_id: Uuid,
}

/// Incoming payload for episode creation.
#[derive(Debug, Deserialize)]
pub struct CreateEpisodeRequest {
    pub content_id: Uuid,
    pub title: Option<String>,
    pub storyline: Option<String>,
    pub status: Option<EpisodeStatus>,
    pub video_url: Option<String>,
    pub episode_number: Option<i32>,
    pub season_number: Option<i32>,
}

impl CreateEpisodeRequest {
    pub fn into_new_episode(self) -> NewEpisode {
        NewEpisode {
            title: self.title,
            storyline: self.storyline,
            status: self.status,
            video_url: self.video_url,
            episode_number: self.episode_number,
            season_number: self.season_number,
        }
    }
}

/// Incoming payload for a partial episode update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEpisodeRequest {
    pub title: Option<String>,
    pub storyline: Option<String>,
    pub status: Option<EpisodeStatus>,
    pub video_url: Option<String>,
    pub episode_number: Option<i32>,
    pub season_number: Option<i32>,
}

impl From<UpdateEpisodeRequest> for EpisodePatch {
    fn from(value: UpdateEpisodeRequest) -> Self {
        Self {
            title: value.title,
            storyline: value.storyline,
            status: value.status,
            video_url: value.video_url,
            episode_number: value.episode_number,
            season_number: value.season_number,
        }
    }
}

/// API representation of an episode.
#[derive(Debug, Serialize)]
pub struct EpisodeResponse {
    pub id: Uuid,
    pub content_id: Uuid,
    pub title: Option<String>,
    pub storyline: Option<String>,
    pub status: EpisodeStatus,
    pub video_url: Option<String>,
    pub episode_number: Option<i32>,
    pub season_number: Option<i32>,
}

impl From<Episode> for EpisodeResponse {
    fn from(value: Episode) -> Self {
        Self {
            id: value.id.as_uuid(),
            content_id: value.content_id.as_uuid(),
            title: value.title,
            storyline: value.storyline,
            status: value.status,
            video_url: value.video_url,
            episode_number: value.episode_number,
            season_number: value.season_number,
        }
    }
}
