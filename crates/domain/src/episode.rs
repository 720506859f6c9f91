use std::str::FromStr;

use movify_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::ids::{ContentId, EpisodeId};

/// Upload state of an episode's video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EpisodeStatus {
    /// No video has been uploaded yet.
    #[default]
    NotUploaded,
    /// Video is being processed by the media pipeline.
    Processing,
    /// Video is available.
    Uploaded,
    /// Processing failed.
    Error,
}

impl EpisodeStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotUploaded => "NOT_UPLOADED",
            Self::Processing => "PROCESSING",
            Self::Uploaded => "UPLOADED",
            Self::Error => "ERROR",
        }
    }
}

impl FromStr for EpisodeStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "NOT_UPLOADED" => Ok(Self::NotUploaded),
            "PROCESSING" => Ok(Self::Processing),
            "UPLOADED" => Ok(Self::Uploaded),
            "ERROR" => Ok(Self::Error),
            _ => Err(AppError::Validation(format!(
                "unknown episode status '{value}'"
            ))),
        }
    }
}

/// Single episode of a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Episode identifier.
    pub id: EpisodeId,
    /// Owning content item.
    pub content_id: ContentId,
    /// Episode title.
    pub title: Option<String>,
    /// Plot summary.
    pub storyline: Option<String>,
    /// Video upload state.
    pub status: EpisodeStatus,
    /// Object store location of the video.
    pub video_url: Option<String>,
    /// One-based episode number within the season.
    pub episode_number: Option<i32>,
    /// One-based season number.
    pub season_number: Option<i32>,
}

/// Input for creating an episode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEpisode {
    /// Episode title.
    pub title: Option<String>,
    /// Plot summary.
    pub storyline: Option<String>,
    /// Initial upload state, `NotUploaded` when absent.
    pub status: Option<EpisodeStatus>,
    /// Object store location of the video.
    pub video_url: Option<String>,
    /// Episode number.
    pub episode_number: Option<i32>,
    /// Season number.
    pub season_number: Option<i32>,
}

/// Partial update; `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodePatch {
    /// New title.
    pub title: Option<String>,
    /// New plot summary.
    pub storyline: Option<String>,
    /// New upload state.
    pub status: Option<EpisodeStatus>,
    /// New video location.
    pub video_url: Option<String>,
    /// New episode number.
    pub episode_number: Option<i32>,
    /// New season number.
    pub season_number: Option<i32>,
}

impl Episode {
    /// Builds an episode attached to `content_id`.
    pub fn create(content_id: ContentId, input: NewEpisode) -> AppResult<Self> {
        validate_ordinal("episode number", input.episode_number)?;
        validate_ordinal("season number", input.season_number)?;

        Ok(Self {
            id: EpisodeId::new(),
            content_id,
            title: input.title,
            storyline: input.storyline,
            status: input.status.unwrap_or_default(),
            video_url: input.video_url,
            episode_number: input.episode_number,
            season_number: input.season_number,
        })
    }

    /// Merges present patch fields into this episode.
    pub fn apply_patch(&mut self, patch: EpisodePatch) -> AppResult<()> {
        validate_ordinal("episode number", patch.episode_number)?;
        validate_ordinal("season number", patch.season_number)?;

        if patch.title.is_some() {
            self.title = patch.title;
        }
        if patch.storyline.is_some() {
            self.storyline = patch.storyline;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if patch.video_url.is_some() {
            self.video_url = patch.video_url;
        }
        if patch.episode_number.is_some() {
            self.episode_number = patch.episode_number;
        }
        if patch.season_number.is_some() {
            self.season_number = patch.season_number;
        }

        Ok(())
    }
}

fn validate_ordinal(label: &str, value: Option<i32>) -> AppResult<()> {
    match value {
        Some(number) if number < 1 => Err(AppError::Validation(format!(
            "{label} must be at least 1"
        ))),
        _ => Ok(()),
    }
}
