//! Catalog content items and their classification enums.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use movify_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::ids::{CastMemberId, ContentId};

/// Earliest accepted release year.
pub const RELEASE_YEAR_MIN: i32 = 1888;

/// Latest accepted release year.
pub const RELEASE_YEAR_MAX: i32 = 2200;

/// Video resolution of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    /// 144 lines.
    P144,
    /// 240 lines.
    P240,
    /// 360 lines.
    P360,
    /// 480 lines.
    P480,
    /// 720 lines.
    P720,
    /// 1080 lines.
    P1080,
    /// 1440 lines.
    P1440,
    /// 2160 lines.
    P2160,
}

impl Quality {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P144 => "144P",
            Self::P240 => "240P",
            Self::P360 => "360P",
            Self::P480 => "480P",
            Self::P720 => "720P",
            Self::P1080 => "1080P",
            Self::P1440 => "1440P",
            Self::P2160 => "2160P",
        }
    }
}

impl FromStr for Quality {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "144P" => Ok(Self::P144),
            "240P" => Ok(Self::P240),
            "360P" => Ok(Self::P360),
            "480P" => Ok(Self::P480),
            "720P" => Ok(Self::P720),
            "1080P" => Ok(Self::P1080),
            "1440P" => Ok(Self::P1440),
            "2160P" => Ok(Self::P2160),
            _ => Err(AppError::Validation(format!("unknown quality '{value}'"))),
        }
    }
}

/// Genre of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    /// Action film.
    ActionFilm,
    /// Blockbuster.
    Blockbuster,
    /// Cartoon.
    Cartoon,
    /// Comedy.
    Comedy,
    /// Documentary.
    Documentary,
    /// Historical film.
    HistoricalFilm,
    /// Horror film.
    HorrorFilm,
    /// Musical.
    Musical,
    /// Drama.
    Drama,
    /// Thriller.
    Thriller,
}

impl Genre {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionFilm => "ACTION_FILM",
            Self::Blockbuster => "BLOCKBUSTER",
            Self::Cartoon => "CARTOON",
            Self::Comedy => "COMEDY",
            Self::Documentary => "DOCUMENTARY",
            Self::HistoricalFilm => "HISTORICAL_FILM",
            Self::HorrorFilm => "HORROR_FILM",
            Self::Musical => "MUSICAL",
            Self::Drama => "DRAMA",
            Self::Thriller => "THRILLER",
        }
    }
}

impl FromStr for Genre {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTION_FILM" => Ok(Self::ActionFilm),
            "BLOCKBUSTER" => Ok(Self::Blockbuster),
            "CARTOON" => Ok(Self::Cartoon),
            "COMEDY" => Ok(Self::Comedy),
            "DOCUMENTARY" => Ok(Self::Documentary),
            "HISTORICAL_FILM" => Ok(Self::HistoricalFilm),
            "HORROR_FILM" => Ok(Self::HorrorFilm),
            "MUSICAL" => Ok(Self::Musical),
            "DRAMA" => Ok(Self::Drama),
            "THRILLER" => Ok(Self::Thriller),
            _ => Err(AppError::Validation(format!("unknown genre '{value}'"))),
        }
    }
}

/// Format category of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Feature film.
    Movie,
    /// Episodic series.
    Series,
    /// Animated feature.
    AnimatedFilm,
    /// Animated series.
    AnimatedSeries,
}

impl Category {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::Series => "SERIES",
            Self::AnimatedFilm => "ANIMATED_FILM",
            Self::AnimatedSeries => "ANIMATED_SERIES",
        }
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "MOVIE" => Ok(Self::Movie),
            "SERIES" => Ok(Self::Series),
            "ANIMATED_FILM" => Ok(Self::AnimatedFilm),
            "ANIMATED_SERIES" => Ok(Self::AnimatedSeries),
            _ => Err(AppError::Validation(format!("unknown category '{value}'"))),
        }
    }
}

/// Minimum viewer age for a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeRestriction {
    /// 6 and older.
    SixPlus,
    /// 12 and older.
    TwelvePlus,
    /// 16 and older.
    SixteenPlus,
    /// 18 and older.
    EighteenPlus,
}

impl AgeRestriction {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SixPlus => "6+",
            Self::TwelvePlus => "12+",
            Self::SixteenPlus => "16+",
            Self::EighteenPlus => "18+",
        }
    }
}

impl FromStr for AgeRestriction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "6+" => Ok(Self::SixPlus),
            "12+" => Ok(Self::TwelvePlus),
            "16+" => Ok(Self::SixteenPlus),
            "18+" => Ok(Self::EighteenPlus),
            _ => Err(AppError::Validation(format!(
                "unknown age restriction '{value}'"
            ))),
        }
    }
}

/// Person credited on a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// Credit identifier.
    pub id: CastMemberId,
    /// Person's full name.
    pub full_name: String,
    /// Role played or performed.
    pub role_name: String,
}

/// Cast credit supplied on create or replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCastMember {
    /// Person's full name.
    pub full_name: String,
    /// Role played or performed.
    pub role_name: String,
}

impl NewCastMember {
    fn into_cast_member(self) -> AppResult<CastMember> {
        let full_name = NonEmptyString::new(self.full_name)?;
        let role_name = NonEmptyString::new(self.role_name)?;

        Ok(CastMember {
            id: CastMemberId::new(),
            full_name: full_name.as_str().trim().to_owned(),
            role_name: role_name.as_str().trim().to_owned(),
        })
    }
}

/// Movie or series in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Content identifier.
    pub id: ContentId,
    /// Display title.
    pub title: String,
    /// Video resolution.
    pub quality: Quality,
    /// Genre.
    pub genre: Genre,
    /// Format category.
    pub category: Category,
    /// Minimum viewer age.
    pub age_restriction: AgeRestriction,
    /// Synopsis.
    pub description: Option<String>,
    /// Cover image URL.
    pub thumbnail: Option<String>,
    /// Publisher or studio.
    pub publisher: Option<String>,
    /// Year of first release.
    pub release_year: Option<i32>,
    /// Credited cast.
    pub cast_members: Vec<CastMember>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    /// Display title.
    pub title: String,
    /// Video resolution.
    pub quality: Quality,
    /// Genre.
    pub genre: Genre,
    /// Format category.
    pub category: Category,
    /// Minimum viewer age.
    pub age_restriction: AgeRestriction,
    /// Synopsis.
    pub description: Option<String>,
    /// Cover image URL.
    pub thumbnail: Option<String>,
    /// Publisher or studio.
    pub publisher: Option<String>,
    /// Year of first release.
    pub release_year: Option<i32>,
    /// Credited cast.
    pub cast_members: Vec<NewCastMember>,
}

/// Partial update; `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPatch {
    /// New title.
    pub title: Option<String>,
    /// New resolution.
    pub quality: Option<Quality>,
    /// New genre.
    pub genre: Option<Genre>,
    /// New category.
    pub category: Option<Category>,
    /// New age restriction.
    pub age_restriction: Option<AgeRestriction>,
    /// New synopsis.
    pub description: Option<String>,
    /// New cover image URL.
    pub thumbnail: Option<String>,
    /// New publisher.
    pub publisher: Option<String>,
    /// New release year.
    pub release_year: Option<i32>,
    /// Replacement cast list.
    pub cast_members: Option<Vec<NewCastMember>>,
}

impl Content {
    /// Builds a new content item from validated input.
    pub fn create(input: NewContent, now: DateTime<Utc>) -> AppResult<Self> {
        let title = validate_title(input.title)?;
        if let Some(year) = input.release_year {
            validate_release_year(year)?;
        }

        let cast_members = input
            .cast_members
            .into_iter()
            .map(NewCastMember::into_cast_member)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            id: ContentId::new(),
            title,
            quality: input.quality,
            genre: input.genre,
            category: input.category,
            age_restriction: input.age_restriction,
            description: input.description,
            thumbnail: input.thumbnail,
            publisher: input.publisher,
            release_year: input.release_year,
            cast_members,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges non-empty patch fields into this item.
    pub fn apply_patch(&mut self, patch: ContentPatch, now: DateTime<Utc>) -> AppResult<()> {
        // Validate before mutating so a rejected patch leaves the item intact.
        let title = patch.title.map(validate_title).transpose()?;
        if let Some(year) = patch.release_year {
            validate_release_year(year)?;
        }
        let cast_members = patch
            .cast_members
            .map(|members| {
                members
                    .into_iter()
                    .map(NewCastMember::into_cast_member)
                    .collect::<AppResult<Vec<_>>>()
            })
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(quality) = patch.quality {
            self.quality = quality;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(age_restriction) = patch.age_restriction {
            self.age_restriction = age_restriction;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.thumbnail.is_some() {
            self.thumbnail = patch.thumbnail;
        }
        if patch.publisher.is_some() {
            self.publisher = patch.publisher;
        }
        if patch.release_year.is_some() {
            self.release_year = patch.release_year;
        }
        if let Some(cast_members) = cast_members {
            self.cast_members = cast_members;
        }

        self.updated_at = now;
        Ok(())
    }
}

/// Search criteria combined with AND; absent criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFilter {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Exact genre.
    pub genre: Option<Genre>,
    /// Exact age restriction.
    pub age_restriction: Option<AgeRestriction>,
    /// Exact release year.
    pub release_year: Option<i32>,
}

impl ContentFilter {
    /// Returns the trimmed title fragment, ignoring blank input.
    #[must_use]
    pub fn title_fragment(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
    }

    /// Returns whether `content` satisfies every present criterion.
    #[must_use]
    pub fn matches(&self, content: &Content) -> bool {
        let title_matches = self.title_fragment().is_none_or(|fragment| {
            content
                .title
                .to_lowercase()
                .contains(&fragment.to_lowercase())
        });

        title_matches
            && self.genre.is_none_or(|genre| content.genre == genre)
            && self
                .age_restriction
                .is_none_or(|age_restriction| content.age_restriction == age_restriction)
            && self
                .release_year
                .is_none_or(|year| content.release_year == Some(year))
    }
}

fn validate_title(title: String) -> AppResult<String> {
    let title = NonEmptyString::new(title)
        .map_err(|_| AppError::Validation("content title must not be empty".to_owned()))?;
    Ok(title.as_str().trim().to_owned())
}

fn validate_release_year(year: i32) -> AppResult<()> {
    if !(RELEASE_YEAR_MIN..=RELEASE_YEAR_MAX).contains(&year) {
        return Err(AppError::Validation(format!(
            "release year must be between {RELEASE_YEAR_MIN} and {RELEASE_YEAR_MAX}"
        )));
    }

    Ok(())
}
