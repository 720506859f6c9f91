use chrono::{DateTime, Utc};
use movify_domain::{
    AgeRestriction, CastMember, Category, Content, ContentFilter, ContentPatch, Genre,
    NewCastMember, NewContent, Quality,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PageQuery;

/// Cast entry supplied on create or update.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMemberRequest {
    pub full_name: String,
    pub role_name: String,
}

impl From<CastMemberRequest> for NewCastMember {
    fn from(value: CastMemberRequest) -> Self {
        Self {
            full_name: value.full_name,
            role_name: value.role_name,
        }
    }
}

/// Incoming payload for content creation.
#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    pub title: String,
    pub quality: Quality,
    pub genre: Genre,
    pub category: Category,
    pub age_restriction: AgeRestriction,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    #[serde(default)]
    pub cast_members: Vec<CastMemberRequest>,
}

impl From<CreateContentRequest> for NewContent {
    fn from(value: CreateContentRequest) -> Self {
        Self {
            title: value.title,
            quality: value.quality,
            genre: value.genre,
            category: value.category,
            age_restriction: value.age_restriction,
            description: value.description,
            thumbnail: value.thumbnail,
            publisher: value.publisher,
            release_year: value.release_year,
            cast_members: value.cast_members.into_iter().map(NewCastMember::from).collect(),
        }
    }
}

/// Incoming payload for a partial content update; absent fields are kept.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub quality: Option<Quality>,
    pub genre: Option<Genre>,
    pub category: Option<Category>,
    pub age_restriction: Option<AgeRestriction>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    pub cast_members: Option<Vec<CastMemberRequest>>,
}

impl From<UpdateContentRequest> for ContentPatch {
    fn from(value: UpdateContentRequest) -> Self {
        Self {
            title: value.title,
            quality: value.quality,
            genre: value.genre,
            category: value.category,
            age_restriction: value.age_restriction,
            description: value.description,
            thumbnail: value.thumbnail,
            publisher: value.publisher,
            release_year: value.release_year,
            cast_members: value
                .cast_members
                .map(|members| members.into_iter().map(NewCastMember::from).collect()),
        }
    }
}

/// Search criteria plus paging.
#[derive(Debug, Default, Deserialize)]
pub struct SearchContentRequest {
    pub title: Option<String>,
    pub genre: Option<Genre>,
    pub age_restriction: Option<AgeRestriction>,
    #[serde(alias = "year")]
    pub release_year: Option<i32>,
    #[serde(flatten)]
    pub page: PageQuery,
}

impl SearchContentRequest {
    pub fn filter(&self) -> ContentFilter {
        ContentFilter {
            title: self.title.clone(),
            genre: self.genre,
            age_restriction: self.age_restriction,
            release_year: self.release_year,
        }
    }
}

/// API representation of a cast entry.
#[derive(Debug, Serialize)]
pub struct CastMemberResponse {
    pub id: Uuid,
    pub full_name: String,
    pub role_name: String,
}

impl From<CastMember> for CastMemberResponse {
    fn from(value: CastMember) -> Self {
        Self {
            id: value.id.as_uuid(),
            full_name: value.full_name,
            role_name: value.role_name,
        }
    }
}

/// API representation of a content item.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub id: Uuid,
    pub title: String,
    pub quality: Quality,
    pub genre: Genre,
    pub category: Category,
    pub age_restriction: AgeRestriction,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub publisher: Option<String>,
    pub release_year: Option<i32>,
    pub cast_members: Vec<CastMemberResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Content> for ContentResponse {
    fn from(value: Content) -> Self {
        Self {
            id: value.id.as_uuid(),
            title: value.title,
            quality: value.quality,
            genre: value.genre,
            category: value.category,
            age_restriction: value.age_restriction,
            description: value.description,
            thumbnail: value.thumbnail,
            publisher: value.publisher,
            release_year: value.release_year,
            cast_members: value
                .cast_members
                .into_iter()
                .map(CastMemberResponse::from)
                .collect(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
