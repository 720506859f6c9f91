use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use movify_domain::{ContentId, EpisodeId};
use uuid::Uuid;

use crate::dto::{CreateEpisodeRequest, EpisodeListQuery, EpisodeResponse, UpdateEpisodeRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_episodes_handler(
    State(state): State<AppState>,
    Query(query): Query<EpisodeListQuery>,
) -> ApiResult<Json<Vec<EpisodeResponse>>> {
    let episodes = state
        .episode_service
        .list_for_content(ContentId::from_uuid(query.content_id))
        .await?
        .into_iter()
        .map(EpisodeResponse::from)
        .collect();
    Ok(Json(episodes))
}

pub async fn get_episode_handler(
    State(state): State<AppState>,
    Path(episode_id): Path<Uuid>,
) -> ApiResult<Json<EpisodeResponse>> {
    let episode = state
        .episode_service
        .get(EpisodeId::from_uuid(episode_id))
        .await?;
    Ok(Json(EpisodeResponse::from(episode)))
}

pub async fn create_episode_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateEpisodeRequest>,
) -> ApiResult<(StatusCode, Json<EpisodeResponse>)> {
    let content_id = ContentId::from_uuid(payload.content_id);
    let episode = state
        .episode_service
        .create(content_id, payload.into_new_episode())
        .await?;
    Ok((StatusCode::CREATED, Json(EpisodeResponse::from(episode))))
}

pub async fn update_episode_handler(
    State(state): State<AppState>,
    Path(episode_id): Path<Uuid>,
    Json(payload): Json<UpdateEpisodeRequest>,
) -> ApiResult<Json<EpisodeResponse>> {
    let episode = state
        .episode_service
        .update(EpisodeId::from_uuid(episode_id), payload.into())
        .await?;
    Ok(Json(EpisodeResponse::from(episode)))
}

pub async fn delete_episode_handler(
    State(state): State<AppState>,
    Path(episode_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .episode_service
        .delete(EpisodeId::from_uuid(episode_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
