use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use movify_domain::ContentId;
use uuid::Uuid;

use crate::dto::{
    ContentResponse, CreateContentRequest, EpisodeResponse, PageQuery, PageResponse,
    SearchContentRequest, UpdateContentRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_contents_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PageResponse<ContentResponse>>> {
    let page = state.content_service.list(query.into_request()?).await?;
    Ok(Json(PageResponse::from(page)))
}

pub async fn search_contents_handler(
    State(state): State<AppState>,
    Json(payload): Json<SearchContentRequest>,
) -> ApiResult<Json<PageResponse<ContentResponse>>> {
    let page = state
        .content_service
        .search(payload.filter(), payload.page.into_request()?)
        .await?;
    Ok(Json(PageResponse::from(page)))
}

pub async fn get_content_handler(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
) -> ApiResult<Json<ContentResponse>> {
    let content = state
        .content_service
        .get(ContentId::from_uuid(content_id))
        .await?;
    Ok(Json(ContentResponse::from(content)))
}

pub async fn list_content_episodes_handler(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
) -> ApiResult<Json<Vec<EpisodeResponse>>> {
    let episodes = state
        .content_service
        .episodes(ContentId::from_uuid(content_id))
        .await?
        .into_iter()
        .map(EpisodeResponse::from)
        .collect();
    Ok(Json(episodes))
}

pub async fn create_content_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateContentRequest>,
) -> ApiResult<(StatusCode, Json<ContentResponse>)> {
    let content = state.content_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ContentResponse::from(content))))
}

pub async fn update_content_handler(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
    Json(payload): Json<UpdateContentRequest>,
) -> ApiResult<Json<ContentResponse>> {
    let content = state
        .content_service
        .update(ContentId::from_uuid(content_id), payload.into())
        .await?;
    Ok(Json(ContentResponse::from(content)))
}

pub async fn delete_content_handler(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .content_service
        .delete(ContentId::from_uuid(content_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
