use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use movify_core::Principal;
use movify_domain::{ContentId, FavoriteEntryId, UserId};
use uuid::Uuid;

use crate::dto::{
    AddFavoriteRequest, ContentResponse, FavoriteEntryResponse, RemoveFavoriteRequest,
};
use crate::error::ApiResult;
use crate::middleware::ensure_self_or_admin;
use crate::state::AppState;

pub async fn favorites_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ContentResponse>>> {
    let user_id = UserId::from_uuid(user_id);
    ensure_self_or_admin(&state, &principal, user_id).await?;

    let contents = state
        .personal_list_service
        .favorites(user_id)
        .await?
        .into_iter()
        .map(ContentResponse::from)
        .collect();
    Ok(Json(contents))
}

pub async fn add_favorite_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<AddFavoriteRequest>,
) -> ApiResult<(StatusCode, Json<FavoriteEntryResponse>)> {
    let user_id = UserId::from_uuid(payload.user_id);
    ensure_self_or_admin(&state, &principal, user_id).await?;

    let entry = state
        .personal_list_service
        .add(user_id, ContentId::from_uuid(payload.content_id))
        .await?;
    Ok((StatusCode::CREATED, Json(FavoriteEntryResponse::from(entry))))
}

pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(entry_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let entry_id = FavoriteEntryId::from_uuid(entry_id);
    let owner = state.personal_list_service.owner_of(entry_id).await?;
    ensure_self_or_admin(&state, &principal, owner).await?;

    state.personal_list_service.remove(entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_favorite_by_pair_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<RemoveFavoriteRequest>,
) -> ApiResult<StatusCode> {
    let user_id = UserId::from_uuid(payload.user_id);
    ensure_self_or_admin(&state, &principal, user_id).await?;

    state
        .personal_list_service
        .remove_by_pair(user_id, ContentId::from_uuid(payload.content_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
