use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use movify_core::{AppError, Principal, Role};
use movify_domain::{UserId, UserLookup};
use uuid::Uuid;

use crate::dto::{CreateUserRequest, SearchUserRequest, UpdateUserRequest, UserResponse};
use crate::error::ApiResult;
use crate::middleware::ensure_self_or_admin;
use crate::state::AppState;

pub async fn search_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<SearchUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.find(&payload.into_lookup()?).await?;
    ensure_self_or_admin(&state, &principal, user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::from_uuid(user_id);
    ensure_self_or_admin(&state, &principal, user_id).await?;

    let user = state.user_service.find(&UserLookup::Id(user_id)).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::from_uuid(user_id);
    ensure_self_or_admin(&state, &principal, user_id).await?;
    if payload.role.is_some() && principal.role() != Role::Admin {
        return Err(AppError::Forbidden("only admins may change roles".to_owned()).into());
    }

    let user = state.user_service.update(user_id, payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.user_service.delete(UserId::from_uuid(user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn grant_admin_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .grant_admin(UserId::from_uuid(user_id))
        .await?;
    Ok(Json(UserResponse::from(user)))
}
