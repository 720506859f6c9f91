use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use movify_core::{AppError, Principal, Role};

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn require_user(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    authorize(&state, Role::User, request, next).await
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    authorize(&state, Role::Admin, request, next).await
}

async fn authorize(
    state: &AppState,
    required: Role,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .unwrap_or_default();

    let principal = state.auth_service.authorize(&token, required).await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Rejects callers that are neither admins nor the user identified by `user_id`.
pub async fn ensure_self_or_admin(
    state: &AppState,
    principal: &Principal,
    user_id: movify_domain::UserId,
) -> Result<(), AppError> {
    if principal.role() == Role::Admin {
        return Ok(());
    }

    let caller = state
        .user_service
        .find_optional_by_email(principal.email())
        .await?;
    match caller {
        Some(caller) if caller.id == user_id => Ok(()),
        _ => Err(AppError::Forbidden(
            "users may only act on their own account".to_owned(),
        )),
    }
}
