use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use movify_application::{LoginInput, PasswordResetInput, RegisterInput};
use movify_core::Role;
use movify_domain::ClientKey;

use crate::dto::{
    LoginRequest, LoginResponse, PasswordResetRequest, RegisterRequest, RegisterResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let client_ip = state.trusted_proxies.client_ip(peer.ip(), &headers);
    let client_key = ClientKey::new(client_ip.to_string())?;
    let lookup = payload.lookup()?;

    let result = state
        .auth_service
        .login(LoginInput {
            lookup,
            password: payload.password,
            client_key,
        })
        .await?;

    Ok(Json(LoginResponse::from(result)))
}

/// Public self-registration always creates a regular user; admins are
/// promoted afterwards.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let result = state
        .auth_service
        .register(RegisterInput {
            login: payload.login,
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            role: Role::User,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse::from(result))))
}

pub async fn password_reset_handler(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let result = state
        .auth_service
        .reset_password(PasswordResetInput {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(Json(RegisterResponse::from(result)))
}
