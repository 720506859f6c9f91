use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use movify_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

#[cfg(test)]
mod tests;

use cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    Ok(Router::new()
        .merge(public_routes())
        .merge(user_routes(app_state.clone()))
        .merge(admin_routes(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/v1/contents",
            get(handlers::contents::list_contents_handler),
        )
        .route(
            "/v1/contents/search",
            post(handlers::contents::search_contents_handler),
        )
        .route(
            "/v1/contents/{content_id}",
            get(handlers::contents::get_content_handler),
        )
        .route(
            "/v1/contents/{content_id}/episodes",
            get(handlers::contents::list_content_episodes_handler),
        )
        .route(
            "/v1/episodes",
            get(handlers::episodes::list_episodes_handler),
        )
        .route(
            "/v1/episodes/{episode_id}",
            get(handlers::episodes::get_episode_handler),
        )
        .route("/v1/auth/register", post(handlers::auth::register_handler))
        .route("/v1/auth/login", post(handlers::auth::login_handler))
        .route(
            "/v1/auth/password-reset",
            post(handlers::auth::password_reset_handler),
        )
}

fn user_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/users/search", post(handlers::users::search_user_handler))
        .route(
            "/v1/users/{user_id}",
            get(handlers::users::get_user_handler).put(handlers::users::update_user_handler),
        )
        .route(
            "/v1/personal-lists",
            post(handlers::personal_lists::add_favorite_handler),
        )
        .route(
            "/v1/personal-lists/removal",
            post(handlers::personal_lists::remove_favorite_by_pair_handler),
        )
        // GET takes a user id, DELETE an entry id.
        .route(
            "/v1/personal-lists/{id}",
            get(handlers::personal_lists::favorites_handler)
                .delete(handlers::personal_lists::remove_favorite_handler),
        )
        .route_layer(from_fn_with_state(app_state, middleware::require_user))
}

fn admin_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/v1/contents",
            post(handlers::contents::create_content_handler),
        )
        .route(
            "/v1/contents/{content_id}",
            put(handlers::contents::update_content_handler)
                .delete(handlers::contents::delete_content_handler),
        )
        .route(
            "/v1/episodes",
            post(handlers::episodes::create_episode_handler),
        )
        .route(
            "/v1/episodes/{episode_id}",
            put(handlers::episodes::update_episode_handler)
                .delete(handlers::episodes::delete_episode_handler),
        )
        .route("/v1/users", post(handlers::users::create_user_handler))
        .route(
            "/v1/users/{user_id}",
            delete(handlers::users::delete_user_handler),
        )
        .route(
            "/v1/users/{user_id}/admin",
            post(handlers::users::grant_admin_handler),
        )
        .route_layer(from_fn_with_state(app_state, middleware::require_admin))
}
