use std::sync::Arc;

use movify_application::{
    AuthService, ContentService, EpisodeService, LoginAttemptGuard, PersonalListService,
    UserService,
};
use sqlx::PgPool;

use crate::client_ip::TrustedProxies;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub postgres_pool: PgPool,
    pub auth_service: AuthService,
    pub attempt_guard: LoginAttemptGuard,
    pub user_service: UserService,
    pub content_service: ContentService,
    pub episode_service: EpisodeService,
    pub personal_list_service: PersonalListService,
    pub trusted_proxies: Arc<TrustedProxies>,
}
