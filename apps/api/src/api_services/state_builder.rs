use std::sync::Arc;

use movify_application::{
    AttemptLedger, AuthService, Clock, ContentService, EpisodeService, LoginAttemptGuard,
    PersonalListService, SystemClock, UserService,
};
use movify_core::AppError;
use movify_infrastructure::{
    GrpcAuthGateway, InMemoryAttemptLedger, PostgresAttemptLedger, PostgresContentRepository,
    PostgresEpisodeRepository, PostgresPersonalListRepository, PostgresUserRepository,
};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, LedgerBackend};
use crate::client_ip::TrustedProxies;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let content_repository = Arc::new(PostgresContentRepository::new(pool.clone()));
    let episode_repository = Arc::new(PostgresEpisodeRepository::new(pool.clone()));
    let personal_list_repository = Arc::new(PostgresPersonalListRepository::new(pool.clone()));

    let user_service = UserService::new(user_repository.clone(), clock.clone());
    let attempts = LoginAttemptGuard::new(
        build_attempt_ledger(&pool, config.ledger_backend),
        clock.clone(),
        config.attempt_policy,
    );
    let gateway = Arc::new(GrpcAuthGateway::connect_lazy(
        &config.auth_grpc_url,
        config.auth_grpc_timeout,
    )?);
    info!(
        auth_grpc_url = %config.auth_grpc_url,
        attempts_amount = config.attempt_policy.default_attempts_amount(),
        "auth forwarding configured"
    );

    Ok(AppState {
        postgres_pool: pool,
        auth_service: AuthService::new(gateway, user_service.clone(), attempts.clone()),
        attempt_guard: attempts,
        user_service,
        content_service: ContentService::new(
            content_repository.clone(),
            episode_repository.clone(),
            clock.clone(),
        ),
        episode_service: EpisodeService::new(episode_repository, content_repository.clone()),
        personal_list_service: PersonalListService::new(
            personal_list_repository,
            user_repository,
            content_repository,
            clock,
        ),
        trusted_proxies: Arc::new(TrustedProxies::new(config.trusted_proxies.clone())),
    })
}

fn build_attempt_ledger(pool: &PgPool, backend: LedgerBackend) -> Arc<dyn AttemptLedger> {
    match backend {
        LedgerBackend::Postgres => Arc::new(PostgresAttemptLedger::new(pool.clone())),
        LedgerBackend::Memory => {
            warn!("login attempts are kept in memory and are not shared between instances");
            Arc::new(InMemoryAttemptLedger::new())
        }
    }
}
