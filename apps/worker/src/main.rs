//! Movify housekeeping worker.
//!
//! Periodically deletes login attempt records nobody has touched within the
//! retention window. Records under an active lockout are always kept.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use movify_application::{LoginAttemptGuard, SystemClock};
use movify_core::{AppError, AppResult};
use movify_domain::LoginAttemptPolicy;
use movify_infrastructure::PostgresAttemptLedger;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct WorkerConfig {
    database_url: String,
    attempt_policy: LoginAttemptPolicy,
    retention: chrono::Duration,
    purge_interval: Duration,
    run_once: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let run_once = env::args().nth(1).as_deref() == Some("once");
    let config = WorkerConfig::from_source(run_once, |name| env::var(name).ok())?;
    let pool = connect_pool(config.database_url.as_str()).await?;
    let guard = LoginAttemptGuard::new(
        Arc::new(PostgresAttemptLedger::new(pool)),
        Arc::new(SystemClock),
        config.attempt_policy,
    );

    info!(
        retention_hours = config.retention.num_hours(),
        purge_interval_seconds = config.purge_interval.as_secs(),
        run_once = config.run_once,
        "movify-worker started"
    );

    loop {
        match guard.purge_expired(config.retention).await {
            Ok(purged) => info!(purged, "stale login attempt records purged"),
            Err(error) if config.run_once => return Err(error),
            Err(error) => warn!(error = %error, "failed to purge login attempt records"),
        }

        if config.run_once {
            return Ok(());
        }

        tokio::time::sleep(config.purge_interval).await;
    }
}

async fn connect_pool(database_url: &str) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

impl WorkerConfig {
    fn from_source(run_once: bool, source: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let database_url = source("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))?;

        let attempt_policy = LoginAttemptPolicy::new(
            parse_or(&source, "AUTH_DEFAULT_ATTEMPTS_AMOUNT", 5_u32)?,
            parse_or(&source, "AUTH_BAN_TIME_IN_SECONDS", 300_i64)?,
        )?;
        let retention_hours = parse_or(&source, "ATTEMPT_RETENTION_HOURS", 24_u32)?;
        let purge_interval_seconds = parse_or(&source, "PURGE_INTERVAL_SECONDS", 3_600_u64)?;

        if retention_hours == 0 {
            return Err(AppError::Validation(
                "ATTEMPT_RETENTION_HOURS must be greater than zero".to_owned(),
            ));
        }

        if purge_interval_seconds == 0 {
            return Err(AppError::Validation(
                "PURGE_INTERVAL_SECONDS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            database_url,
            attempt_policy,
            retention: chrono::Duration::hours(i64::from(retention_hours)),
            purge_interval: Duration::from_secs(purge_interval_seconds),
            run_once,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or<T>(source: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match source(name) {
        Some(value) => value.trim().parse::<T>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}
