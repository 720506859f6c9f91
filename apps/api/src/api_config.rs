use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use ipnet::IpNet;
use movify_core::AppError;
use movify_domain::LoginAttemptPolicy;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Storage used for login attempt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerBackend {
    Postgres,
    Memory,
}

impl FromStr for LedgerBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(AppError::Validation(format!(
                "ATTEMPT_LEDGER_BACKEND must be either 'postgres' or 'memory', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub grpc_port: u16,
    pub auth_grpc_url: String,
    pub auth_grpc_timeout: Duration,
    pub attempt_policy: LoginAttemptPolicy,
    pub ledger_backend: LedgerBackend,
    pub attempt_retention: chrono::Duration,
    pub purge_interval: Duration,
    pub trusted_proxies: Vec<IpNet>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_source(migrate_only, |name| env::var(name).ok())
    }

    pub(crate) fn from_source(
        migrate_only: bool,
        source: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let database_url = source("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))?;
        let frontend_url =
            source("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let api_host = source("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parsed_or(&source, "API_PORT", 8080_u16)?;
        let grpc_port = parsed_or(&source, "GRPC_PORT", 9090_u16)?;

        let auth_grpc_url =
            source("AUTH_GRPC_URL").unwrap_or_else(|| "http://127.0.0.1:5001".to_owned());
        Url::parse(&auth_grpc_url)
            .map_err(|error| AppError::Validation(format!("invalid AUTH_GRPC_URL: {error}")))?;
        let auth_grpc_timeout =
            Duration::from_millis(parsed_or(&source, "AUTH_GRPC_TIMEOUT_MS", 5_000_u64)?);

        let attempt_policy = LoginAttemptPolicy::new(
            parsed_or(&source, "AUTH_DEFAULT_ATTEMPTS_AMOUNT", 5_u32)?,
            parsed_or(&source, "AUTH_BAN_TIME_IN_SECONDS", 300_i64)?,
        )?;

        let ledger_backend = source("ATTEMPT_LEDGER_BACKEND")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(LedgerBackend::Postgres);

        // Only read by the in-process purge of the memory ledger.
        let retention_hours = parsed_or(&source, "ATTEMPT_RETENTION_HOURS", 24_u32)?;
        let purge_interval_seconds = parsed_or(&source, "PURGE_INTERVAL_SECONDS", 3_600_u64)?;
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

        let trusted_proxies = source("TRUSTED_PROXIES")
            .map(|value| parse_trusted_proxies(&value))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            grpc_port,
            auth_grpc_url,
            auth_grpc_timeout,
            attempt_policy,
            ledger_backend,
            attempt_retention: chrono::Duration::hours(i64::from(retention_hours)),
            purge_interval: Duration::from_secs(purge_interval_seconds),
            trusted_proxies,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        Ok(SocketAddr::from((self.host()?, self.api_port)))
    }

    pub fn grpc_address(&self) -> Result<SocketAddr, AppError> {
        Ok(SocketAddr::from((self.host()?, self.grpc_port)))
    }

    fn host(&self) -> Result<IpAddr, AppError> {
        IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parsed_or<T>(
    source: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match source(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}

/// Parses comma-separated CIDRs; bare addresses are single-host networks.
fn parse_trusted_proxies(value: &str) -> Result<Vec<IpNet>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<IpNet>()
                .or_else(|_| entry.parse::<IpAddr>().map(IpNet::from))
                .map_err(|_| {
                    AppError::Validation(format!("invalid TRUSTED_PROXIES entry '{entry}'"))
                })
        })
        .collect()
}
