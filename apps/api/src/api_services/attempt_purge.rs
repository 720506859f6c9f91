use std::time::Duration;

use movify_application::LoginAttemptGuard;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Periodically drops stale attempt records held by this process.
///
/// Only needed for the in-memory ledger; the Postgres ledger is purged by
/// `movify-worker`.
pub fn spawn_attempt_purge(
    guard: LoginAttemptGuard,
    retention: chrono::Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            retention_hours = retention.num_hours(),
            interval_seconds = interval.as_secs(),
            "in-memory attempt purge started"
        );

        loop {
            match guard.purge_expired(retention).await {
                Ok(0) => {}
                Ok(purged) => info!(purged, "stale in-memory login attempt records purged"),
                Err(error) => warn!(error = %error, "failed to purge in-memory login attempt records"),
            }

            tokio::time::sleep(interval).await;
        }
    })
}
