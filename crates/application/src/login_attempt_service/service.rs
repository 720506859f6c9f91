use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use movify_core::{AppError, AppResult};
use movify_domain::{AttemptTransition, ClientKey, LoginAttemptPolicy, is_blocked, next_attempt};

use crate::Clock;

use super::ports::{AttemptLedger, LedgerWrite};

/// Read-decide-write rounds attempted before giving up on a contended record.
pub const MAX_WRITE_ROUNDS: usize = 4;

/// Application service gating login attempts per client identifier.
#[derive(Clone)]
pub struct LoginAttemptGuard {
    ledger: Arc<dyn AttemptLedger>,
    clock: Arc<dyn Clock>,
    policy: LoginAttemptPolicy,
}

impl LoginAttemptGuard {
    /// Creates a new guard.
    #[must_use]
    pub fn new(
        ledger: Arc<dyn AttemptLedger>,
        clock: Arc<dyn Clock>,
        policy: LoginAttemptPolicy,
    ) -> Self {
        Self {
            ledger,
            clock,
            policy,
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub fn policy(&self) -> &LoginAttemptPolicy {
        &self.policy
    }

    /// Returns whether `client_key` is currently locked out. Never writes.
    pub async fn is_blocked(&self, client_key: &ClientKey) -> AppResult<bool> {
        let record = self.ledger.find(client_key).await?;
        Ok(is_blocked(record.as_ref(), self.clock.now()))
    }

    /// Charges one attempt to `client_key`.
    ///
    /// Returns `true` when the allowance is exhausted and the lockout is still
    /// active, in which case nothing is written. The attempt that consumes the
    /// last unit of allowance returns `false`; the next one is blocked.
    pub async fn register_attempt(&self, client_key: &ClientKey) -> AppResult<bool> {
        for round in 1..=MAX_WRITE_ROUNDS {
            let now = self.clock.now();
            let current = self.ledger.find(client_key).await?;

            let (record, write) = match next_attempt(current.as_ref(), client_key, now, &self.policy)
            {
                AttemptTransition::Blocked => {
                    warn!(client_key = %client_key, "login attempt rejected, lockout active");
                    return Ok(true);
                }
                AttemptTransition::Create(record) => {
                    let write = self.ledger.insert(&record, now).await?;
                    (record, write)
                }
                AttemptTransition::Update {
                    next,
                    expected_version,
                } => {
                    let write = self.ledger.update(&next, expected_version, now).await?;
                    (next, write)
                }
            };

            match write {
                LedgerWrite::Applied => {
                    if let Some(lockout_until) = record.lockout_until {
                        warn!(
                            client_key = %client_key,
                            lockout_until = %lockout_until,
                            "login allowance exhausted, lockout started"
                        );
                    } else {
                        debug!(
                            client_key = %client_key,
                            attempts_remaining = record.attempts_remaining,
                            "login attempt charged"
                        );
                    }
                    return Ok(false);
                }
                LedgerWrite::Conflict => {
                    debug!(client_key = %client_key, round, "attempt record changed concurrently, retrying");
                }
            }
        }

        Err(AppError::Conflict(format!(
            "attempt record for '{client_key}' kept changing concurrently"
        )))
    }

    /// Removes all attempt state for `client_key`. Absent records are a no-op.
    pub async fn reset(&self, client_key: &ClientKey) -> AppResult<()> {
        if self.ledger.delete(client_key).await? {
            debug!(client_key = %client_key, "attempt record reset");
        }

        Ok(())
    }

    /// Deletes records untouched for `retention` that are not locked out.
    pub async fn purge_expired(&self, retention: Duration) -> AppResult<u64> {
        if retention < Duration::zero() {
            return Err(AppError::Validation(
                "attempt retention must not be negative".to_owned(),
            ));
        }

        let now = self.clock.now();
        let written_before = now
            .checked_sub_signed(retention)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);

        self.ledger.purge_stale(written_before, now).await
    }
}
