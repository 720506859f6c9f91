//! Login attempt allowance tracking.
//!
//! Every client identifier owns at most one [`AttemptRecord`]. Each login
//! attempt consumes one unit of allowance; exhausting the allowance starts a
//! lockout window. Expired lockouts are detected lazily on the next attempt,
//! there is no background expiry.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Duration, Utc};
use movify_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::ids::AttemptRecordId;

/// Longest accepted client identifier, matching the ledger column width.
pub const CLIENT_KEY_MAX_LENGTH: usize = 255;

/// Identifier under which attempts are tracked (an IP address in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientKey(String);

impl ClientKey {
    /// Creates a validated client key.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "client key must not be empty".to_owned(),
            ));
        }

        if trimmed.len() > CLIENT_KEY_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "client key must not exceed {CLIENT_KEY_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the key as stored in the ledger.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ClientKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Allowance and cooldown settings for login attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginAttemptPolicy {
    default_attempts_amount: u32,
    ban_time: Duration,
}

impl LoginAttemptPolicy {
    /// Creates a policy allowing `default_attempts_amount` attempts before a
    /// lockout of `ban_time_in_seconds`.
    pub fn new(default_attempts_amount: u32, ban_time_in_seconds: i64) -> AppResult<Self> {
        if default_attempts_amount == 0 {
            return Err(AppError::Validation(
                "default attempts amount must be at least 1".to_owned(),
            ));
        }

        if ban_time_in_seconds < 0 {
            return Err(AppError::Validation(
                "ban time must not be negative".to_owned(),
            ));
        }

        let ban_time = Duration::try_seconds(ban_time_in_seconds).ok_or_else(|| {
            AppError::Validation(format!("ban time {ban_time_in_seconds}s is out of range"))
        })?;

        Ok(Self {
            default_attempts_amount,
            ban_time,
        })
    }

    /// Returns the number of attempts allowed per window.
    #[must_use]
    pub fn default_attempts_amount(&self) -> u32 {
        self.default_attempts_amount
    }

    /// Returns the lockout duration.
    #[must_use]
    pub fn ban_time(&self) -> Duration {
        self.ban_time
    }

    // The attempt that creates or resets a record consumes one unit itself.
    fn fresh_allowance(&self) -> u32 {
        self.default_attempts_amount - 1
    }

    fn lockout_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.ban_time)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn lockout_for(&self, attempts_remaining: u32, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        (attempts_remaining == 0).then(|| self.lockout_from(now))
    }
}

/// Persisted allowance state for one client key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Record handle assigned at creation.
    pub id: AttemptRecordId,
    /// Client identifier the record tracks.
    pub client_key: ClientKey,
    /// Attempts left before lockout.
    pub attempts_remaining: u32,
    /// End of the lockout window, set only when no attempts remain.
    pub lockout_until: Option<DateTime<Utc>>,
    /// Optimistic concurrency token, bumped on every write.
    pub version: i64,
}

impl AttemptRecord {
    /// Returns whether the record blocks attempts at `now`.
    #[must_use]
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.attempts_remaining == 0 && self.lockout_until.is_some_and(|until| now < until)
    }
}

/// Ledger write derived from one login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptTransition {
    /// No record existed; insert this one.
    Create(AttemptRecord),
    /// Replace the stored record if it is still at `expected_version`.
    Update {
        /// Record to persist.
        next: AttemptRecord,
        /// Version the decision was based on.
        expected_version: i64,
    },
    /// Lockout still active; nothing is written.
    Blocked,
}

impl AttemptTransition {
    /// Returns whether the attempt limit is exhausted for this attempt.
    #[must_use]
    pub fn limit_reached(&self) -> bool {
        matches!(self, Self::Blocked)
    }
}

/// Returns whether `record` blocks a login attempt at `now`. Absent records
/// never block.
#[must_use]
pub fn is_blocked(record: Option<&AttemptRecord>, now: DateTime<Utc>) -> bool {
    record.is_some_and(|record| record.is_locked_at(now))
}

/// Decides the ledger transition for one login attempt by `client_key`.
#[must_use]
pub fn next_attempt(
    current: Option<&AttemptRecord>,
    client_key: &ClientKey,
    now: DateTime<Utc>,
    policy: &LoginAttemptPolicy,
) -> AttemptTransition {
    let Some(current) = current else {
        let attempts_remaining = policy.fresh_allowance();
        return AttemptTransition::Create(AttemptRecord {
            id: AttemptRecordId::new(),
            client_key: client_key.clone(),
            attempts_remaining,
            lockout_until: policy.lockout_for(attempts_remaining, now),
            version: 0,
        });
    };

    if current.is_locked_at(now) {
        return AttemptTransition::Blocked;
    }

    let attempts_remaining = if current.attempts_remaining == 0 {
        // Lockout elapsed: start a fresh window.
        policy.fresh_allowance()
    } else {
        // Stored allowance may predate a smaller policy.
        current
            .attempts_remaining
            .min(policy.default_attempts_amount)
            - 1
    };

    AttemptTransition::Update {
        next: AttemptRecord {
            id: current.id,
            client_key: current.client_key.clone(),
            attempts_remaining,
            lockout_until: policy.lockout_for(attempts_remaining, now),
            version: current.version + 1,
        },
        expected_version: current.version,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;

    fn policy(amount: u32, ban_seconds: i64) -> LoginAttemptPolicy {
        LoginAttemptPolicy::new(amount, ban_seconds).unwrap_or_else(|_| panic!("valid policy"))
    }

    fn key(value: &str) -> ClientKey {
        ClientKey::new(value).unwrap_or_else(|_| panic!("valid key"))
    }

    fn at(seconds: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0)
            .single()
            .unwrap_or_else(|| panic!("valid timestamp"))
    }

    fn persisted(transition: AttemptTransition) -> AttemptRecord {
        match transition {
            AttemptTransition::Create(record) => record,
            AttemptTransition::Update { next, .. } => next,
            AttemptTransition::Blocked => panic!("expected a write"),
        }
    }

    fn record(attempts_remaining: u32, lockout_until: Option<chrono::DateTime<Utc>>) -> AttemptRecord {
        AttemptRecord {
            id: AttemptRecordId::new(),
            client_key: key("192.168.1.1"),
            attempts_remaining,
            lockout_until,
            version: 4,
        }
    }

    #[test]
    fn client_key_is_trimmed_and_rejects_blank() {
        assert_eq!(key("  10.0.0.1 ").as_str(), "10.0.0.1");
        assert!(ClientKey::new("   ").is_err());
        assert!(ClientKey::new("x".repeat(CLIENT_KEY_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn policy_rejects_zero_attempts_and_negative_ban() {
        assert!(LoginAttemptPolicy::new(0, 60).is_err());
        assert!(LoginAttemptPolicy::new(3, -1).is_err());
        assert!(LoginAttemptPolicy::new(1, 0).is_ok());
    }

    #[test]
    fn first_attempt_creates_record_with_one_unit_consumed() {
        let transition = next_attempt(None, &key("192.168.1.1"), at(0), &policy(3, 60));
        assert!(!transition.limit_reached());

        let created = persisted(transition);
        assert_eq!(created.attempts_remaining, 2);
        assert_eq!(created.lockout_until, None);
        assert_eq!(created.version, 0);
    }

    #[test]
    fn attempt_with_allowance_decrements_and_bumps_version() {
        let current = record(2, None);
        let transition = next_attempt(Some(&current), &current.client_key, at(0), &policy(3, 60));

        let AttemptTransition::Update {
            next,
            expected_version,
        } = transition
        else {
            panic!("expected update");
        };
        assert_eq!(next.attempts_remaining, 1);
        assert_eq!(next.lockout_until, None);
        assert_eq!(next.id, current.id);
        assert_eq!(expected_version, 4);
        assert_eq!(next.version, 5);
    }

    #[test]
    fn last_allowed_attempt_starts_lockout_but_is_not_blocked() {
        let current = record(1, None);
        let transition = next_attempt(Some(&current), &current.client_key, at(0), &policy(3, 60));
        assert!(!transition.limit_reached());

        let next = persisted(transition);
        assert_eq!(next.attempts_remaining, 0);
        assert_eq!(next.lockout_until, Some(at(60)));
    }

    #[test]
    fn active_lockout_blocks_without_write() {
        let current = record(0, Some(at(30)));
        let transition = next_attempt(Some(&current), &current.client_key, at(0), &policy(3, 60));
        assert_eq!(transition, AttemptTransition::Blocked);
        assert!(transition.limit_reached());
    }

    #[test]
    fn expired_lockout_resets_allowance() {
        let current = record(0, Some(at(-10)));
        let next = persisted(next_attempt(
            Some(&current),
            &current.client_key,
            at(0),
            &policy(3, 60),
        ));
        assert_eq!(next.attempts_remaining, 2);
        assert_eq!(next.lockout_until, None);
    }

    #[test]
    fn exhausted_record_without_lockout_is_treated_as_expired() {
        let current = record(0, None);
        assert!(!is_blocked(Some(&current), at(0)));
        let next = persisted(next_attempt(
            Some(&current),
            &current.client_key,
            at(0),
            &policy(3, 60),
        ));
        assert_eq!(next.attempts_remaining, 2);
    }

    #[test]
    fn lockout_ends_exactly_at_deadline() {
        let current = record(0, Some(at(60)));
        assert!(is_blocked(Some(&current), at(59)));
        assert!(!is_blocked(Some(&current), at(60)));
        assert!(!is_blocked(None, at(0)));
    }

    #[test]
    fn single_attempt_policy_locks_on_first_attempt() {
        let single = policy(1, 60);
        let created = persisted(next_attempt(None, &key("10.0.0.1"), at(0), &single));
        assert_eq!(created.attempts_remaining, 0);
        assert_eq!(created.lockout_until, Some(at(60)));
        assert!(is_blocked(Some(&created), at(1)));
    }

    #[test]
    fn stored_allowance_is_clamped_to_current_policy() {
        let current = record(9, None);
        let next = persisted(next_attempt(
            Some(&current),
            &current.client_key,
            at(0),
            &policy(3, 60),
        ));
        assert_eq!(next.attempts_remaining, 2);
    }

    #[test]
    fn huge_ban_time_saturates_lockout() {
        let long_ban = policy(1, i64::MAX / 1_000);
        let created = persisted(next_attempt(None, &key("10.0.0.1"), Utc::now(), &long_ban));
        assert!(created.lockout_until.is_some());
        assert_eq!(long_ban.ban_time(), Duration::seconds(i64::MAX / 1_000));
    }

    proptest! {
        #[test]
        fn allowance_decrements_by_exactly_one_until_locked(
            amount in 1_u32..25,
            ban_seconds in 1_i64..86_400,
        ) {
            let policy = policy(amount, ban_seconds);
            let client_key = key("203.0.113.7");
            let now = at(0);
            let mut current: Option<AttemptRecord> = None;

            for expected in (0..amount).rev() {
                let transition = next_attempt(current.as_ref(), &client_key, now, &policy);
                prop_assert!(!transition.limit_reached());
                let next = persisted(transition);
                prop_assert_eq!(next.attempts_remaining, expected);
                prop_assert_eq!(next.lockout_until.is_some(), expected == 0);
                current = Some(next);
            }

            prop_assert!(is_blocked(current.as_ref(), now));
            prop_assert!(next_attempt(current.as_ref(), &client_key, now, &policy).limit_reached());
        }

        #[test]
        fn lockout_holds_until_ban_time_elapses(
            amount in 1_u32..10,
            ban_seconds in 1_i64..3_600,
            elapsed in 0_i64..7_200,
        ) {
            let policy = policy(amount, ban_seconds);
            let locked = record(0, Some(at(ban_seconds)));
            let checked_at = at(elapsed);

            prop_assert_eq!(is_blocked(Some(&locked), checked_at), elapsed < ban_seconds);

            let transition = next_attempt(Some(&locked), &locked.client_key, checked_at, &policy);
            prop_assert_eq!(transition.limit_reached(), elapsed < ban_seconds);
        }

        #[test]
        fn attempts_by_one_client_never_change_another(
            amount in 1_u32..6,
            ban_seconds in 1_i64..300,
            steps in proptest::collection::vec((any::<bool>(), 0_i64..120), 0..40),
        ) {
            let policy = policy(amount, ban_seconds);
            let first = key("203.0.113.1");
            let second = key("203.0.113.2");

            let mut interleaved: (Option<AttemptRecord>, Option<AttemptRecord>) = (None, None);
            let mut second_alone: Option<AttemptRecord> = None;
            let mut elapsed = 0_i64;

            for (by_first, gap) in steps {
                elapsed += gap;
                let now = at(elapsed);

                if by_first {
                    let before = interleaved.1.clone();
                    interleaved.0 = applied(interleaved.0.take(), &first, now, &policy);
                    prop_assert_eq!(&interleaved.1, &before);
                    if let Some(record) = &interleaved.0 {
                        prop_assert_eq!(&record.client_key, &first);
                    }
                } else {
                    interleaved.1 = applied(interleaved.1.take(), &second, now, &policy);
                    second_alone = applied(second_alone, &second, now, &policy);
                }
            }

            prop_assert_eq!(state_of(interleaved.1.as_ref()), state_of(second_alone.as_ref()));
        }
    }

    fn applied(
        current: Option<AttemptRecord>,
        client_key: &ClientKey,
        now: chrono::DateTime<Utc>,
        policy: &LoginAttemptPolicy,
    ) -> Option<AttemptRecord> {
        match next_attempt(current.as_ref(), client_key, now, policy) {
            AttemptTransition::Blocked => current,
            transition => Some(persisted(transition)),
        }
    }

    fn state_of(
        record: Option<&AttemptRecord>,
    ) -> Option<(u32, Option<chrono::DateTime<Utc>>, i64)> {
        record.map(|record| (record.attempts_remaining, record.lockout_until, record.version))
    }
}
