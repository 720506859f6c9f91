use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use movify_core::AppError;
use movify_domain::{AttemptRecord, AttemptRecordId, ClientKey, LoginAttemptPolicy};

use crate::test_support::{FakeAttemptLedger, ManualClock};

use super::{LoginAttemptGuard, MAX_WRITE_ROUNDS};

struct Fixture {
    guard: LoginAttemptGuard,
    ledger: Arc<FakeAttemptLedger>,
    clock: Arc<ManualClock>,
}

fn start() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0)
        .single()
        .unwrap_or_else(|| panic!("test"))
}

fn fixture(amount: u32, ban_seconds: i64) -> Fixture {
    let ledger = Arc::new(FakeAttemptLedger::default());
    let clock = Arc::new(ManualClock::starting_at(start()));
    let policy = LoginAttemptPolicy::new(amount, ban_seconds).unwrap_or_else(|_| panic!("test"));
    let guard = LoginAttemptGuard::new(ledger.clone(), clock.clone(), policy);

    Fixture {
        guard,
        ledger,
        clock,
    }
}

fn key(value: &str) -> ClientKey {
    ClientKey::new(value).unwrap_or_else(|_| panic!("test"))
}

async fn attempt(fixture: &Fixture, client: &ClientKey) -> bool {
    fixture
        .guard
        .register_attempt(client)
        .await
        .unwrap_or_else(|_| panic!("test"))
}

async fn blocked(fixture: &Fixture, client: &ClientKey) -> bool {
    fixture
        .guard
        .is_blocked(client)
        .await
        .unwrap_or_else(|_| panic!("test"))
}

async fn remaining(fixture: &Fixture, client: &ClientKey) -> Option<u32> {
    fixture
        .ledger
        .record(client.as_str())
        .await
        .map(|record| record.attempts_remaining)
}

#[tokio::test]
async fn three_attempt_scenario_locks_and_lazily_expires() {
    let fixture = fixture(3, 60);
    let client = key("192.168.1.1");

    assert!(!attempt(&fixture, &client).await);
    assert_eq!(remaining(&fixture, &client).await, Some(2));

    assert!(!attempt(&fixture, &client).await);
    assert_eq!(remaining(&fixture, &client).await, Some(1));

    assert!(!attempt(&fixture, &client).await);
    let record = fixture
        .ledger
        .record(client.as_str())
        .await
        .unwrap_or_else(|| panic!("test"));
    assert_eq!(record.attempts_remaining, 0);
    assert_eq!(record.lockout_until, Some(start() + Duration::seconds(60)));

    assert!(blocked(&fixture, &client).await);
    assert!(attempt(&fixture, &client).await);

    fixture.clock.advance(Duration::seconds(61));
    assert!(!blocked(&fixture, &client).await);
    assert!(!attempt(&fixture, &client).await);
    assert_eq!(remaining(&fixture, &client).await, Some(2));
    let record = fixture
        .ledger
        .record(client.as_str())
        .await
        .unwrap_or_else(|| panic!("test"));
    assert_eq!(record.lockout_until, None);
}

#[tokio::test]
async fn blocked_attempt_does_not_write() {
    let fixture = fixture(1, 60);
    let client = key("192.168.1.1");

    assert!(!attempt(&fixture, &client).await);
    let writes = fixture.ledger.writes().await;

    assert!(attempt(&fixture, &client).await);
    assert!(blocked(&fixture, &client).await);
    assert_eq!(fixture.ledger.writes().await, writes);
}

#[tokio::test]
async fn lockout_holds_until_ban_time_elapses() {
    let fixture = fixture(2, 60);
    let client = key("10.0.0.5");

    attempt(&fixture, &client).await;
    attempt(&fixture, &client).await;

    fixture.clock.advance(Duration::seconds(59));
    assert!(blocked(&fixture, &client).await);

    fixture.clock.advance(Duration::seconds(1));
    assert!(!blocked(&fixture, &client).await);
}

#[tokio::test]
async fn reset_after_success_restores_full_allowance() {
    let fixture = fixture(3, 60);
    let client = key("192.168.1.1");

    attempt(&fixture, &client).await;
    attempt(&fixture, &client).await;
    fixture
        .guard
        .reset(&client)
        .await
        .unwrap_or_else(|_| panic!("test"));
    assert_eq!(remaining(&fixture, &client).await, None);

    assert!(!attempt(&fixture, &client).await);
    assert_eq!(remaining(&fixture, &client).await, Some(2));
}

#[tokio::test]
async fn reset_is_idempotent() {
    let fixture = fixture(3, 60);
    let client = key("192.168.1.1");

    assert!(fixture.guard.reset(&client).await.is_ok());
    assert!(fixture.guard.reset(&client).await.is_ok());

    attempt(&fixture, &client).await;
    assert!(fixture.guard.reset(&client).await.is_ok());
    assert!(fixture.guard.reset(&client).await.is_ok());
    assert_eq!(remaining(&fixture, &client).await, None);
}

#[tokio::test]
async fn clients_are_tracked_independently() {
    let fixture = fixture(2, 60);
    let first = key("192.168.1.1");
    let second = key("192.168.1.2");

    attempt(&fixture, &first).await;
    attempt(&fixture, &first).await;
    assert!(blocked(&fixture, &first).await);

    assert!(!blocked(&fixture, &second).await);
    assert!(!attempt(&fixture, &second).await);
    assert_eq!(remaining(&fixture, &second).await, Some(1));

    fixture
        .guard
        .reset(&second)
        .await
        .unwrap_or_else(|_| panic!("test"));
    assert!(blocked(&fixture, &first).await);
}

#[tokio::test]
async fn lost_race_is_retried_against_fresh_state() {
    let fixture = fixture(3, 60);
    let client = key("192.168.1.1");
    attempt(&fixture, &client).await;

    *fixture.ledger.forced_conflicts.lock().await = 2;
    assert!(!attempt(&fixture, &client).await);
    assert_eq!(remaining(&fixture, &client).await, Some(1));
}

#[tokio::test]
async fn persistent_contention_surfaces_conflict() {
    let fixture = fixture(3, 60);
    let client = key("192.168.1.1");

    *fixture.ledger.forced_conflicts.lock().await = MAX_WRITE_ROUNDS;
    let result = fixture.guard.register_attempt(&client).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn ledger_outage_is_never_treated_as_unblocked() {
    let fixture = fixture(3, 60);
    let client = key("192.168.1.1");
    *fixture.ledger.unavailable.lock().await = true;

    assert!(matches!(
        fixture.guard.is_blocked(&client).await,
        Err(AppError::Internal(_))
    ));
    assert!(matches!(
        fixture.guard.register_attempt(&client).await,
        Err(AppError::Internal(_))
    ));
}

#[tokio::test]
async fn purge_keeps_recent_and_locked_records() {
    let fixture = fixture(1, 7_200);
    let locked = key("10.0.0.1");
    let idle = key("10.0.0.2");
    let fresh = key("10.0.0.3");

    attempt(&fixture, &locked).await;
    fixture
        .ledger
        .records
        .lock()
        .await
        .insert(
            idle.as_str().to_owned(),
            (
                AttemptRecord {
                    id: AttemptRecordId::new(),
                    client_key: idle.clone(),
                    attempts_remaining: 2,
                    lockout_until: None,
                    version: 0,
                },
                start(),
            ),
        );

    fixture.clock.advance(Duration::hours(1));
    attempt(&fixture, &fresh).await;

    let purged = fixture
        .guard
        .purge_expired(Duration::minutes(30))
        .await
        .unwrap_or_else(|_| panic!("test"));

    assert_eq!(purged, 1);
    assert!(fixture.ledger.record(locked.as_str()).await.is_some());
    assert!(fixture.ledger.record(idle.as_str()).await.is_none());
    assert!(fixture.ledger.record(fresh.as_str()).await.is_some());
}

#[tokio::test]
async fn purge_rejects_negative_retention() {
    let fixture = fixture(3, 60);
    assert!(fixture
        .guard
        .purge_expired(Duration::seconds(-1))
        .await
        .is_err());
}
