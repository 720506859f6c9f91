//! Login attempt ledger port and the guard gating login attempts per client.
//!
//! The allowance decision itself lives in `movify_domain::next_attempt`; this
//! service performs the ledger round-trips around it and retries when a
//! concurrent writer changed the record between read and write.

mod ports;
mod service;

#[cfg(test)]
mod tests;

pub use ports::{AttemptLedger, LedgerWrite};
pub use service::{LoginAttemptGuard, MAX_WRITE_ROUNDS};
