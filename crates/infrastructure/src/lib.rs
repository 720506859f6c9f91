//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod grpc_auth_gateway;
mod in_memory_attempt_ledger;
mod postgres_attempt_ledger;
mod postgres_content_repository;
mod postgres_episode_repository;
mod postgres_personal_list_repository;
mod postgres_user_repository;

#[cfg(test)]
mod test_support;

pub use grpc_auth_gateway::{GrpcAuthGateway, proto as auth_proto};
pub use in_memory_attempt_ledger::InMemoryAttemptLedger;
pub use postgres_attempt_ledger::PostgresAttemptLedger;
pub use postgres_content_repository::PostgresContentRepository;
pub use postgres_episode_repository::PostgresEpisodeRepository;
pub use postgres_personal_list_repository::PostgresPersonalListRepository;
pub use postgres_user_repository::PostgresUserRepository;

