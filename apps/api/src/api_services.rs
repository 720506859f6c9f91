mod attempt_purge;
mod database;
mod state_builder;

pub use attempt_purge::spawn_attempt_purge;
pub use database::connect_and_migrate;
pub use state_builder::build_app_state;
