//! Movify content service composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod client_ip;
mod dto;
mod error;
mod grpc_service;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;

use movify_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, LedgerBackend, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{build_app_state, connect_and_migrate, spawn_attempt_purge};
use crate::grpc_service::ContentCallbacks;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let pool = connect_and_migrate(&config.database_url).await?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let app_state = build_app_state(pool, &config)?;
    if config.ledger_backend == LedgerBackend::Memory {
        spawn_attempt_purge(
            app_state.attempt_guard.clone(),
            config.attempt_retention,
            config.purge_interval,
        );
    }
    let callbacks = ContentCallbacks::new(
        app_state.user_service.clone(),
        app_state.content_service.clone(),
        app_state.episode_service.clone(),
    );
    let app = build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let grpc_address = config.grpc_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, %grpc_address, "movify-api listening");

    let rest_server = async {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
    };

    let grpc_server = async {
        tonic::transport::Server::builder()
            .add_service(callbacks.into_server())
            .serve(grpc_address)
            .await
            .map_err(|error| AppError::Internal(format!("grpc server error: {error}")))
    };

    tokio::try_join!(rest_server, grpc_server)?;
    Ok(())
}
