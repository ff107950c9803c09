//! User Service Library
//!
//! This crate provides user management (get, list, create, update, delete)
//! via gRPC, over either an in-memory or a Postgres storage backend.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::{StorageBackend, UserServiceConfig};
use crate::grpc::UserGrpcService;
use crate::infra::Database;
use crate::repository::{MemoryUserStore, UserRepository, UserStore};
use crate::service::UserManager;

/// Run the user service, binding to the given host and port.
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig {
        host: host.to_string(),
        port,
        ..UserServiceConfig::from_env()?
    };
    run_server_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env()?;
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for migration in status {
                let marker = if migration.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, migration.name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Build the storage backend named in the configuration.
pub async fn build_repository(
    config: &UserServiceConfig,
) -> Result<Arc<dyn UserRepository>, Box<dyn std::error::Error>> {
    let repo: Arc<dyn UserRepository> = match config.storage {
        StorageBackend::Memory => Arc::new(MemoryUserStore::new()),
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            db.ping().await?;
            Arc::new(UserStore::new(db.get_connection()))
        }
    };
    info!(storage = %config.storage, "Storage backend ready");
    Ok(repo)
}

/// Wire a repository into the gRPC service.
pub fn build_grpc_service(repo: Arc<dyn UserRepository>) -> UserGrpcService {
    let user_service = Arc::new(UserManager::new(repo));
    UserGrpcService::new(user_service)
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = build_repository(&config).await?;
    let grpc_service = build_grpc_service(repo);

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("User service listening on {}", addr);

    // Run server; requests still running past the deadline are cancelled
    Server::builder()
        .timeout(config.request_timeout())
        .add_service(proto::UserServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("User service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
