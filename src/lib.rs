mod api;
mod config;
mod database;
#[cfg(test)]
mod memory;
mod models;
mod repo;
mod schema;
mod service;

use axum::{serve::Serve, Router};
use tokio::net::TcpListener;
use tracing::info;

pub use api::{build_app, ApiError};
pub use crate::config::{Config, ConfigError};
pub use database::{create_db_pool, DatabaseBookRepo, DatabaseError};
pub use models::{Book, BookPayload, NewBook, ValidationError};
pub use repo::BookRepo;
pub use service::{BookService, ServiceError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to create DB connection pool: {0}")]
    Pool(#[from] diesel_async::pooled_connection::PoolError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },
}

pub async fn start_server(
    config: &Config,
) -> Result<Serve<TcpListener, Router, Router>, StartupError> {
    let pool = create_db_pool(&config.database_url, config.db_pool_size).await?;
    let repo = DatabaseBookRepo::new(pool);

    let router = build_app(repo);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    info!("Listening on {}", config.bind_addr);

    Ok(axum::serve(listener, router))
}
