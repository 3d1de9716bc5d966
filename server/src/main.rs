mod config;
mod routes;

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, ServerConfig};

/// Why the server stopped before or while serving.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid server configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: std::io::Error },

    #[error("failed to assemble router: {0}")]
    Router(String),

    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal outside local development.
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    match run(ServerConfig::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "portal stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Result<ServerConfig, ConfigError>) -> Result<(), StartupError> {
    let addr = config?.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    let app = routes::app().map_err(StartupError::Router)?;

    tracing::info!(%addr, "portal listening");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
