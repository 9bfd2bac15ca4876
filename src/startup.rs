//! Application Startup
//!
//! Application building and server initialization.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::config::{ServerSettings, Settings};
use crate::infrastructure::database;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging, rate_limit::RateLimiters};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub limiters: RateLimiters,
    pub settings: Arc<Settings>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        database::run_migrations(&db).await?;
        tracing::info!("Database migrations applied");

        let limiters = RateLimiters::from_settings(&settings.rate_limit);

        // Anchor the uptime clock before the first readiness probe
        crate::presentation::http::handlers::health::init_server_start();

        // Create app state
        let state = AppState {
            db,
            limiters,
            settings: Arc::new(settings.clone()),
        };

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let addr = bind_addr(&settings.server)?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Socket address from the configured host and port.
fn bind_addr(server: &ServerSettings) -> Result<SocketAddr> {
    let ip: IpAddr = server
        .host
        .parse()
        .with_context(|| format!("invalid server.host: {}", server.host))?;
    Ok(SocketAddr::new(ip, server.port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_uses_configured_host() {
        let addr = bind_addr(&ServerSettings {
            host: "127.0.0.1".into(),
            port: 8080,
        })
        .unwrap();

        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bind_addr_rejects_unparseable_host() {
        let result = bind_addr(&ServerSettings {
            host: "not-an-ip".into(),
            port: 8080,
        });

        assert!(result.is_err());
    }
}
