//! Web server for filevault.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use crate::auth::SessionManager;
use crate::config::Config;
use crate::{Result, VaultError};

use super::handlers::AppState;
use super::router::create_router;

/// HTTP server for the file API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
    /// Request body limit in bytes.
    body_limit: usize,
    /// Interval between expired-session purges.
    cleanup_interval: Duration,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, app_state: AppState) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| {
                VaultError::Config(format!(
                    "invalid server address {}:{}: {e}",
                    config.server.host, config.server.port
                ))
            })?;

        let body_limit = usize::try_from(config.files.max_upload_size_mb)
            .unwrap_or(usize::MAX / (1024 * 1024))
            .saturating_mul(1024 * 1024);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.server.cors_origins.clone(),
            body_limit,
            cleanup_interval: Duration::from_secs(config.session.cleanup_interval_secs.max(1)),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session cleanup background task.
    fn start_session_cleanup_task(sessions: Arc<SessionManager>, period: Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                match sessions.cleanup().await {
                    Ok(count) if count > 0 => {
                        tracing::info!(deleted_count = count, "Purged expired sessions");
                    }
                    Ok(_) => tracing::debug!("No expired sessions to purge"),
                    Err(e) => tracing::warn!(error = %e, "Failed to purge expired sessions"),
                }
            }
        });
    }

    fn into_router(self) -> (Router, Arc<SessionManager>, Duration) {
        let sessions = self.app_state.sessions.clone();
        let router = create_router(self.app_state, &self.cors_origins, self.body_limit);
        (router, sessions, self.cleanup_interval)
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let addr = self.addr;
        let (router, sessions, period) = self.into_router();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        // Start after a successful bind
        Self::start_session_cleanup_task(sessions, period);
        tracing::info!(interval_secs = period.as_secs(), "Session cleanup task started");

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let addr = self.addr;
        let (router, sessions, period) = self.into_router();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(sessions, period);
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
