//! Axum-based HTTP server.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use factcheck_store::ReportStore;
use factcheck_utils::Clock;
use factcheck_verification::ContentVerifier;

use crate::error::RpcError;
use crate::handlers;
use crate::metrics::ServiceMetrics;

/// Maximum accepted request body.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Shared state handed to every handler.
pub struct RpcState {
    pub store: Arc<dyn ReportStore>,
    pub verifier: ContentVerifier,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<ServiceMetrics>,
}

/// Optional surfaces of the router.
#[derive(Clone, Debug, Default)]
pub struct RouterOptions {
    /// Directory served for every non-API `GET`. `None` answers 404.
    pub static_dir: Option<PathBuf>,
    /// Mount `GET /metrics`.
    pub expose_metrics: bool,
}

/// Build the application router.
pub fn router(state: Arc<RpcState>, options: &RouterOptions) -> Router {
    let mut api = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/verify", post(handlers::verify))
        .route("/api/report", post(handlers::submit_report))
        .route("/api/reports", get(handlers::list_reports));
    if options.expose_metrics {
        api = api.route("/metrics", get(handlers::metrics));
    }

    let mut app = api.with_state(state);
    if let Some(dir) = &options.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// The HTTP server: shared state plus the optional router surfaces.
pub struct RpcServer {
    state: Arc<RpcState>,
    options: RouterOptions,
}

impl RpcServer {
    pub fn with_state(state: Arc<RpcState>, options: RouterOptions) -> Self {
        Self { state, options }
    }

    pub fn router(&self) -> Router {
        router(Arc::clone(&self.state), &self.options)
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), RpcError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("Server listening on port {}", local.port());
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}
