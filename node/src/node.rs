//! The factcheck node: wires storage, verification, and the HTTP server together.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use factcheck_rpc::{RouterOptions, RpcServer, RpcState, ServiceMetrics};
use factcheck_store::ReportStore;
use factcheck_store_json::JsonReportStore;
use factcheck_utils::SystemClock;
use factcheck_verification::{ContentVerifier, GoogleGenerativeClient};

use crate::config::ServiceConfig;
use crate::error::NodeError;
use crate::shutdown::ShutdownController;

pub struct FactcheckNode {
    config: ServiceConfig,
    store: Arc<JsonReportStore>,
    verifier: ContentVerifier,
    metrics: Arc<ServiceMetrics>,
    shutdown: ShutdownController,
}

impl FactcheckNode {
    /// Open the report store and build the verifier. Does not bind any socket.
    pub fn new(config: ServiceConfig) -> Result<Self, NodeError> {
        config.validate()?;

        let store = Arc::new(JsonReportStore::open_in_dir(
            &config.data_dir,
            config.max_reports,
        )?);

        let verifier = match config.provider_config() {
            Some(provider) => {
                let client = GoogleGenerativeClient::new(provider)?;
                tracing::info!(endpoint = client.endpoint(), "external verdict provider enabled");
                ContentVerifier::with_provider(Arc::new(client))
            }
            None => {
                tracing::info!("no usable GOOGLE_API_KEY, using heuristic verdicts only");
                ContentVerifier::heuristic_only()
            }
        };

        let metrics = Arc::new(ServiceMetrics::new());
        metrics.reports_stored.set(store.len()? as i64);

        tracing::info!(
            reports = store.len()?,
            path = %store.path().display(),
            "report store opened"
        );

        Ok(Self {
            config,
            store,
            verifier,
            metrics,
            shutdown: ShutdownController::new(),
        })
    }

    pub fn store(&self) -> Arc<JsonReportStore> {
        Arc::clone(&self.store)
    }

    pub fn has_provider(&self) -> bool {
        self.verifier.has_provider()
    }

    fn server(&self) -> RpcServer {
        let store: Arc<dyn ReportStore> = self.store.clone();
        let state = Arc::new(RpcState {
            store,
            verifier: self.verifier.clone(),
            clock: Arc::new(SystemClock),
            metrics: Arc::clone(&self.metrics),
        });
        let options = RouterOptions {
            static_dir: Some(self.config.static_dir.clone()),
            expose_metrics: self.config.enable_metrics,
        };
        RpcServer::with_state(state, options)
    }

    /// The full application router, for in-process use.
    pub fn router(&self) -> Router {
        self.server().router()
    }

    /// Bind the configured address and serve until SIGINT/SIGTERM or [`stop`](Self::stop).
    pub async fn run(&self) -> Result<(), NodeError> {
        let addr = self.config.listen_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("failed to bind {addr}: {e}");
            NodeError::Io(e)
        })?;
        self.run_on(listener).await
    }

    /// Serve on an already-bound listener. In-flight requests are drained on shutdown.
    pub async fn run_on(&self, listener: TcpListener) -> Result<(), NodeError> {
        self.server()
            .serve(listener, self.shutdown.stopped_or_signalled())
            .await?;
        tracing::info!("factcheck node stopped");
        Ok(())
    }

    /// Ask the server to finish in-flight requests and exit. Calling this
    /// before [`run_on`](Self::run_on) makes the server exit immediately.
    pub fn stop(&self) {
        tracing::info!("factcheck node stopping");
        self.shutdown.stop();
    }
}
