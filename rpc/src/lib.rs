//! HTTP/JSON API for the factcheck service.
//!
//! Provides endpoints for:
//! - Health check (`GET /api/health`)
//! - Content verification (`POST /api/verify`)
//! - Report submission and listing (`POST /api/report`, `GET /api/reports`)
//! - Prometheus metrics (`GET /metrics`, optional)
//! - Static frontend files for every other `GET`

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod server;

pub use error::RpcError;
pub use metrics::ServiceMetrics;
pub use server::{router, RouterOptions, RpcServer, RpcState, BODY_LIMIT_BYTES};
