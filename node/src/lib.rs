//! The factcheck service.
//!
//! Loads configuration, opens the report store, chooses between the external
//! verdict provider and the heuristic, and runs the HTTP server until a
//! shutdown signal arrives.

pub mod config;
pub mod error;
pub mod node;
pub mod shutdown;

pub use config::{ApiKey, ServiceConfig};
pub use error::NodeError;
pub use node::FactcheckNode;
pub use shutdown::ShutdownController;
