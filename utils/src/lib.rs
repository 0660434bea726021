//! Shared utilities for the factcheck service.

pub mod clock;
pub mod logging;

pub use clock::{Clock, SystemClock};
pub use logging::{init_logging, LogFormat};
