//! Content verification.
//!
//! Two-stage strategy:
//! 1. **External verdict**: when a provider is configured, the content is sent
//!    to a generative-language API and the generated text is returned as is.
//! 2. **Heuristic verdict**: a fixed keyword/topic/domain scorer, used when no
//!    provider is configured or the provider call fails for any reason.
//!
//! Provider failures are logged and never surfaced to the caller.

pub mod error;
pub mod google;
pub mod heuristic;
pub mod prompt;
pub mod provider;
pub mod verifier;

pub use error::ProviderError;
pub use google::{usable_api_key, GoogleGenerativeClient, GoogleProviderConfig};
pub use heuristic::heuristic_verdict;
pub use prompt::build_prompt;
pub use provider::VerdictProvider;
pub use verifier::{ContentVerifier, VerifyOutcome};
