//! External verdict provider seam.

use async_trait::async_trait;

use crate::ProviderError;

/// A text-generation service that answers a verification prompt.
///
/// The answer is opaque: callers pass it through without parsing.
#[async_trait]
pub trait VerdictProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Send `prompt` and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
