//! Two-stage content verifier: external provider first, heuristic on failure.

use std::sync::Arc;

use factcheck_types::VerdictResult;
use tracing::{debug, warn};

use crate::{build_prompt, heuristic_verdict, ProviderError, VerdictProvider};

/// Result of [`ContentVerifier::verify`].
#[derive(Debug)]
pub struct VerifyOutcome {
    pub result: VerdictResult,
    /// Set when a configured provider failed and the heuristic answered instead.
    pub provider_error: Option<ProviderError>,
}

/// Produces a verdict for a piece of content.
#[derive(Clone, Default)]
pub struct ContentVerifier {
    provider: Option<Arc<dyn VerdictProvider>>,
}

impl ContentVerifier {
    /// A verifier that always uses the local heuristic.
    pub fn heuristic_only() -> Self {
        Self { provider: None }
    }

    pub fn with_provider(provider: Arc<dyn VerdictProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Ask the external provider for a verdict on `text`.
    pub async fn try_external_verdict(&self, text: &str) -> Result<String, ProviderError> {
        let provider = self.provider.as_ref().ok_or(ProviderError::NotConfigured)?;
        debug!(provider = provider.name(), "requesting external verdict");
        provider.generate(&build_prompt(text)).await
    }

    /// Verify `text`, falling back to the heuristic when the provider is
    /// absent or fails. Never returns an error.
    pub async fn verify(&self, text: &str, source_url: Option<&str>) -> VerifyOutcome {
        match self.try_external_verdict(text).await {
            Ok(raw) => VerifyOutcome {
                result: VerdictResult::ExternalProvider { raw },
                provider_error: None,
            },
            Err(ProviderError::NotConfigured) => VerifyOutcome {
                result: VerdictResult::Heuristic(heuristic_verdict(text, source_url)),
                provider_error: None,
            },
            Err(e) => {
                warn!("generative API error: {e}, falling back to heuristic");
                VerifyOutcome {
                    result: VerdictResult::Heuristic(heuristic_verdict(text, source_url)),
                    provider_error: Some(e),
                }
            }
        }
    }
}
