//! HTTP client for the Google Generative Language `generateText` API.
//!
//! `POST {base}/{version}/models/{model}:generateText?key={api_key}` with
//! `{"prompt":{"text":...},"temperature":0.2,"maxOutputTokens":600}`.
//! The generated text is read from `candidates[0].output`, falling back to a
//! top-level `output`, then to an empty string.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{ProviderError, VerdictProvider};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta2";
pub const DEFAULT_MODEL: &str = "text-bison-001";

const TEMPERATURE: f32 = 0.2;
const MAX_OUTPUT_TOKENS: u32 = 600;

/// Whether `key` looks like a real credential rather than a blank or a
/// `...` placeholder copied from an example env file.
pub fn usable_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && !trimmed.contains("...")
}

/// Connection settings for [`GoogleGenerativeClient`].
#[derive(Clone)]
pub struct GoogleProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub model: String,
    /// Whole-request timeout. `None` leaves the HTTP client default (no timeout).
    pub timeout: Option<Duration>,
}

impl GoogleProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateText",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.model
        )
    }
}

impl fmt::Debug for GoogleProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateTextRequest<'a> {
    prompt: TextPrompt<'a>,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct TextPrompt<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateTextResponse {
    #[serde(default)]
    candidates: Option<Vec<Option<Candidate>>>,
    #[serde(default)]
    output: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    output: Option<String>,
}

impl GenerateTextResponse {
    fn into_output(self) -> String {
        let first = self
            .candidates
            .and_then(|c| c.into_iter().next().flatten())
            .and_then(|c| c.output)
            .filter(|s| !s.is_empty());
        first.or(self.output).unwrap_or_default()
    }
}

/// Client for the `generateText` endpoint.
pub struct GoogleGenerativeClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGenerativeClient {
    pub fn new(config: GoogleProviderConfig) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ProviderError::RequestFailed(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: config.endpoint(),
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VerdictProvider for GoogleGenerativeClient {
    fn name(&self) -> &str {
        "google_generativelanguage"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = GenerateTextRequest {
            prompt: TextPrompt { text: prompt },
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };

        // Errors are stripped of their URL so the key never reaches the logs.
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Unreachable(format!("request timed out: {}", e.without_url()))
                } else if e.is_connect() {
                    ProviderError::Unreachable(format!("connection failed: {}", e.without_url()))
                } else {
                    ProviderError::RequestFailed(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed(format!(
                "HTTP status {status}: {}",
                detail.trim()
            )));
        }

        let parsed: GenerateTextResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!(
                "failed to parse generateText response: {}",
                e.without_url()
            ))
        })?;
        Ok(parsed.into_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> String {
        serde_json::from_str::<GenerateTextResponse>(json)
            .unwrap()
            .into_output()
    }

    #[test]
    fn endpoint_includes_version_and_model() {
        let mut config = GoogleProviderConfig::new("k");
        config.base_url = "http://localhost:9999/".into();
        assert_eq!(
            config.endpoint(),
            "http://localhost:9999/v1beta2/models/text-bison-001:generateText"
        );
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = GoogleProviderConfig::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn output_prefers_first_candidate() {
        assert_eq!(
            parse(r#"{"candidates":[{"output":"a"},{"output":"b"}],"output":"c"}"#),
            "a"
        );
    }

    #[test]
    fn output_falls_back_to_top_level_then_empty() {
        assert_eq!(parse(r#"{"candidates":[{"output":""}],"output":"c"}"#), "c");
        assert_eq!(parse(r#"{"candidates":[]}"#), "");
        assert_eq!(parse(r#"{}"#), "");
    }

    #[test]
    fn null_candidates_are_tolerated() {
        assert_eq!(parse(r#"{"candidates":null}"#), "");
        assert_eq!(parse(r#"{"candidates":null,"output":"c"}"#), "c");
        assert_eq!(parse(r#"{"candidates":[null],"output":"c"}"#), "c");
        assert_eq!(parse(r#"{"candidates":[{"output":null}]}"#), "");
    }

    #[test]
    fn request_body_uses_camel_case() {
        let body = GenerateTextRequest {
            prompt: TextPrompt { text: "p" },
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["prompt"]["text"], "p");
        assert_eq!(json["maxOutputTokens"], 600);
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn placeholder_keys_are_not_usable() {
        assert!(usable_api_key("AIzaSyExample"));
        assert!(!usable_api_key("   "));
        assert!(!usable_api_key("AIza..."));
    }
}
