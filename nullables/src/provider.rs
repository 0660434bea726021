//! Nullable verdict provider: scripted replies, recorded prompts.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use factcheck_verification::{ProviderError, VerdictProvider};

/// A provider that answers from a queue of scripted replies and records
/// every prompt it receives. An empty queue answers with a request failure.
pub struct NullProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl NullProvider {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose next reply is `text`.
    pub fn replying(text: &str) -> Self {
        let provider = Self::new();
        provider.enqueue(Ok(text.to_string()));
        provider
    }

    /// A provider whose next reply is `error`.
    pub fn failing(error: ProviderError) -> Self {
        let provider = Self::new();
        provider.enqueue(Err(error));
        provider
    }

    /// Queue a reply for the next `generate` call.
    pub fn enqueue(&self, reply: Result<String, ProviderError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Every prompt received so far (for assertions).
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for NullProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerdictProvider for NullProvider {
    fn name(&self) -> &str {
        "null"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::RequestFailed("no scripted reply".into())))
    }
}
