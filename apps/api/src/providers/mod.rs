//! Completion backends — every LLM call in the service goes through the
//! `CompletionBackend` trait. One implementation per provider; adding a
//! provider means adding a variant implementation, not a branch.

use async_trait::async_trait;
use thiserror::Error;

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicBackend;
pub use openai::OpenAiBackend;

/// Token ceiling for the primary match analysis, identical on both providers.
pub const ANALYSIS_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Uniform "send prompt, get text" contract over two distinct backend
/// calling conventions.
///
/// Failure semantics: errors propagate to the orchestrator unretried; the
/// caller surfaces them to the user rather than proceeding with a partial
/// result.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Display name used for the comparison table columns.
    fn name(&self) -> &'static str;

    /// Token ceiling for the improvement-suggestion call on this provider.
    fn suggestion_max_tokens(&self) -> u32;

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{CompletionBackend, LlmError};

    /// Stub backend that records prompts and counts calls.
    pub(crate) struct StubBackend {
        pub name: &'static str,
        pub response: String,
        pub calls: AtomicUsize,
        pub prompts: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl StubBackend {
        pub(crate) fn new(name: &'static str, response: &str) -> Self {
            Self {
                name,
                response: response.to_string(),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub(crate) fn failing(name: &'static str) -> Self {
            Self {
                fail: true,
                ..Self::new(name, "")
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        fn suggestion_max_tokens(&self) -> u32 {
            600
        }

        async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(LlmError::Api {
                    status: 401,
                    message: "invalid api key".to_string(),
                });
            }
            Ok(self.response.clone())
        }
    }
}
