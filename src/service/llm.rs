//! Shared LLM client and interaction utilities
//!
//! Provides a common interface for OpenAI API interactions used by the
//! free-text extraction path.

use rig::providers::openai;

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Self {
        Self {
            client: openai::Client::new(api_key),
        }
    }

    /// Get a reference to the underlying OpenAI client
    /// Use this to create extractors with custom configuration
    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_any_key_string() {
        // Construction is infallible; credential problems surface on the
        // first API call, not here.
        let client = LlmClient::new("sk-test");
        let _ = client.openai_client();
    }
}
