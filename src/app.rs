//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use crate::model::{Config, MapperConfig};
use crate::service::{LlmClient, ParserService};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Framework document parser (LLM-backed for text/PDF when configured)
    pub parser_service: ParserService,
    /// Control mapper tuning shared with handlers
    pub mapper_config: MapperConfig,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// The LLM client is optional: without an `OPENAI_API_KEY` the service
    /// still runs, and only the text/PDF ingestion paths report a
    /// configuration error.
    pub fn new(config: Config) -> Self {
        let llm_client = match std::env::var("OPENAI_API_KEY") {
            Ok(api_key) => {
                tracing::info!("LLM extraction enabled");
                Some(LlmClient::new(&api_key))
            }
            Err(_) => {
                tracing::warn!(
                    "OPENAI_API_KEY not set, text/PDF framework ingestion disabled"
                );
                None
            }
        };

        let parser_service = ParserService::new(llm_client);

        Self {
            parser_service,
            mapper_config: config.mapper,
        }
    }
}
