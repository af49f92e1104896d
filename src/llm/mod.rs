pub mod groq;
pub mod models;

use groq::GroqProvider;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::AppConfig;
use models::{ChatOptions, ChatResponse, Message};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network Error: {0}")]
    Network(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("API Error: {0}")]
    Api(String),
    #[error("Rate Limited")]
    RateLimited,
    #[error("Invalid Response: {0}")]
    InvalidResponse(String),
    #[error("Client Error: {0}")]
    Client(String),
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Issues exactly one completion request for `messages`, in order.
    async fn chat(&self, messages: &[Message], options: ChatOptions) -> Result<ChatResponse, LlmError>;
}

pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_default(config: &AppConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let provider = GroqProvider::new(
            config.groq_api_key.clone(),
            config.llm.api_base.clone(),
            config.llm.model.clone(),
            Duration::from_secs(config.llm.timeout_secs),
        )?;
        Ok(Arc::new(provider))
    }
}
