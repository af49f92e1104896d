#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use salon_chat::chat::{Dispatcher, SalonInfo};
use salon_chat::llm::{
    models::{ChatOptions, ChatResponse, Message},
    LlmError, LlmProvider,
};

pub const SALON_INFO: &str = "Amber Salon has been styling Kamloops since 2009.\n\nOur team of eight stylists...\n";

/// Records every request and answers with a fixed reply, or fails.
pub struct MockProvider {
    reply: Option<String>,
    calls: Mutex<Vec<Vec<Message>>>,
    options: Mutex<Vec<ChatOptions>>,
}

impl MockProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
            options: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { reply: None, calls: Mutex::new(Vec::new()), options: Mutex::new(Vec::new()) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn options(&self) -> Vec<ChatOptions> {
        self.options.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, messages: &[Message], options: ChatOptions) -> Result<ChatResponse, LlmError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.options.lock().unwrap().push(options.clone());
        match &self.reply {
            Some(reply) => Ok(ChatResponse {
                content: reply.clone(),
                model: options.model.unwrap_or_else(|| "mock-model".to_string()),
                usage: None,
            }),
            None => Err(LlmError::Network("connection refused".to_string())),
        }
    }
}

pub fn dispatcher_with(provider: Arc<MockProvider>) -> Dispatcher {
    Dispatcher::new(provider, SalonInfo::new(SALON_INFO))
}
