use std::sync::Arc;
use tracing::{debug, error, info};

use crate::chat::{knowledge::SalonInfo, log::ConversationLog, quick_reply::QuickReply};
use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::llm::{
    models::{ChatOptions, Message},
    LlmProvider,
};

pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Something the user said, tagged with where it came from.
#[derive(Debug, Clone)]
pub enum Utterance {
    QuickReply(&'static QuickReply),
    FreeText(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    QuickReply,
    SalonInfo,
    Completion,
    /// The completion call failed and the fallback reply was used.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub resolution: Resolution,
    pub reply: String,
    /// Failure detail for the operator; only set on [`Resolution::Fallback`].
    pub diagnostic: Option<String>,
}

pub struct Dispatcher {
    provider: Arc<dyn LlmProvider>,
    salon_info: SalonInfo,
    system_prompt: String,
    options: ChatOptions,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn LlmProvider>, salon_info: SalonInfo) -> Self {
        Self {
            provider,
            salon_info,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            options: ChatOptions::default(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolves a reply for `utterance` and appends the exchange to `log`.
    ///
    /// Rules, first match wins:
    /// 1. quick replies answer with their canned text;
    /// 2. free text mentioning "about your salon" gets the salon info verbatim;
    /// 3. anything else goes to the completion provider, with the fallback
    ///    reply standing in if that call fails.
    ///
    /// Returns `None` for blank free text, leaving `log` untouched.
    pub async fn dispatch(&self, log: &mut ConversationLog, utterance: Utterance) -> Option<Outcome> {
        let (text, outcome) = match utterance {
            Utterance::QuickReply(reply) => {
                debug!("Quick reply '{}' selected", reply.id);
                let outcome = Outcome {
                    resolution: Resolution::QuickReply,
                    reply: reply.response.to_string(),
                    diagnostic: None,
                };
                (reply.utterance.to_string(), outcome)
            }
            Utterance::FreeText(text) => {
                if text.trim().is_empty() {
                    return None;
                }
                let outcome = self.resolve_free_text(log, &text).await;
                (text, outcome)
            }
        };

        log.append_exchange(text, outcome.reply.clone());
        Some(outcome)
    }

    async fn resolve_free_text(&self, log: &ConversationLog, text: &str) -> Outcome {
        if SalonInfo::answers(text) {
            debug!("Answering from salon info");
            return Outcome {
                resolution: Resolution::SalonInfo,
                reply: self.salon_info.text().to_string(),
                diagnostic: None,
            };
        }

        let context = self.completion_context(log, text);
        match self.provider.chat(&context, self.options.clone()).await {
            Ok(response) => {
                info!(
                    "Completion from {} ({}) with {} context messages",
                    self.provider.name(),
                    response.model,
                    context.len()
                );
                if let Some(usage) = &response.usage {
                    debug!(
                        "Token usage: {} prompt, {} completion",
                        usage.input_tokens, usage.output_tokens
                    );
                }
                Outcome {
                    resolution: Resolution::Completion,
                    reply: response.content,
                    diagnostic: None,
                }
            }
            Err(e) => {
                error!("Completion call to {} failed: {}", self.provider.name(), e);
                Outcome {
                    resolution: Resolution::Fallback,
                    reply: FALLBACK_REPLY.to_string(),
                    diagnostic: Some(format!("Error: {}", e)),
                }
            }
        }
    }

    /// System instruction, then the whole log, then the new utterance.
    fn completion_context(&self, log: &ConversationLog, text: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(log.len() + 2);
        messages.push(Message::system(self.system_prompt.clone()));
        messages.extend(log.to_messages());
        messages.push(Message::user(text));
        messages
    }
}
