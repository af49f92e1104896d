//! Conversation state and the rules that decide how each utterance is answered.

pub mod dispatcher;
pub mod knowledge;
pub mod log;
pub mod quick_reply;

pub use dispatcher::{Dispatcher, Outcome, Resolution, Utterance, FALLBACK_REPLY};
pub use knowledge::SalonInfo;
pub use log::{ConversationLog, Entry};
pub use quick_reply::{QuickReply, QUICK_REPLIES};
