use minijinja::{Environment, Value};
use serde::Serialize;

use super::markdown;
use crate::chat::{Entry, QuickReply, QUICK_REPLIES};

const CHAT_TEMPLATE: &str = include_str!("../../templates/chat.html");

pub const PAGE_TITLE: &str = "💇‍♀️ Amber Salon - ChatBot";

#[derive(Debug, Serialize)]
pub struct ChatView<'a> {
    pub title: &'a str,
    pub quick_replies: &'a [QuickReply],
    pub entries: &'a [Entry],
    pub diagnostic: Option<&'a str>,
    pub scroll_to_input: bool,
}

impl<'a> ChatView<'a> {
    pub fn new(entries: &'a [Entry]) -> Self {
        Self {
            title: PAGE_TITLE,
            quick_replies: &QUICK_REPLIES,
            entries,
            diagnostic: None,
            scroll_to_input: false,
        }
    }
}

/// Renders the whole chat page. `.html` templates are auto-escaped; message
/// text goes through the `markdown` filter, which never passes raw HTML on.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_filter("markdown", |source: &str| Value::from_safe_string(markdown::to_html(source)));
        env.add_template("chat.html", CHAT_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &ChatView<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template("chat.html")?.render(view)
    }
}
