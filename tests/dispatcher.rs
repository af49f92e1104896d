mod common;

use common::{dispatcher_with, MockProvider, SALON_INFO};
use salon_chat::chat::{quick_reply, ConversationLog, Resolution, Utterance, FALLBACK_REPLY, QUICK_REPLIES};
use salon_chat::llm::models::{ChatOptions, Message, Role};

fn pairs(log: &ConversationLog) -> Vec<(Role, String)> {
    log.entries().iter().map(|e| (e.role(), e.content().to_string())).collect()
}

#[tokio::test]
async fn test_working_hours_quick_reply_scenario() {
    let provider = MockProvider::replying("unused");
    let dispatcher = dispatcher_with(provider.clone());
    let mut log = ConversationLog::new();

    let hours = quick_reply::find("hours").unwrap();
    let outcome = dispatcher.dispatch(&mut log, Utterance::QuickReply(hours)).await.unwrap();

    assert_eq!(outcome.resolution, Resolution::QuickReply);
    assert_eq!(
        pairs(&log),
        vec![
            (Role::User, "What are your salon working hours?".to_string()),
            (
                Role::Assistant,
                "Our salon is open Monday to Saturday from 9 AM to 7 PM, and on Sundays from 10 AM to 4 PM.".to_string()
            ),
        ]
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_every_quick_reply_uses_its_static_pair() {
    let provider = MockProvider::replying("unused");
    let dispatcher = dispatcher_with(provider.clone());
    let mut log = ConversationLog::new();

    for reply in QUICK_REPLIES.iter() {
        dispatcher.dispatch(&mut log, Utterance::QuickReply(reply)).await.unwrap();
        let last_two = &log.entries()[log.len() - 2..];
        assert_eq!(last_two[0].content(), reply.utterance);
        assert_eq!(last_two[1].content(), reply.response);
    }

    // Pressing the same control again gives the same pair.
    let booking = quick_reply::find("booking").unwrap();
    dispatcher.dispatch(&mut log, Utterance::QuickReply(booking)).await.unwrap();
    assert_eq!(log.entries()[log.len() - 2].content(), "I want to book an appointment.");

    assert_eq!(log.len(), 2 * (QUICK_REPLIES.len() + 1));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_salon_question_returns_info_verbatim() {
    let provider = MockProvider::replying("unused");
    let dispatcher = dispatcher_with(provider.clone());
    let mut log = ConversationLog::new();

    let outcome = dispatcher
        .dispatch(&mut log, Utterance::FreeText("Tell me about your salon".to_string()))
        .await
        .unwrap();

    assert_eq!(outcome.resolution, Resolution::SalonInfo);
    assert_eq!(log.entries()[1].content().as_bytes(), SALON_INFO.as_bytes());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_salon_question_matches_any_case() {
    let provider = MockProvider::replying("unused");
    let dispatcher = dispatcher_with(provider.clone());
    let mut log = ConversationLog::new();

    for text in [
        "What can you say ABOUT YOUR SALON?",
        "tElL mE aBoUt YoUr SaLoN",
        "I don't want to know about your salon",
    ] {
        let outcome = dispatcher.dispatch(&mut log, Utterance::FreeText(text.to_string())).await.unwrap();
        assert_eq!(outcome.reply, SALON_INFO);
        assert_eq!(log.entries()[log.len() - 2].content(), text);
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_free_text_calls_provider_once_with_full_context() {
    let provider = MockProvider::replying("We stock Olaplex and Kérastase.");
    let dispatcher = dispatcher_with(provider.clone());
    let mut log = ConversationLog::new();

    let location = quick_reply::find("location").unwrap();
    dispatcher.dispatch(&mut log, Utterance::QuickReply(location)).await.unwrap();

    let outcome = dispatcher
        .dispatch(&mut log, Utterance::FreeText("Do you sell hair products?".to_string()))
        .await
        .unwrap();

    assert_eq!(outcome.resolution, Resolution::Completion);
    assert_eq!(outcome.reply, "We stock Olaplex and Kérastase.");
    assert!(outcome.diagnostic.is_none());
    assert_eq!(provider.call_count(), 1);

    let calls = provider.calls();
    assert_eq!(
        calls[0],
        vec![
            Message::system("You are a helpful assistant at a salon."),
            Message::user("Where is your salon located?"),
            Message::assistant("We are located at 123 Amber Street, Kamloops, Canada. Come visit us anytime!"),
            Message::user("Do you sell hair products?"),
        ]
    );
    assert_eq!(log.entries()[3].content(), "We stock Olaplex and Kérastase.");
}

#[tokio::test]
async fn test_custom_system_prompt_leads_the_context() {
    let provider = MockProvider::replying("ok");
    let dispatcher = dispatcher_with(provider.clone()).with_system_prompt("You work the front desk.");
    let mut log = ConversationLog::new();

    dispatcher.dispatch(&mut log, Utterance::FreeText("Hi".to_string())).await.unwrap();

    assert_eq!(provider.calls()[0][0], Message::system("You work the front desk."));
}

#[tokio::test]
async fn test_completion_options_reach_the_provider() {
    let provider = MockProvider::replying("ok");
    let dispatcher = dispatcher_with(provider.clone()).with_options(ChatOptions {
        model: Some("llama-3.3-70b-versatile".to_string()),
        temperature: Some(0.2),
        max_tokens: Some(128),
    });
    let mut log = ConversationLog::new();

    dispatcher.dispatch(&mut log, Utterance::FreeText("Hi".to_string())).await.unwrap();

    let options = provider.options();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].model.as_deref(), Some("llama-3.3-70b-versatile"));
    assert_eq!(options[0].temperature, Some(0.2));
    assert_eq!(options[0].max_tokens, Some(128));
}

#[tokio::test]
async fn test_provider_failure_falls_back_scenario() {
    let provider = MockProvider::failing();
    let dispatcher = dispatcher_with(provider.clone());
    let mut log = ConversationLog::new();

    let outcome = dispatcher
        .dispatch(&mut log, Utterance::FreeText("Do you sell hair products?".to_string()))
        .await
        .unwrap();

    assert_eq!(outcome.resolution, Resolution::Fallback);
    assert_eq!(outcome.reply, FALLBACK_REPLY);
    assert_eq!(outcome.diagnostic.as_deref(), Some("Error: Network Error: connection refused"));
    assert_eq!(log.len(), 2);
    assert_eq!(log.entries()[1].role(), Role::Assistant);
    assert_eq!(log.entries()[1].content(), "Sorry, something went wrong. Please try again.");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_failure_grows_log_like_success() {
    let ok = MockProvider::replying("fine");
    let failing = MockProvider::failing();
    let mut ok_log = ConversationLog::new();
    let mut failing_log = ConversationLog::new();

    for _ in 0..3 {
        dispatcher_with(ok.clone())
            .dispatch(&mut ok_log, Utterance::FreeText("hello".to_string()))
            .await
            .unwrap();
        dispatcher_with(failing.clone())
            .dispatch(&mut failing_log, Utterance::FreeText("hello".to_string()))
            .await
            .unwrap();
    }

    assert_eq!(ok_log.len(), 6);
    assert_eq!(failing_log.len(), 6);
}

#[tokio::test]
async fn test_blank_text_is_ignored() {
    let provider = MockProvider::replying("unused");
    let dispatcher = dispatcher_with(provider.clone());
    let mut log = ConversationLog::new();

    for text in ["", "   ", "\n\t "] {
        assert!(dispatcher.dispatch(&mut log, Utterance::FreeText(text.to_string())).await.is_none());
    }

    assert!(log.is_empty());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_existing_entries_never_change() {
    let provider = MockProvider::replying("Sure, we can help.");
    let dispatcher = dispatcher_with(provider.clone());
    let mut log = ConversationLog::new();

    let inputs = vec![
        Utterance::QuickReply(quick_reply::find("availability").unwrap()),
        Utterance::FreeText("Can I bring my dog?".to_string()),
        Utterance::FreeText("Tell me about your salon".to_string()),
        Utterance::QuickReply(quick_reply::find("services").unwrap()),
        Utterance::FreeText("Thanks!".to_string()),
    ];

    for (k, utterance) in inputs.into_iter().enumerate() {
        let before = log.entries().to_vec();
        dispatcher.dispatch(&mut log, utterance).await.unwrap();
        assert_eq!(log.len(), 2 * (k + 1));
        assert_eq!(&log.entries()[..2 * k], before.as_slice());
        assert_eq!(log.entries()[2 * k].role(), Role::User);
        assert_eq!(log.entries()[2 * k + 1].role(), Role::Assistant);
    }
}
