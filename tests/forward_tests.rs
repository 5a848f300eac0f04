//! Integration tests for the miner's forward policy.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;

use promptminer::adapter::llm::testkit::MockLlm;
use promptminer::app::Miner;
use promptminer::config::Config;
use promptminer::domain::{FallbackPhrases, Synapse, Usage};
use promptminer::port::{Completion, EventSink, ForwardEvent};

fn usage(prompt: u64, completion: u64) -> Usage {
    Usage {
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: prompt + completion,
        total_cost: dec!(0.001),
    }
}

fn reply(text: &str, usage: Usage) -> Completion {
    Completion {
        text: text.into(),
        usage,
    }
}

/// Sink that stores every event it receives.
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<ForwardEvent>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<ForwardEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn record(&self, event: &ForwardEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[tokio::test]
async fn plain_completion_is_passed_through() {
    let llm = Arc::new(MockLlm::new().with_reply(reply("Bonjour", usage(10, 15))));
    let miner = Miner::new(llm.clone(), &Config::default());

    let synapse = miner
        .forward(Synapse::from_message("Translate 'hello' to French"))
        .await;

    assert_eq!(synapse.completion.as_deref(), Some("Bonjour"));
    assert_eq!(llm.call_count(), 1);

    let calls = llm.calls();
    assert_eq!(calls[0].user, "Translate 'hello' to French");
    assert_eq!(calls[0].system, Config::default().miner.system_prompt);

    let totals = miner.usage_totals();
    assert_eq!(totals.total_tokens, 25);
    assert_eq!(totals.prompt_tokens, 10);
    assert_eq!(totals.completion_tokens, 15);
    assert_eq!(totals.total_cost, dec!(0.001));
}

#[tokio::test]
async fn refusal_substitutes_a_fallback_phrase() {
    let llm = Arc::new(
        MockLlm::new()
            .with_reply(reply("I'm sorry, I cannot help with that", usage(12, 8)))
            .with_reply(reply("A fresh model answer", usage(40, 60))),
    );
    let miner = Miner::new(llm.clone(), &Config::default()).with_rng(StdRng::seed_from_u64(42));

    let synapse = miner
        .forward(Synapse::from_message("Tell me something"))
        .await;

    let completion = synapse.completion.expect("completion populated");
    let fallbacks = FallbackPhrases::default();
    assert!(fallbacks.contains(&completion), "not a fallback: {completion}");

    // The second call carried the phrase itself as the user message, and the
    // caller receives that phrase, not the second model answer.
    let calls = llm.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].user, completion);
    assert_ne!(completion, "A fresh model answer");

    // Deterministic under a seeded RNG.
    let expected = fallbacks
        .choose(&mut StdRng::seed_from_u64(42))
        .to_string();
    assert_eq!(completion, expected);

    // Only the primary call's usage is accounted.
    let totals = miner.usage_totals();
    assert_eq!(totals.total_tokens, 20);
    assert_eq!(totals.prompt_tokens, 12);
    assert_eq!(totals.completion_tokens, 8);
}

#[tokio::test]
async fn refusal_check_is_case_insensitive() {
    let llm = Arc::new(
        MockLlm::new()
            .with_reply(reply("I'M SORRY, but no.", usage(1, 1)))
            .with_reply(reply("ignored", Usage::default())),
    );
    let miner = Miner::new(llm.clone(), &Config::default()).with_rng(StdRng::seed_from_u64(1));

    let synapse = miner.forward(Synapse::from_message("hi")).await;

    assert!(FallbackPhrases::default().contains(&synapse.completion.unwrap()));
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn usage_totals_are_monotone_across_requests() {
    let llm = Arc::new(
        MockLlm::new()
            .with_reply(reply("one", usage(10, 10)))
            .with_reply(reply("two", usage(5, 5)))
            .with_reply(reply("three", Usage::default())),
    );
    let miner = Miner::new(llm.clone(), &Config::default());

    miner.forward(Synapse::from_message("a")).await;
    assert_eq!(miner.usage_totals().total_tokens, 20);

    miner.forward(Synapse::from_message("b")).await;
    assert_eq!(miner.usage_totals().total_tokens, 30);

    // A zero-usage call leaves the accumulator unchanged.
    let before = miner.usage_totals();
    miner.forward(Synapse::from_message("c")).await;
    assert_eq!(miner.usage_totals(), before);
}

#[tokio::test]
async fn empty_request_fails_before_contacting_the_api() {
    let llm = Arc::new(MockLlm::new().with_reply(reply("unreachable", Usage::default())));
    let miner = Miner::new(llm.clone(), &Config::default());

    let synapse = miner
        .forward(Synapse::new(vec!["user".into()], vec![]))
        .await;

    let completion = synapse.completion.expect("diagnostic completion");
    assert!(completion.starts_with("Error: "), "got: {completion}");
    assert!(completion.contains("messages"));
    assert_eq!(llm.call_count(), 0);

    let synapse = miner
        .forward(Synapse::new(vec![], vec!["hello".into()]))
        .await;
    assert!(synapse.completion.unwrap().contains("roles"));
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn api_failure_becomes_a_diagnostic_completion() {
    let llm = Arc::new(MockLlm::new().with_failure("rate limit exceeded"));
    let miner = Miner::new(llm, &Config::default());

    let synapse = miner.forward(Synapse::from_message("hello")).await;

    let completion = synapse.completion.expect("diagnostic completion");
    assert!(completion.starts_with("Error: "));
    assert!(completion.contains("rate limit exceeded"));
}

#[tokio::test]
async fn failed_fallback_call_also_becomes_a_diagnostic() {
    let llm = Arc::new(
        MockLlm::new()
            .with_reply(reply("i'm sorry", usage(3, 3)))
            .with_failure("connection reset"),
    );
    let miner = Miner::new(llm.clone(), &Config::default());

    let synapse = miner.forward(Synapse::from_message("hello")).await;

    let completion = synapse.completion.unwrap();
    assert!(completion.starts_with("Error: "));
    assert!(completion.contains("connection reset"));
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn stop_flag_is_raised_after_every_request_when_configured() {
    let mut config = Config::default();
    config.miner.stop_on_forward_exception = true;

    let llm = Arc::new(MockLlm::new().with_reply(reply("fine", Usage::default())));
    let miner = Miner::new(llm, &config);
    assert!(!miner.should_exit());

    // The flag is read unconditionally, so even a successful request stops
    // the serving loop.
    miner.forward(Synapse::from_message("hello")).await;
    assert!(miner.should_exit());
}

#[tokio::test]
async fn stop_flag_stays_down_by_default() {
    let llm = Arc::new(MockLlm::new().with_failure("boom"));
    let miner = Miner::new(llm, &Config::default());

    miner.forward(Synapse::from_message("hello")).await;
    assert!(!miner.should_exit());
}

#[tokio::test]
async fn telemetry_event_carries_prompt_completion_and_usage() {
    let sink = Arc::new(RecordingSink::default());
    let llm = Arc::new(MockLlm::new().with_reply(reply("Bonjour", usage(10, 15))));
    let miner = Miner::new(llm, &Config::default()).with_sink(sink.clone());

    miner
        .forward(Synapse::from_message("Translate 'hello' to French"))
        .await;

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.prompt, "Translate 'hello' to French");
    assert_eq!(event.completion, "Bonjour");
    assert_eq!(event.system_prompt, Config::default().miner.system_prompt);
    assert_eq!(event.usage.total_tokens, 25);
    assert_eq!(event.usage.accumulated_total_tokens, 25);
}

#[tokio::test]
async fn no_event_is_emitted_for_failed_requests() {
    let sink = Arc::new(RecordingSink::default());
    let llm = Arc::new(MockLlm::new().with_failure("boom"));
    let miner = Miner::new(llm, &Config::default()).with_sink(sink.clone());

    miner.forward(Synapse::from_message("hello")).await;
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn custom_fallback_set_is_honored() {
    let llm = Arc::new(
        MockLlm::new()
            .with_reply(reply("i'm sorry", usage(1, 1)))
            .with_reply(reply("ignored", Usage::default())),
    );
    let miner = Miner::new(llm, &Config::default())
        .with_fallbacks(FallbackPhrases::new(vec!["Only option.".into()]))
        .with_rng(StdRng::seed_from_u64(0));

    let synapse = miner.forward(Synapse::from_message("hello")).await;
    assert_eq!(synapse.completion.as_deref(), Some("Only option."));
}
