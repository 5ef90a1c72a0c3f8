//! Unit tests for parallel comparison across engines.

use crate::engine::{adapters::StaticCatalogSource, services::ModelRegistry};
use crate::translation::{
    adapters::{InMemoryTranslationBackend, ScriptedReply},
    domain::{FailureKind, TargetLanguage, TranslationRequest},
    ports::{BackendError, MockTranslationBackend},
    services::{ComparisonAggregator, DispatchPolicy, EngineDispatcher},
};
use rstest::{fixture, rstest};
use std::sync::Arc;
use std::time::{Duration, Instant};

type ScriptedAggregator =
    ComparisonAggregator<InMemoryTranslationBackend, InMemoryTranslationBackend>;

fn registry() -> Arc<ModelRegistry> {
    let source = StaticCatalogSource::new([
        ("OpenAI/GPT-4o", "gpt-4o"),
        ("OpenAI/GPT-4o-mini", "gpt-4o-mini"),
        ("Ollama/gemma-3-4b-it-gguf", "gemma3:4b-it-q4_K_M"),
        ("Ollama/gemma-3-27b-it-gguf", "gemma3:27b-it-q4_K_M"),
    ]);
    Arc::new(ModelRegistry::load(&source).expect("sample catalogue loads"))
}

struct Backends {
    hosted: Arc<InMemoryTranslationBackend>,
    local: Arc<InMemoryTranslationBackend>,
}

impl Backends {
    fn aggregator(&self) -> ScriptedAggregator {
        ComparisonAggregator::new(Arc::new(EngineDispatcher::new(
            registry(),
            Arc::clone(&self.hosted),
            Arc::clone(&self.local),
            DispatchPolicy::new(Duration::from_secs(5)),
        )))
    }
}

#[fixture]
fn backends() -> Backends {
    let hosted = Arc::new(InMemoryTranslationBackend::new());
    let local = Arc::new(InMemoryTranslationBackend::new());
    hosted
        .script("gpt-4o", [ScriptedReply::text("こんにちは")])
        .expect("script accepted");
    hosted
        .script("gpt-4o-mini", [ScriptedReply::text("やあ")])
        .expect("script accepted");
    local
        .script("gemma3:4b-it-q4_K_M", [ScriptedReply::text("こんにちは!")])
        .expect("script accepted");
    Backends { hosted, local }
}

fn hello() -> TranslationRequest {
    let target = TargetLanguage::parse("Japanese").expect("supported language");
    TranslationRequest::new("Hello", target).expect("valid request")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn results_follow_selection_order_not_completion_order(backends: Backends) {
    backends
        .local
        .script(
            "gemma3:4b-it-q4_K_M",
            [ScriptedReply::text("slow").after(Duration::from_millis(150))],
        )
        .expect("script accepted");
    let aggregator = backends.aggregator();

    let comparison = aggregator
        .compare_all(["Ollama/gemma-3-4b-it-gguf", "OpenAI/GPT-4o"], &hello())
        .await;

    assert_eq!(
        comparison.engines().collect::<Vec<_>>(),
        ["Ollama/gemma-3-4b-it-gguf", "OpenAI/GPT-4o"]
    );
    assert_eq!(comparison.success_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_engine_does_not_affect_others(backends: Backends) {
    let aggregator = backends.aggregator();

    let comparison = aggregator
        .compare_all(
            [
                "OpenAI/GPT-4o",
                "Ollama/gemma-3-27b-it-gguf",
                "OpenAI/GPT-9",
                "OpenAI/GPT-4o-mini",
            ],
            &hello(),
        )
        .await;

    let kinds: Vec<Option<FailureKind>> = comparison
        .results()
        .iter()
        .map(|result| result.failure_details().map(|failure| failure.kind()))
        .collect();
    assert_eq!(
        kinds,
        [
            None,
            Some(FailureKind::ModelNotFound),
            Some(FailureKind::UnknownEngine),
            None
        ]
    );
    assert_eq!(
        comparison
            .get("OpenAI/GPT-4o-mini")
            .and_then(|result| result.translated_text()),
        Some("やあ")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn engines_run_concurrently(backends: Backends) {
    let delay = Duration::from_millis(300);
    backends
        .hosted
        .script("gpt-4o", [ScriptedReply::text("a").after(delay)])
        .expect("script accepted");
    backends
        .hosted
        .script("gpt-4o-mini", [ScriptedReply::text("b").after(delay)])
        .expect("script accepted");
    backends
        .local
        .script("gemma3:4b-it-q4_K_M", [ScriptedReply::text("c").after(delay)])
        .expect("script accepted");
    let aggregator = backends.aggregator();

    let started = Instant::now();
    let comparison = aggregator
        .compare_all(
            [
                "OpenAI/GPT-4o",
                "OpenAI/GPT-4o-mini",
                "Ollama/gemma-3-4b-it-gguf",
            ],
            &hello(),
        )
        .await;

    assert_eq!(comparison.success_count(), 3);
    assert!(
        started.elapsed() < delay * 2,
        "comparison took {:?}",
        started.elapsed()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_flight_limit_serialises_calls(backends: Backends) {
    let delay = Duration::from_millis(100);
    backends
        .hosted
        .script("gpt-4o", [ScriptedReply::text("a").after(delay)])
        .expect("script accepted");
    backends
        .hosted
        .script("gpt-4o-mini", [ScriptedReply::text("b").after(delay)])
        .expect("script accepted");
    let aggregator = backends.aggregator().with_max_in_flight(Some(1));

    let started = Instant::now();
    let comparison = aggregator
        .compare_all(["OpenAI/GPT-4o", "OpenAI/GPT-4o-mini"], &hello())
        .await;

    assert_eq!(comparison.success_count(), 2);
    assert!(started.elapsed() >= delay * 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_names_are_compared_once(backends: Backends) {
    let aggregator = backends.aggregator();

    let comparison = aggregator
        .compare_all(
            ["OpenAI/GPT-4o", " OpenAI/GPT-4o-mini", "OpenAI/GPT-4o", "OpenAI/GPT-4o-mini "],
            &hello(),
        )
        .await;

    assert_eq!(
        comparison.engines().collect::<Vec<_>>(),
        ["OpenAI/GPT-4o", "OpenAI/GPT-4o-mini"]
    );
    assert_eq!(backends.hosted.call_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_selection_yields_empty_comparison(backends: Backends) {
    let aggregator = backends.aggregator();
    let comparison = aggregator.compare_all(Vec::<String>::new(), &hello()).await;
    assert!(comparison.is_empty());
    assert_eq!(backends.hosted.call_count() + backends.local.call_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rate_limited_engine_reports_rate_limit(backends: Backends) {
    backends
        .hosted
        .script(
            "gpt-4o",
            [ScriptedReply::error(BackendError::RateLimited {
                message: "busy".to_owned(),
                retry_after: Some(Duration::from_millis(1)),
            })],
        )
        .expect("script accepted");
    let aggregator = backends.aggregator();

    let comparison = aggregator
        .compare_all(["OpenAI/GPT-4o", "Ollama/gemma-3-4b-it-gguf"], &hello())
        .await;

    let rate_limited = comparison.get("OpenAI/GPT-4o").expect("present");
    assert_eq!(
        rate_limited.failure_details().map(|failure| failure.kind()),
        Some(FailureKind::RateLimit)
    );
    assert_eq!(rate_limited.attempts(), 3);
    assert!(
        comparison
            .get("Ollama/gemma-3-4b-it-gguf")
            .is_some_and(|result| result.is_success())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn panicking_engine_task_becomes_backend_failure() {
    let mut hosted = MockTranslationBackend::new();
    hosted
        .expect_translate()
        .returning(|_, _, _| panic!("adapter bug"));
    let local = InMemoryTranslationBackend::new();
    local
        .script("gemma3:4b-it-q4_K_M", [ScriptedReply::text("こんにちは")])
        .expect("script accepted");
    let aggregator = ComparisonAggregator::new(Arc::new(EngineDispatcher::new(
        registry(),
        Arc::new(hosted),
        Arc::new(local),
        DispatchPolicy::default(),
    )));

    let comparison = aggregator
        .compare_all(["OpenAI/GPT-4o", "Ollama/gemma-3-4b-it-gguf"], &hello())
        .await;

    assert_eq!(comparison.len(), 2);
    assert_eq!(
        comparison
            .get("OpenAI/GPT-4o")
            .and_then(|result| result.failure_details())
            .map(|failure| failure.kind()),
        Some(FailureKind::Backend)
    );
    assert!(comparison.results().get(1).is_some_and(|result| result.is_success()));
}
