//! Unit tests for the hosted, local, and in-memory backend adapters.

use crate::engine::domain::ModelId;
use crate::translation::{
    adapters::{
        HostedApiBackend, HostedApiSettings, InMemoryTranslationBackend, LocalServerBackend,
        LocalServerSettings, ScriptedReply, hosted, http::ErrorDetails, local,
    },
    domain::{ApiKey, FailureKind, TargetLanguage},
    ports::{BackendError, TranslationBackend},
};
use reqwest::{StatusCode, Url};
use rstest::rstest;
use std::time::Duration;

fn model(id: &str) -> ModelId {
    ModelId::new(id).expect("non-empty model id")
}

fn japanese() -> TargetLanguage {
    TargetLanguage::parse("Japanese").expect("supported language")
}

#[rstest]
#[case(StatusCode::UNAUTHORIZED, FailureKind::Auth)]
#[case(StatusCode::FORBIDDEN, FailureKind::Auth)]
#[case(StatusCode::TOO_MANY_REQUESTS, FailureKind::RateLimit)]
#[case(StatusCode::BAD_REQUEST, FailureKind::Backend)]
#[case(StatusCode::INTERNAL_SERVER_ERROR, FailureKind::Backend)]
fn hosted_status_is_classified(#[case] status: StatusCode, #[case] expected: FailureKind) {
    let body = r#"{"error": {"message": "nope", "type": "error"}}"#;
    let err = hosted::classify_status(status, body, None);
    assert_eq!(err.kind(), expected);
    assert!(err.to_string().contains("nope"), "message lost: {err}");
}

#[rstest]
fn hosted_rate_limit_keeps_retry_after() {
    let err = hosted::classify_status(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error": {"message": "slow down", "code": "rate_limit_exceeded"}}"#,
        Some(Duration::from_secs(2)),
    );
    assert_eq!(
        err,
        BackendError::RateLimited {
            message: "429 Too Many Requests: slow down".to_owned(),
            retry_after: Some(Duration::from_secs(2)),
        }
    );
}

#[rstest]
fn exhausted_quota_is_not_retryable() {
    let err = hosted::classify_status(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error": {"message": "You exceeded your current quota", "code": "insufficient_quota"}}"#,
        None,
    );
    assert_eq!(err.kind(), FailureKind::Backend);
}

#[rstest]
fn hosted_extracts_first_choice() {
    let body = r#"{"choices": [
        {"message": {"role": "assistant", "content": "こんにちは"}},
        {"message": {"role": "assistant", "content": "やあ"}}
    ]}"#;
    assert_eq!(hosted::extract_translation(body), Ok("こんにちは".to_owned()));
}

#[rstest]
#[case(r#"{"choices": []}"#)]
#[case(r#"{"choices": [{"message": {"content": null}}]}"#)]
#[case(r#"{"choices": [{"message": {"content": "   "}}]}"#)]
#[case("<html>bad gateway</html>")]
fn hosted_empty_or_malformed_body_is_backend_error(#[case] body: &str) {
    let err = hosted::extract_translation(body).expect_err("no usable text");
    assert_eq!(err.kind(), FailureKind::Backend);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hosted_without_key_fails_with_auth_before_any_request() {
    // Port 9 (discard) on a reserved address; never contacted without a key.
    let base = Url::parse("http://192.0.2.1:9/v1").expect("valid url");
    let backend = HostedApiBackend::new(HostedApiSettings::new(base, Duration::from_secs(1)))
        .expect("adapter builds");

    let err = backend
        .translate(&model("gpt-4o-mini"), "Hello", japanese())
        .await
        .expect_err("missing key");

    assert_eq!(err.kind(), FailureKind::Auth);
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}

#[rstest]
fn hosted_settings_report_credential_presence() {
    let base = Url::parse(hosted::DEFAULT_HOSTED_BASE_URL).expect("valid url");
    let settings = HostedApiSettings::new(base, Duration::from_secs(60));
    assert!(!settings.has_api_key());
    let keyed = settings.with_api_key(Some(ApiKey::new("sk-test").expect("non-empty key")));
    assert!(keyed.has_api_key());
}

#[rstest]
fn local_not_found_names_the_pull_command() {
    let err = local::classify_status(
        StatusCode::NOT_FOUND,
        r#"{"error": "model \"gemma3:4b-it-q4_K_M\" not found, try pulling it first"}"#,
        &model("gemma3:4b-it-q4_K_M"),
    );
    assert_eq!(err.kind(), FailureKind::ModelNotFound);
    assert!(err.to_string().contains("ollama pull gemma3:4b-it-q4_K_M"));
}

#[rstest]
#[case("404 page not found")]
#[case("")]
#[case(r#"{"error": "not found"}"#)]
fn local_404_without_a_missing_model_is_backend_error(#[case] body: &str) {
    let err = local::classify_status(StatusCode::NOT_FOUND, body, &model("gemma3:4b-it-q4_K_M"));
    assert_eq!(err.kind(), FailureKind::Backend);
}

#[rstest]
fn local_404_naming_the_model_is_model_not_found() {
    let err = local::classify_status(
        StatusCode::NOT_FOUND,
        r#"{"error": "model 'gemma3:4b-it-q4_K_M' not found"}"#,
        &model("gemma3:4b-it-q4_K_M"),
    );
    assert_eq!(err.kind(), FailureKind::ModelNotFound);
}

#[rstest]
fn local_server_error_is_backend_error() {
    let err = local::classify_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error": "out of memory"}"#,
        &model("gemma3:27b-it-q4_K_M"),
    );
    assert_eq!(
        err,
        BackendError::Backend("local server returned 500 Internal Server Error: out of memory".to_owned())
    );
}

#[rstest]
fn local_extracts_message_content() {
    let body = r#"{"model": "gemma3", "message": {"role": "assistant", "content": "Hallo"}, "done": true}"#;
    assert_eq!(local::extract_translation(body), Ok("Hallo".to_owned()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_server_that_is_not_listening_is_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let address = listener.local_addr().expect("bound address");
    drop(listener);

    let endpoint = Url::parse(&format!("http://{address}")).expect("valid url");
    let backend = LocalServerBackend::new(LocalServerSettings::new(endpoint, Duration::from_secs(5)))
        .expect("adapter builds");

    let err = backend
        .translate(&model("gemma3:4b-it-q4_K_M"), "Hello", japanese())
        .await
        .expect_err("nothing is listening");

    assert_eq!(err.kind(), FailureKind::ServerUnreachable);
}

#[rstest]
#[case(r#"{"error": "plain"}"#, "plain", None)]
#[case(r#"{"error": {"message": "detailed", "code": "c1"}}"#, "detailed", Some("c1"))]
#[case(r#"{"error": {"message": "typed", "type": "t1"}}"#, "typed", Some("t1"))]
#[case("  gateway exploded  ", "gateway exploded", None)]
fn error_details_cover_known_shapes(
    #[case] body: &str,
    #[case] message: &str,
    #[case] code: Option<&str>,
) {
    let details = ErrorDetails::parse(body);
    assert_eq!(details.message, message);
    assert_eq!(details.code.as_deref(), code);
}

#[rstest]
fn error_details_truncate_long_bodies() {
    let body = "x".repeat(500);
    let details = ErrorDetails::parse(&body);
    assert!(details.message.ends_with("..."));
    assert_eq!(details.message.chars().count(), 203);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_memory_backend_replays_script_and_records_calls() {
    let backend = InMemoryTranslationBackend::new();
    backend
        .script(
            "gpt-4o",
            [
                ScriptedReply::error(BackendError::RateLimited {
                    message: "busy".to_owned(),
                    retry_after: None,
                }),
                ScriptedReply::text("こんにちは"),
            ],
        )
        .expect("script accepted");

    let first = backend.translate(&model("gpt-4o"), "Hello", japanese()).await;
    let second = backend.translate(&model("gpt-4o"), "Hello", japanese()).await;
    let third = backend.translate(&model("gpt-4o"), "Hello", japanese()).await;

    assert_eq!(first.map_err(|err| err.kind()), Err(FailureKind::RateLimit));
    assert_eq!(second, Ok("こんにちは".to_owned()));
    assert_eq!(third, Ok("こんにちは".to_owned()));
    let calls = backend.calls().expect("calls readable");
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|call| call.source_text == "Hello"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_memory_backend_reports_unscripted_model_as_missing() {
    let backend = InMemoryTranslationBackend::new();
    let err = backend
        .translate(&model("unknown:latest"), "Hello", japanese())
        .await
        .expect_err("no script");
    assert_eq!(err, BackendError::ModelNotFound(model("unknown:latest")));
}

#[rstest]
fn in_memory_backend_rejects_empty_script() {
    let backend = InMemoryTranslationBackend::new();
    let result = backend.script("gpt-4o", Vec::new());
    assert_eq!(result.map_err(|err| err.kind()), Err(FailureKind::Backend));
}
