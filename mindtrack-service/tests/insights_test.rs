mod common;

use common::{mock_handle, test_config, TestApp};
use mindtrack_service::models::{InsightsMode, InsightsResponse};
use mindtrack_service::services::fallback::FALLBACK_INSIGHTS;
use mindtrack_service::services::providers::mock::MockTextProvider;
use mindtrack_service::services::Generator;
use serde_json::json;
use std::time::Instant;

async fn insights(app: &TestApp, body: serde_json::Value) -> InsightsResponse {
    let response = app.post_json("/get_mental_health_insights", body).await;
    assert_eq!(response.status().as_u16(), 200);
    response
        .json()
        .await
        .expect("Failed to parse insights response")
}

#[tokio::test]
async fn demo_insights_without_generator() {
    let app = TestApp::spawn(Generator::disabled()).await;

    let body = insights(
        &app,
        json!({"screen_time": "7h", "unlock_count": 140, "most_used_app": "TikTok"}),
    )
    .await;

    assert!(body.success);
    assert_eq!(body.mode, InsightsMode::Demo);
    assert!(body.insights.contains("Your daily screen time of 7h"));
    assert!(body.insights.contains("With 140 phone unlocks daily"));
    assert!(body.insights.contains("Your most used app is TikTok."));
    assert!(body.error.is_none());
    assert!(body.processing_time_seconds >= 0.0);
}

#[tokio::test]
async fn demo_path_waits_for_configured_delay() {
    let mut config = test_config();
    config.insights.demo_delay_ms = 200;
    let app = TestApp::spawn_with(config, Generator::disabled()).await;

    let start = Instant::now();
    let body = insights(&app, json!({})).await;

    assert_eq!(body.mode, InsightsMode::Demo);
    assert!(start.elapsed().as_millis() >= 200);
    assert!(body.processing_time_seconds >= 0.2);
}

#[tokio::test]
async fn demo_content_is_deterministic() {
    let app = TestApp::spawn(Generator::disabled()).await;
    let request = json!({"screen_time": "3h"});

    let first = insights(&app, request.clone()).await;
    let second = insights(&app, request).await;

    assert_eq!(first.mode, InsightsMode::Demo);
    assert_eq!(first.insights, second.insights);
}

#[tokio::test]
async fn generated_insights_are_returned_verbatim() {
    let text = "## Walk more\n\nYour screen time is high.";
    let (provider, handle) = mock_handle(MockTextProvider::with_text(text));
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    let body = insights(&app, json!({"profession": "teacher", "age": 41})).await;

    assert!(body.success);
    assert_eq!(body.mode, InsightsMode::Ai);
    assert_eq!(body.insights, text);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn upstream_failure_returns_fixed_fallback() {
    let (_, handle) = mock_handle(MockTextProvider::failing("deadline exceeded"));
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    let body = insights(&app, json!({})).await;

    assert!(!body.success);
    assert_eq!(body.mode, InsightsMode::Fallback);
    assert_eq!(body.insights, FALLBACK_INSIGHTS);
    assert_eq!(body.error.as_deref(), Some("API error: deadline exceeded"));
}

#[tokio::test]
async fn empty_answer_returns_fixed_fallback() {
    let (_, handle) = mock_handle(MockTextProvider::empty());
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    let body = insights(&app, json!({})).await;

    assert!(!body.success);
    assert_eq!(body.insights, FALLBACK_INSIGHTS);
    assert_eq!(
        body.error.as_deref(),
        Some("Invalid response received from AI service")
    );
}

#[tokio::test]
async fn malformed_body_returns_fixed_fallback() {
    let app = TestApp::spawn(Generator::disabled()).await;

    let response = app
        .post_raw("/get_mental_health_insights", "{\"weekly_moods\": 7}")
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: InsightsResponse = response.json().await.unwrap();
    assert!(!body.success);
    assert_eq!(body.mode, InsightsMode::Fallback);
    assert_eq!(body.insights, FALLBACK_INSIGHTS);
}
