mod common;

use common::{mock_handle, TestApp};
use mindtrack_service::models::{TipsMode, TipsResponse};
use mindtrack_service::services::fallback::FALLBACK_TIPS;
use mindtrack_service::services::providers::mock::MockTextProvider;
use mindtrack_service::services::Generator;
use serde_json::json;

async fn tips(app: &TestApp, body: serde_json::Value) -> TipsResponse {
    let response = app.post_json("/get_gemini_tips", body).await;
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.expect("Failed to parse tips response")
}

#[tokio::test]
async fn fallback_tips_without_generator() {
    let app = TestApp::spawn(Generator::disabled()).await;

    let body = tips(&app, json!({"anxiety_level": 9, "screen_time": "6h"})).await;

    assert!(body.success);
    assert_eq!(body.mode, TipsMode::Fallback);
    assert_eq!(body.tips, FALLBACK_TIPS.to_vec());
    assert!(body.error.is_none());
}

#[tokio::test]
async fn fallback_path_is_deterministic() {
    let app = TestApp::spawn(Generator::disabled()).await;
    let request = json!({"stress_level": 2, "weekly_moods": {"Monday": "ok"}});

    let first = app
        .post_json("/get_gemini_tips", request.clone())
        .await
        .bytes()
        .await
        .unwrap();
    let second = app
        .post_json("/get_gemini_tips", request)
        .await
        .bytes()
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn generated_tips_are_normalized() {
    let (provider, handle) =
        mock_handle(MockTextProvider::with_text("1. Breathe\n2. Walk\n3. Sleep\n4. Extra"));
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    let body = tips(&app, json!({"mood_description": "anxious"})).await;

    assert!(body.success);
    assert_eq!(body.mode, TipsMode::Gemini);
    assert_eq!(body.tips, vec!["Breathe", "Walk", "Sleep"]);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn short_answer_is_padded_from_fallback() {
    let (_, handle) = mock_handle(MockTextProvider::with_text("- Call a friend tonight"));
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    let body = tips(&app, json!({})).await;

    assert_eq!(body.mode, TipsMode::Gemini);
    assert_eq!(
        body.tips,
        vec!["Call a friend tonight", FALLBACK_TIPS[1], FALLBACK_TIPS[2]]
    );
}

#[tokio::test]
async fn upstream_failure_returns_fallback_with_error() {
    let (_, handle) = mock_handle(MockTextProvider::failing("quota exceeded"));
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    let body = tips(&app, json!({})).await;

    assert!(!body.success);
    assert_eq!(body.mode, TipsMode::Fallback);
    assert_eq!(body.tips, FALLBACK_TIPS.to_vec());
    assert_eq!(body.error.as_deref(), Some("API error: quota exceeded"));
}

#[tokio::test]
async fn empty_upstream_answer_is_a_failure() {
    let (_, handle) = mock_handle(MockTextProvider::empty());
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    let body = tips(&app, json!({})).await;

    assert!(!body.success);
    assert_eq!(
        body.error.as_deref(),
        Some("Invalid response received from AI service")
    );
}

#[tokio::test]
async fn malformed_bodies_still_yield_three_tips() {
    let (provider, handle) = mock_handle(MockTextProvider::with_text("unused"));
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    for raw in [
        "",
        "{not json",
        "[1, 2, 3]",
        "[9, 8, \"6h\", 120]",
        "{\"anxiety_level\": \"high\"}",
    ] {
        let response = app.post_raw("/get_gemini_tips", raw).await;
        assert_eq!(response.status().as_u16(), 200, "body {:?}", raw);

        let body: TipsResponse = response.json().await.unwrap();
        assert!(!body.success, "body {:?}", raw);
        assert_eq!(body.tips.len(), 3);
        assert!(body.tips.iter().all(|t| !t.is_empty()));
        assert!(body.error.is_some());
    }

    // Payload errors never reach the upstream
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn positional_array_body_is_not_sent_upstream() {
    let (provider, handle) = mock_handle(MockTextProvider::with_text("1. Breathe"));
    let app = TestApp::spawn(Generator::new(handle, None)).await;

    let body: TipsResponse = app
        .post_raw("/get_gemini_tips", "[9, 8, \"6h\", 120]")
        .await
        .json()
        .await
        .unwrap();

    assert!(!body.success);
    assert_eq!(body.mode, TipsMode::Fallback);
    assert_eq!(body.tips, FALLBACK_TIPS.to_vec());
    assert_eq!(
        body.error.as_deref(),
        Some("Request body must be a JSON object")
    );
    assert_eq!(provider.calls(), 0);
}
