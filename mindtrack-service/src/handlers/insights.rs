use crate::models::{InsightsMode, InsightsRequest, InsightsResponse, WellbeingMetrics};
use crate::services::fallback::{demo_insights, FALLBACK_INSIGHTS};
use crate::services::metrics::record_generation;
use crate::services::prompts::insights_prompt;
use crate::services::providers::GenerationParams;
use crate::services::{GenerationError, GenerationOutcome, Slot};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Json};
use std::time::Instant;

/// `POST /get_mental_health_insights`: long-form markdown insights.
pub async fn get_mental_health_insights(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<InsightsResponse> {
    let start = Instant::now();

    let (success, insights, mode, error) = match WellbeingMetrics::from_body(&body) {
        Ok(metrics) => {
            let request = InsightsRequest::from(metrics);
            tracing::debug!(?request, "Received insights request");

            let outcome = state
                .generator
                .generate(
                    Slot::Primary,
                    &insights_prompt(&request),
                    &GenerationParams::default(),
                )
                .await;

            match outcome {
                GenerationOutcome::Generated(text) => {
                    tracing::debug!(insights = %text, "Generated insights");
                    (true, text, InsightsMode::Ai, None)
                }
                GenerationOutcome::Unavailable => {
                    tracing::warn!("Using demo response since AI model is not available");
                    tokio::time::sleep(state.config.demo_delay()).await;
                    (true, demo_insights(&request), InsightsMode::Demo, None)
                }
                GenerationOutcome::Failed(e) => fallback(e),
            }
        }
        Err(e) => fallback(e.into()),
    };

    let processing_time_seconds = start.elapsed().as_secs_f64();
    tracing::info!(
        mode = mode.as_str(),
        success,
        processing_time_seconds,
        "Insights request processed"
    );
    record_generation("insights", mode.as_str(), success);

    Json(InsightsResponse {
        success,
        insights,
        mode,
        processing_time_seconds,
        error,
    })
}

fn fallback(error: GenerationError) -> (bool, String, InsightsMode, Option<String>) {
    tracing::error!(error = %error, "Error generating mental health insights");
    (
        false,
        FALLBACK_INSIGHTS.to_string(),
        InsightsMode::Fallback,
        Some(error.to_string()),
    )
}
