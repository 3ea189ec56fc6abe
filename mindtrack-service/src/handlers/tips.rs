use crate::models::{TipsMode, TipsRequest, TipsResponse, WellbeingMetrics};
use crate::services::fallback::fallback_tips;
use crate::services::metrics::record_generation;
use crate::services::prompts::tips_prompt;
use crate::services::providers::GenerationParams;
use crate::services::{normalize_tips, GenerationOutcome, Slot};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Json};

/// `POST /get_gemini_tips`: always answers with exactly three tips.
pub async fn get_gemini_tips(State(state): State<AppState>, body: Bytes) -> Json<TipsResponse> {
    let outcome = match WellbeingMetrics::from_body(&body) {
        Ok(metrics) => {
            let request = TipsRequest::from(metrics);
            state
                .generator
                .generate(
                    Slot::Primary,
                    &tips_prompt(&request),
                    &GenerationParams::default(),
                )
                .await
        }
        Err(e) => GenerationOutcome::Failed(e.into()),
    };

    let response = tips_response(outcome);
    record_generation("tips", response.mode.as_str(), response.success);
    Json(response)
}

fn tips_response(outcome: GenerationOutcome) -> TipsResponse {
    match outcome {
        GenerationOutcome::Generated(text) => {
            let tips = normalize_tips(&text);
            tracing::info!(count = tips.len(), "Generated Gemini tips successfully");
            TipsResponse {
                success: true,
                tips,
                mode: TipsMode::Gemini,
                error: None,
            }
        }
        GenerationOutcome::Unavailable => {
            tracing::warn!("Using fallback tips since Gemini model is not available");
            TipsResponse {
                success: true,
                tips: fallback_tips(),
                mode: TipsMode::Fallback,
                error: None,
            }
        }
        GenerationOutcome::Failed(e) => {
            tracing::error!(error = %e, "Error generating Gemini tips");
            TipsResponse {
                success: false,
                tips: fallback_tips(),
                mode: TipsMode::Fallback,
                error: Some(e.to_string()),
            }
        }
    }
}
