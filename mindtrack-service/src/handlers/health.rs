use crate::models::{HealthResponse, ServerInfo};
use crate::services::Slot;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

const FRAMEWORK_VERSION: &str = "axum 0.7";

/// `rustc --version` of the compiler that built this binary.
const RUNTIME_VERSION: &str = env!("MINDTRACK_RUSTC_VERSION");

/// Liveness endpoint with generator diagnostics.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match health_report(&state) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error in health check");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "error": e.to_string()
                })),
            )
                .into_response()
        }
    }
}

fn health_report(state: &AppState) -> anyhow::Result<serde_json::Value> {
    let report = HealthResponse {
        status: "healthy".to_string(),
        ai_status: if state.generator.is_available(Slot::Primary) {
            "active"
        } else {
            "disabled"
        }
        .to_string(),
        api_key_configured: state.config.api_key_configured(),
        custom_model_status: if state.generator.is_available(Slot::Custom) {
            "loaded"
        } else {
            "not_loaded"
        }
        .to_string(),
        timestamp: chrono::Local::now().to_rfc3339(),
        server_info: ServerInfo {
            platform: platform_name().to_string(),
            runtime_version: RUNTIME_VERSION.to_string(),
            framework_version: FRAMEWORK_VERSION.to_string(),
        },
    };

    Ok(serde_json::to_value(report)?)
}

fn platform_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        other => other,
    }
}
