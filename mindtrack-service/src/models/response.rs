//! Response bodies returned by the HTTP endpoints.

use serde::{Deserialize, Serialize};

/// Which path produced the tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipsMode {
    Gemini,
    Fallback,
}

/// Which path produced the insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightsMode {
    Ai,
    Demo,
    Fallback,
}

impl TipsMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TipsMode::Gemini => "gemini",
            TipsMode::Fallback => "fallback",
        }
    }
}

impl InsightsMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InsightsMode::Ai => "ai",
            InsightsMode::Demo => "demo",
            InsightsMode::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipsResponse {
    pub success: bool,
    pub tips: Vec<String>,
    pub mode: TipsMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub success: bool,
    pub insights: String,
    pub mode: InsightsMode,
    pub processing_time_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomTipResponse {
    pub success: bool,
    pub tip: String,
    pub using_custom_model: bool,
}

/// Body of a 500 response from `/get_custom_tip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ai_status: String,
    pub api_key_configured: bool,
    pub custom_model_status: String,
    pub timestamp: String,
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub platform: String,
    pub runtime_version: String,
    pub framework_version: String,
}
