//! Domain models for the MindTrack service.

pub mod request;
pub mod response;

pub use request::{
    parse_screen_time_minutes, CustomTipRequest, InsightsRequest, PayloadError, TipsRequest,
    WellbeingMetrics,
};
pub use response::{
    CustomTipResponse, FailureResponse, HealthResponse, InsightsMode, InsightsResponse,
    ServerInfo, TipsMode, TipsResponse,
};
