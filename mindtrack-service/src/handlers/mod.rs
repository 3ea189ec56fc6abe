//! HTTP handlers for the MindTrack service.
//!
//! Every generation endpoint reads the raw body itself so that malformed
//! input ends in the endpoint's fallback payload rather than an extractor
//! rejection.

pub mod custom_tip;
pub mod health;
pub mod insights;
pub mod metrics;
pub mod tips;

pub use custom_tip::get_custom_tip;
pub use health::health_check;
pub use insights::get_mental_health_insights;
pub use metrics::metrics_endpoint;
pub use tips::get_gemini_tips;
