//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the helpers used by the
//! dispatcher and handlers.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Calling this more than once is harmless; only the first call installs a
/// recorder.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if METRICS_HANDLE.set(handle).is_err() {
                tracing::debug!("Metrics handle already initialized");
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Count one endpoint response by the mode it was served in.
pub fn record_generation(endpoint: &'static str, mode: &'static str, success: bool) {
    counter!(
        "mindtrack_generations_total",
        "endpoint" => endpoint,
        "mode" => mode,
        "success" => if success { "true" } else { "false" }
    )
    .increment(1);
}

/// Record latency and outcome of one upstream call.
pub fn record_provider_call(provider: &'static str, elapsed: Duration, ok: bool) {
    histogram!("mindtrack_provider_latency_seconds", "provider" => provider)
        .record(elapsed.as_secs_f64());

    if !ok {
        counter!("mindtrack_provider_errors_total", "provider" => provider).increment(1);
    }
}

/// Count tokens reported by an upstream for one call.
pub fn record_token_usage(provider: &'static str, input_tokens: i32, output_tokens: i32) {
    counter!(
        "mindtrack_provider_tokens_total",
        "provider" => provider,
        "direction" => "input"
    )
    .increment(input_tokens.max(0) as u64);
    counter!(
        "mindtrack_provider_tokens_total",
        "provider" => provider,
        "direction" => "output"
    )
    .increment(output_tokens.max(0) as u64);
}
