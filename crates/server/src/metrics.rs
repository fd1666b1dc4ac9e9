//! Prometheus metrics
//!
//! Counters are recorded through the `metrics` facade; without an installed
//! recorder they are no-ops.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use moodcast_core::MoodState;
use moodcast_funnel::FunnelRecommendation;

/// Install the global Prometheus recorder.
///
/// Returns `None` when a recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

pub fn record_mood_generated(mood: &MoodState) {
    metrics::counter!(
        "moodcast_moods_generated_total",
        "category" => mood.category.clone(),
        "intensity" => mood.intensity.as_str()
    )
    .increment(1);
}

/// `selected` when a hook was resolved, `none` when no template survived filtering
pub fn record_hook_selection(selected: bool) {
    let outcome = if selected { "selected" } else { "none" };
    metrics::counter!("moodcast_hooks_selected_total", "outcome" => outcome).increment(1);
}

pub fn record_funnel_message(recommendation: &FunnelRecommendation) {
    metrics::counter!(
        "moodcast_funnel_messages_total",
        "stage" => recommendation.stage.as_str()
    )
    .increment(1);
}

pub fn record_objection(recommendation: &FunnelRecommendation) {
    if let Some(kind) = recommendation.objection_type {
        metrics::counter!("moodcast_objections_total", "kind" => kind.as_str()).increment(1);
    }
}
