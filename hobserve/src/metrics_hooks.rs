//! Metrics-based observability hooks for factory checkpoints.
//!
//! ```rust
//! use hobserve::MetricsObservabilityHooks;
//! use hfactory::FactoryRuntimeHooks;
//!
//! fn accepts_factory_hooks(_hooks: &dyn FactoryRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_factory_hooks(&hooks);
//! ```

use std::time::Duration;

use hfactory::{CheckpointKind, FactoryError, FactoryRuntimeHooks, TeardownMode};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl FactoryRuntimeHooks for MetricsObservabilityHooks {
    fn on_launch_start(&self, application_name: &str, startup_timeout: Option<Duration>) {
        metrics::counter!(
            "harbor_factory_launch_total",
            "application" => application_name.to_string(),
            "bounded" => startup_timeout.is_some().to_string()
        )
        .increment(1);
    }

    fn on_checkpoint_resolved(&self, checkpoint: CheckpointKind, elapsed: Duration) {
        metrics::counter!(
            "harbor_factory_checkpoint_resolved_total",
            "checkpoint" => checkpoint.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "harbor_factory_checkpoint_seconds",
            "checkpoint" => checkpoint.as_str(),
            "outcome" => "resolved"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_checkpoint_failed(
        &self,
        checkpoint: CheckpointKind,
        error: &FactoryError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "harbor_factory_checkpoint_failed_total",
            "checkpoint" => checkpoint.as_str(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "harbor_factory_checkpoint_seconds",
            "checkpoint" => checkpoint.as_str(),
            "outcome" => "failed"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_checkpoint_cancelled(&self, checkpoint: CheckpointKind) {
        metrics::counter!(
            "harbor_factory_checkpoint_cancelled_total",
            "checkpoint" => checkpoint.as_str()
        )
        .increment(1);
    }

    fn on_teardown(&self, mode: TeardownMode, application_reached: bool) {
        metrics::counter!(
            "harbor_factory_teardown_total",
            "mode" => mode.as_str(),
            "application_reached" => application_reached.to_string()
        )
        .increment(1);
    }
}
