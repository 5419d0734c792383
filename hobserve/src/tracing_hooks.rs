//! Tracing-based observability hooks for factory checkpoints and launch stages.
//!
//! ```rust
//! use hobserve::TracingObservabilityHooks;
//! use hfactory::FactoryRuntimeHooks;
//!
//! fn accepts_factory_hooks(_hooks: &dyn FactoryRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_factory_hooks(&hooks);
//! ```

use std::time::Duration;

use hfactory::{CheckpointKind, FactoryError, FactoryRuntimeHooks, TeardownMode};
use hhost::{AppBuilder, Application, HostError, LaunchHooks, StartupOptions};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl FactoryRuntimeHooks for TracingObservabilityHooks {
    fn on_launch_start(&self, application_name: &str, startup_timeout: Option<Duration>) {
        tracing::info!(
            phase = "factory",
            event = "launch_start",
            application_name,
            startup_timeout_ms = startup_timeout.map(|timeout| timeout.as_millis() as u64)
        );
    }

    fn on_checkpoint_resolved(&self, checkpoint: CheckpointKind, elapsed: Duration) {
        tracing::info!(
            phase = "factory",
            event = "checkpoint_resolved",
            checkpoint = %checkpoint,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_checkpoint_failed(
        &self,
        checkpoint: CheckpointKind,
        error: &FactoryError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "factory",
            event = "checkpoint_failed",
            checkpoint = %checkpoint,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_checkpoint_cancelled(&self, checkpoint: CheckpointKind) {
        tracing::warn!(
            phase = "factory",
            event = "checkpoint_cancelled",
            checkpoint = %checkpoint
        );
    }

    fn on_teardown(&self, mode: TeardownMode, application_reached: bool) {
        tracing::info!(
            phase = "factory",
            event = "teardown",
            mode = mode.as_str(),
            application_reached
        );
    }
}

impl LaunchHooks for TracingObservabilityHooks {
    fn on_constructing(&self, options: &mut StartupOptions) {
        tracing::debug!(
            phase = "launch",
            event = "constructing",
            application_name = options.application_name.as_str(),
            environment = options.environment_name.as_str(),
            args = options.args.len()
        );
    }

    fn on_constructed(&self, builder: &mut AppBuilder) {
        tracing::debug!(
            phase = "launch",
            event = "constructed",
            services = builder.services().len()
        );
    }

    fn on_building(&self, builder: &mut AppBuilder) -> Result<(), HostError> {
        tracing::debug!(
            phase = "launch",
            event = "building",
            resources = builder.resources().len(),
            has_host = builder.has_host()
        );
        Ok(())
    }

    fn on_built(&self, application: &Application) {
        tracing::debug!(
            phase = "launch",
            event = "built",
            application_name = application.options().application_name.as_str()
        );
    }
}
