use std::sync::{Arc, Mutex};
use std::time::Duration;

use hfactory::{CheckpointKind, FactoryError, FactoryRuntimeHooks, TeardownMode};
use hhost::{AppBuilder, LaunchHooks, StartupOptions};

use crate::{
    FanoutFactoryHooks, MetricsObservabilityHooks, SafeFactoryHooks, TracingObservabilityHooks,
};

fn exercise(hooks: &dyn FactoryRuntimeHooks) {
    let error = FactoryError::timeout("entry point did not build in time");

    hooks.on_launch_start("shop", Some(Duration::from_secs(300)));
    hooks.on_checkpoint_resolved(CheckpointKind::BuilderReady, Duration::from_millis(12));
    hooks.on_checkpoint_failed(
        CheckpointKind::ApplicationReady,
        &error,
        Duration::from_millis(40),
    );
    hooks.on_checkpoint_cancelled(CheckpointKind::Started);
    hooks.on_teardown(TeardownMode::Async, true);
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise(&TracingObservabilityHooks);

    let hooks = TracingObservabilityHooks;
    let mut options = StartupOptions::new(["--seed"]).with_application_name("shop");
    hooks.on_constructing(&mut options);

    let mut builder = AppBuilder::new(options);
    hooks.on_constructed(&mut builder);
    hooks.on_building(&mut builder).expect("logging never fails");
    let application = builder.build().expect("application");
    hooks.on_built(&application);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise(&MetricsObservabilityHooks);
}

#[derive(Default, Clone)]
struct RecordingFactoryHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl FactoryRuntimeHooks for RecordingFactoryHooks {
    fn on_launch_start(&self, _application_name: &str, _startup_timeout: Option<Duration>) {
        self.events.lock().expect("events lock").push("launch_start");
    }

    fn on_checkpoint_resolved(&self, _checkpoint: CheckpointKind, _elapsed: Duration) {
        self.events.lock().expect("events lock").push("resolved");
    }

    fn on_checkpoint_failed(
        &self,
        _checkpoint: CheckpointKind,
        _error: &FactoryError,
        _elapsed: Duration,
    ) {
        self.events.lock().expect("events lock").push("failed");
    }

    fn on_checkpoint_cancelled(&self, _checkpoint: CheckpointKind) {
        self.events.lock().expect("events lock").push("cancelled");
    }

    fn on_teardown(&self, _mode: TeardownMode, _application_reached: bool) {
        self.events.lock().expect("events lock").push("teardown");
    }
}

struct PanicFactoryHooks;

impl FactoryRuntimeHooks for PanicFactoryHooks {
    fn on_launch_start(&self, _application_name: &str, _startup_timeout: Option<Duration>) {
        panic!("launch_start panic");
    }

    fn on_checkpoint_resolved(&self, _checkpoint: CheckpointKind, _elapsed: Duration) {
        panic!("resolved panic");
    }

    fn on_checkpoint_failed(
        &self,
        _checkpoint: CheckpointKind,
        _error: &FactoryError,
        _elapsed: Duration,
    ) {
        panic!("failed panic");
    }

    fn on_checkpoint_cancelled(&self, _checkpoint: CheckpointKind) {
        panic!("cancelled panic");
    }

    fn on_teardown(&self, _mode: TeardownMode, _application_reached: bool) {
        panic!("teardown panic");
    }
}

#[test]
fn safe_factory_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingFactoryHooks::default();
    let events = Arc::clone(&inner.events);

    exercise(&SafeFactoryHooks::new(inner));

    assert_eq!(
        *events.lock().expect("events lock"),
        vec!["launch_start", "resolved", "failed", "cancelled", "teardown"]
    );
}

#[test]
fn safe_factory_hooks_swallow_panics() {
    exercise(&SafeFactoryHooks::new(PanicFactoryHooks));
}

#[test]
fn fanout_reaches_every_hook_in_order() {
    let first = RecordingFactoryHooks::default();
    let second = RecordingFactoryHooks::default();
    let hooks = FanoutFactoryHooks::new()
        .with(Arc::new(first.clone()))
        .with(Arc::new(SafeFactoryHooks::new(PanicFactoryHooks)))
        .with(Arc::new(second.clone()));

    exercise(&hooks);

    assert_eq!(hooks.len(), 3);
    assert_eq!(first.events.lock().expect("events lock").len(), 5);
    assert_eq!(second.events.lock().expect("events lock").len(), 5);
}
