use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use hfactory::{CheckpointKind, FactoryError, FactoryRuntimeHooks, TeardownMode};

/// Keeps a panicking hook from unwinding into the factory.
pub struct SafeFactoryHooks<H> {
    inner: H,
}

impl<H> SafeFactoryHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> FactoryRuntimeHooks for SafeFactoryHooks<H>
where
    H: FactoryRuntimeHooks,
{
    fn on_launch_start(&self, application_name: &str, startup_timeout: Option<Duration>) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_launch_start(application_name, startup_timeout)
        }));
    }

    fn on_checkpoint_resolved(&self, checkpoint: CheckpointKind, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_checkpoint_resolved(checkpoint, elapsed)
        }));
    }

    fn on_checkpoint_failed(
        &self,
        checkpoint: CheckpointKind,
        error: &FactoryError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_checkpoint_failed(checkpoint, error, elapsed)
        }));
    }

    fn on_checkpoint_cancelled(&self, checkpoint: CheckpointKind) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_checkpoint_cancelled(checkpoint)
        }));
    }

    fn on_teardown(&self, mode: TeardownMode, application_reached: bool) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_teardown(mode, application_reached)
        }));
    }
}

/// Forwards every callback to each hook in registration order.
#[derive(Clone, Default)]
pub struct FanoutFactoryHooks {
    hooks: Vec<Arc<dyn FactoryRuntimeHooks>>,
}

impl FanoutFactoryHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hooks: Arc<dyn FactoryRuntimeHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl FactoryRuntimeHooks for FanoutFactoryHooks {
    fn on_launch_start(&self, application_name: &str, startup_timeout: Option<Duration>) {
        for hooks in &self.hooks {
            hooks.on_launch_start(application_name, startup_timeout);
        }
    }

    fn on_checkpoint_resolved(&self, checkpoint: CheckpointKind, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_checkpoint_resolved(checkpoint, elapsed);
        }
    }

    fn on_checkpoint_failed(
        &self,
        checkpoint: CheckpointKind,
        error: &FactoryError,
        elapsed: Duration,
    ) {
        for hooks in &self.hooks {
            hooks.on_checkpoint_failed(checkpoint, error, elapsed);
        }
    }

    fn on_checkpoint_cancelled(&self, checkpoint: CheckpointKind) {
        for hooks in &self.hooks {
            hooks.on_checkpoint_cancelled(checkpoint);
        }
    }

    fn on_teardown(&self, mode: TeardownMode, application_reached: bool) {
        for hooks in &self.hooks {
            hooks.on_teardown(mode, application_reached);
        }
    }
}
