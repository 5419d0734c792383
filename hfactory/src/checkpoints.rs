//! The four launch checkpoints and their fan-out failure rules.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use hcheckpoint::Checkpoint;
use hhost::{Application, BuilderView};

use crate::{CheckpointKind, FactoryError, FactoryRuntimeHooks};

pub(crate) struct LaunchCheckpoints {
    pub(crate) builder: Checkpoint<BuilderView, FactoryError>,
    pub(crate) application: Checkpoint<Application, FactoryError>,
    pub(crate) started: Checkpoint<(), FactoryError>,
    pub(crate) exited: Checkpoint<(), FactoryError>,
    disposed: AtomicBool,
    launched_at: OnceLock<Instant>,
    hooks: Arc<dyn FactoryRuntimeHooks>,
}

impl LaunchCheckpoints {
    pub(crate) fn new(hooks: Arc<dyn FactoryRuntimeHooks>) -> Self {
        Self {
            builder: Checkpoint::new(),
            application: Checkpoint::new(),
            started: Checkpoint::new(),
            exited: Checkpoint::new(),
            disposed: AtomicBool::new(false),
            launched_at: OnceLock::new(),
            hooks,
        }
    }

    pub(crate) fn mark_launched(&self) {
        let _ = self.launched_at.set(Instant::now());
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    // Disposal wins over late success: once disposed, builder and started
    // can only end up cancelled.
    pub(crate) fn resolve_builder(&self, view: BuilderView) {
        if self.is_disposed() {
            return;
        }
        let won = self.builder.try_resolve(view);
        self.report_resolved(CheckpointKind::BuilderReady, won);
    }

    pub(crate) fn resolve_application(&self, application: Application) -> bool {
        let won = self.application.try_resolve(application);
        self.report_resolved(CheckpointKind::ApplicationReady, won);
        won
    }

    pub(crate) fn resolve_started(&self) {
        if self.is_disposed() {
            return;
        }
        let won = self.started.try_resolve(());
        self.report_resolved(CheckpointKind::Started, won);
    }

    pub(crate) fn resolve_exited(&self) {
        let won = self.exited.try_resolve(());
        self.report_resolved(CheckpointKind::Exited, won);
    }

    pub(crate) fn fail_exited(&self, error: &FactoryError) {
        let won = self.exited.try_fail(error.clone());
        self.report_failed(CheckpointKind::Exited, won, error);
    }

    /// Fails every unresolved downstream checkpoint with the same cause.
    pub(crate) fn fail_all(&self, error: &FactoryError) {
        let won = self.application.try_fail(error.clone());
        self.report_failed(CheckpointKind::ApplicationReady, won, error);

        let won = self.builder.try_fail(error.clone());
        self.report_failed(CheckpointKind::BuilderReady, won, error);

        let won = self.started.try_fail(error.clone());
        self.report_failed(CheckpointKind::Started, won, error);
    }

    pub(crate) fn cancel_for_dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);

        if self.builder.try_cancel() {
            self.hooks.on_checkpoint_cancelled(CheckpointKind::BuilderReady);
        }
        if self.started.try_cancel() {
            self.hooks.on_checkpoint_cancelled(CheckpointKind::Started);
        }
    }

    pub(crate) fn cancel_application(&self) {
        if self.application.try_cancel() {
            self.hooks.on_checkpoint_cancelled(CheckpointKind::ApplicationReady);
        }
    }

    fn elapsed(&self) -> Duration {
        self.launched_at
            .get()
            .map(Instant::elapsed)
            .unwrap_or_default()
    }

    fn report_resolved(&self, checkpoint: CheckpointKind, won: bool) {
        if won {
            self.hooks.on_checkpoint_resolved(checkpoint, self.elapsed());
        }
    }

    fn report_failed(&self, checkpoint: CheckpointKind, won: bool, error: &FactoryError) {
        if won {
            self.hooks
                .on_checkpoint_failed(checkpoint, error, self.elapsed());
        }
    }
}
