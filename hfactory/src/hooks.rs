//! Runtime hook contracts for observing launch checkpoints and teardown.
//!
//! ```rust
//! use hfactory::{FactoryRuntimeHooks, NoopFactoryRuntimeHooks};
//!
//! fn accepts_hooks(_hooks: &dyn FactoryRuntimeHooks) {}
//!
//! let hooks = NoopFactoryRuntimeHooks;
//! accepts_hooks(&hooks);
//! ```

use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::FactoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckpointKind {
    BuilderReady,
    ApplicationReady,
    Started,
    Exited,
}

impl CheckpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuilderReady => "builder_ready",
            Self::ApplicationReady => "application_ready",
            Self::Started => "started",
            Self::Exited => "exited",
        }
    }
}

impl Display for CheckpointKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownMode {
    Sync,
    Async,
}

impl TeardownMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}

pub trait FactoryRuntimeHooks: Send + Sync {
    fn on_launch_start(&self, _application_name: &str, _startup_timeout: Option<Duration>) {}

    fn on_checkpoint_resolved(&self, _checkpoint: CheckpointKind, _elapsed: Duration) {}

    fn on_checkpoint_failed(
        &self,
        _checkpoint: CheckpointKind,
        _error: &FactoryError,
        _elapsed: Duration,
    ) {
    }

    fn on_checkpoint_cancelled(&self, _checkpoint: CheckpointKind) {}

    fn on_teardown(&self, _mode: TeardownMode, _application_reached: bool) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFactoryRuntimeHooks;

impl FactoryRuntimeHooks for NoopFactoryRuntimeHooks {}
