//! Shutdown control surface of a running application.
//!
//! ```rust
//! use hhost::ApplicationLifetime;
//!
//! let lifetime = ApplicationLifetime::new();
//! lifetime.notify_started();
//! lifetime.stop_application();
//!
//! assert!(lifetime.is_started());
//! assert!(lifetime.is_stopping());
//! assert!(!lifetime.is_stopped());
//! ```

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct ApplicationLifetime {
    started: CancellationToken,
    stopping: CancellationToken,
    stopped: CancellationToken,
}

impl ApplicationLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown. Repeated requests are no-ops.
    pub fn stop_application(&self) {
        self.stopping.cancel();
    }

    pub fn notify_started(&self) {
        self.started.cancel();
    }

    pub fn notify_stopped(&self) {
        self.stopped.cancel();
    }

    pub fn is_started(&self) -> bool {
        self.started.is_cancelled()
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping.is_cancelled()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_cancelled()
    }

    pub async fn stop_requested(&self) {
        self.stopping.cancelled().await;
    }
}
