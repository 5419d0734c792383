//! Host decorator that reports start outcomes back into the launch checkpoints.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use hcommon::BoxFuture;
use hhost::{Host, HostError};
use tokio_util::sync::CancellationToken;

use crate::FactoryError;
use crate::checkpoints::LaunchCheckpoints;

pub(crate) struct InterceptedHost {
    inner: Arc<dyn Host>,
    checkpoints: Weak<LaunchCheckpoints>,
    disposed: AtomicBool,
}

impl InterceptedHost {
    pub(crate) fn new(inner: Arc<dyn Host>, checkpoints: Weak<LaunchCheckpoints>) -> Self {
        Self {
            inner,
            checkpoints,
            disposed: AtomicBool::new(false),
        }
    }

    fn claim_dispose(&self) -> bool {
        !self.disposed.swap(true, Ordering::SeqCst)
    }
}

impl Host for InterceptedHost {
    fn start<'a>(&'a self, cancel: CancellationToken) -> BoxFuture<'a, Result<(), HostError>> {
        Box::pin(async move {
            match self.inner.start(cancel).await {
                Ok(()) => {
                    if let Some(checkpoints) = self.checkpoints.upgrade() {
                        // Started never overtakes application ready.
                        if checkpoints.application.wait().await.is_ok() {
                            checkpoints.resolve_started();
                        }
                    }
                    Ok(())
                }
                Err(error) => {
                    if let Some(checkpoints) = self.checkpoints.upgrade() {
                        checkpoints.fail_all(&FactoryError::from(error.clone()));
                    }
                    Err(error)
                }
            }
        })
    }

    fn stop<'a>(&'a self, cancel: CancellationToken) -> BoxFuture<'a, Result<(), HostError>> {
        self.inner.stop(cancel)
    }

    fn dispose(&self) {
        if self.claim_dispose() {
            self.inner.dispose();
        }
    }

    fn dispose_async<'a>(&'a self) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            if self.claim_dispose() {
                self.inner.dispose_async().await;
            }
        })
    }
}
