//! Host contract and the default lifetime-driven host.

use std::sync::Arc;

use hcommon::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::{ApplicationLifetime, HostError, ServiceRegistry};

pub trait Host: Send + Sync {
    fn start<'a>(&'a self, cancel: CancellationToken) -> BoxFuture<'a, Result<(), HostError>>;

    fn stop<'a>(&'a self, cancel: CancellationToken) -> BoxFuture<'a, Result<(), HostError>>;

    fn dispose(&self) {}

    /// Asynchronous release. Hosts without an async release path fall back to
    /// [`Host::dispose`].
    fn dispose_async<'a>(&'a self) -> BoxFuture<'a, ()> {
        Box::pin(async move { self.dispose() })
    }
}

/// Resolves the application's host from its registered services.
pub type HostFactory =
    Box<dyn FnOnce(&ServiceRegistry) -> Result<Arc<dyn Host>, HostError> + Send>;

/// Host that reports its transitions through the registered [`ApplicationLifetime`].
#[derive(Debug, Clone, Default)]
pub struct LifetimeHost {
    lifetime: Option<ApplicationLifetime>,
}

impl LifetimeHost {
    pub fn new(lifetime: Option<ApplicationLifetime>) -> Self {
        Self { lifetime }
    }

    pub fn factory() -> HostFactory {
        Box::new(|services: &ServiceRegistry| {
            let host = LifetimeHost::new(services.get::<ApplicationLifetime>());
            Ok(Arc::new(host) as Arc<dyn Host>)
        })
    }
}

impl Host for LifetimeHost {
    fn start<'a>(&'a self, cancel: CancellationToken) -> BoxFuture<'a, Result<(), HostError>> {
        Box::pin(async move {
            if cancel.is_cancelled() {
                return Err(HostError::cancelled("host start was cancelled"));
            }

            if let Some(lifetime) = &self.lifetime {
                lifetime.notify_started();
            }
            Ok(())
        })
    }

    fn stop<'a>(&'a self, _cancel: CancellationToken) -> BoxFuture<'a, Result<(), HostError>> {
        Box::pin(async move {
            if let Some(lifetime) = &self.lifetime {
                lifetime.stop_application();
                lifetime.notify_stopped();
            }
            Ok(())
        })
    }
}
