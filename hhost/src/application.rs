use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    ApplicationLifetime, Host, HostError, ResourceCatalog, ResourceClient, ServiceRegistry,
    StartupOptions,
};

/// A built application: its host, registered services and declared resources.
///
/// Cloning is cheap and every clone refers to the same application.
#[derive(Clone)]
pub struct Application {
    inner: Arc<ApplicationInner>,
}

struct ApplicationInner {
    options: StartupOptions,
    services: ServiceRegistry,
    resources: ResourceCatalog,
    host: Arc<dyn Host>,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("application_name", &self.inner.options.application_name)
            .field("resources", &self.inner.resources.len())
            .finish()
    }
}

impl Application {
    pub fn new(
        options: StartupOptions,
        services: ServiceRegistry,
        resources: ResourceCatalog,
        host: Arc<dyn Host>,
    ) -> Self {
        Self {
            inner: Arc::new(ApplicationInner {
                options,
                services,
                resources,
                host,
            }),
        }
    }

    pub fn options(&self) -> &StartupOptions {
        &self.inner.options
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.inner.services
    }

    pub fn resources(&self) -> &ResourceCatalog {
        &self.inner.resources
    }

    pub fn host(&self) -> Arc<dyn Host> {
        Arc::clone(&self.inner.host)
    }

    pub fn lifetime(&self) -> Option<ApplicationLifetime> {
        self.inner.services.get::<ApplicationLifetime>()
    }

    pub async fn start(&self, cancel: CancellationToken) -> Result<(), HostError> {
        self.inner.host.start(cancel).await
    }

    pub async fn stop(&self, cancel: CancellationToken) -> Result<(), HostError> {
        self.inner.host.stop(cancel).await
    }

    /// Starts the host, waits for a shutdown request and stops the host.
    ///
    /// Without a registered lifetime the host is stopped as soon as it started.
    pub async fn run(&self) -> Result<(), HostError> {
        self.start(CancellationToken::new()).await?;

        if let Some(lifetime) = self.lifetime() {
            lifetime.stop_requested().await;
        }

        self.stop(CancellationToken::new()).await
    }

    pub fn dispose(&self) {
        self.inner.host.dispose();
    }

    pub async fn dispose_async(&self) {
        self.inner.host.dispose_async().await;
    }

    pub fn endpoint(&self, resource: &str, endpoint: Option<&str>) -> Result<Url, HostError> {
        self.inner.resources.endpoint(resource, endpoint)
    }

    pub fn connection_string(&self, resource: &str) -> Result<String, HostError> {
        self.inner.resources.connection_string(resource)
    }

    /// Creates an HTTP client rooted at the resource's endpoint, reusing the
    /// application's registered `reqwest::Client` when there is one.
    pub fn create_client(
        &self,
        resource: &str,
        endpoint: Option<&str>,
    ) -> Result<ResourceClient, HostError> {
        let base_url = self.endpoint(resource, endpoint)?;
        let client = self
            .inner
            .services
            .get::<reqwest::Client>()
            .unwrap_or_default();
        Ok(ResourceClient::new(base_url, client))
    }
}
