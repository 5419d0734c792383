use std::sync::Arc;

use hcommon::ResourceName;

use crate::{
    Application, ApplicationLifetime, Host, HostError, HostFactory, LaunchHooks, LifetimeHost,
    NoopLaunchHooks, ResourceCatalog, ResourceSpec, ServiceRegistry, StartupOptions,
};

/// Composition root of an application under construction.
pub struct AppBuilder {
    options: StartupOptions,
    services: ServiceRegistry,
    resources: ResourceCatalog,
    host: Option<HostFactory>,
    hooks: Arc<dyn LaunchHooks>,
}

/// Point-in-time snapshot of a builder, published once it is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderView {
    pub options: StartupOptions,
    pub resources: Vec<ResourceName>,
}

impl AppBuilder {
    /// Creates a builder, running the `constructing` and `constructed` stages
    /// of `hooks`.
    ///
    /// The builder registers an [`ApplicationLifetime`] service and a
    /// [`LifetimeHost`] by default.
    pub fn create(options: StartupOptions, hooks: Arc<dyn LaunchHooks>) -> Self {
        let mut options = options;
        hooks.on_constructing(&mut options);

        let mut services = ServiceRegistry::new();
        services.insert(ApplicationLifetime::new());

        let mut builder = Self {
            options,
            services,
            resources: ResourceCatalog::new(),
            host: Some(LifetimeHost::factory()),
            hooks: Arc::clone(&hooks),
        };
        hooks.on_constructed(&mut builder);
        builder
    }

    pub fn new(options: StartupOptions) -> Self {
        Self::create(options, Arc::new(NoopLaunchHooks))
    }

    pub fn options(&self) -> &StartupOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut StartupOptions {
        &mut self.options
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceRegistry {
        &mut self.services
    }

    pub fn resources(&self) -> &ResourceCatalog {
        &self.resources
    }

    pub fn add_resource(&mut self, resource: ResourceSpec) -> &mut Self {
        self.resources.add(resource);
        self
    }

    pub fn register_host<F>(&mut self, factory: F) -> &mut Self
    where
        F: FnOnce(&ServiceRegistry) -> Result<Arc<dyn Host>, HostError> + Send + 'static,
    {
        self.host = Some(Box::new(factory));
        self
    }

    pub fn remove_host(&mut self) -> bool {
        self.host.take().is_some()
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// Wraps the registered host. The decorator receives the host produced by
    /// the previous registration when the application is built.
    pub fn decorate_host<F>(&mut self, decorator: F) -> Result<(), HostError>
    where
        F: FnOnce(Arc<dyn Host>) -> Arc<dyn Host> + Send + 'static,
    {
        let inner = self.host.take().ok_or_else(|| {
            HostError::configuration("no host registration is available to decorate")
        })?;

        self.host = Some(Box::new(move |services: &ServiceRegistry| {
            let host = inner(services)?;
            Ok(decorator(host))
        }));
        Ok(())
    }

    pub fn view(&self) -> BuilderView {
        BuilderView {
            options: self.options.clone(),
            resources: self.resources.names(),
        }
    }

    /// Runs the `building` stage, assembles the host and publishes the
    /// application through `on_built`.
    pub fn build(mut self) -> Result<Application, HostError> {
        let hooks = Arc::clone(&self.hooks);
        hooks.on_building(&mut self)?;

        let factory = self
            .host
            .take()
            .ok_or_else(|| HostError::configuration("no host is registered"))?;
        let host = factory(&self.services)?;

        let application = Application::new(self.options, self.services, self.resources, host);
        hooks.on_built(&application);
        Ok(application)
    }
}
