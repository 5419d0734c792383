use std::sync::Arc;

use hcheckpoint::WaitError;
use hhost::{
    Application, ApplicationLifetime, BuilderView, EntryPoint, LaunchHooks, NoopLaunchHooks,
    ResourceClient,
};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::launcher::FactoryShared;
use crate::{
    FactoryError, FactoryOptions, FactoryRuntimeHooks, NoopFactoryRuntimeHooks, TeardownMode,
};

pub struct AppFactoryBuilder {
    entry_point: Arc<dyn EntryPoint>,
    options: FactoryOptions,
    customizer: Arc<dyn LaunchHooks>,
    hooks: Arc<dyn FactoryRuntimeHooks>,
}

impl AppFactoryBuilder {
    pub fn new(entry_point: Arc<dyn EntryPoint>) -> Self {
        Self {
            entry_point,
            options: FactoryOptions::default(),
            customizer: Arc::new(NoopLaunchHooks),
            hooks: Arc::new(NoopFactoryRuntimeHooks),
        }
    }

    pub fn options(mut self, options: FactoryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_args(args);
        self
    }

    /// Hooks run after the factory's own work at each launch stage.
    pub fn customizer(mut self, customizer: Arc<dyn LaunchHooks>) -> Self {
        self.customizer = customizer;
        self
    }

    pub fn runtime_hooks(mut self, hooks: Arc<dyn FactoryRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> AppFactory {
        AppFactory {
            shared: Arc::new(FactoryShared::new(
                self.entry_point,
                self.options,
                self.customizer,
                self.hooks,
            )),
        }
    }
}

/// Launches an entry point once and exposes its startup milestones.
///
/// Every async accessor triggers the launch on first use. Dropping the
/// factory performs a synchronous teardown.
pub struct AppFactory {
    shared: Arc<FactoryShared>,
}

impl AppFactory {
    pub fn new<I, S>(entry_point: Arc<dyn EntryPoint>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(entry_point).args(args).build()
    }

    pub fn builder(entry_point: Arc<dyn EntryPoint>) -> AppFactoryBuilder {
        AppFactoryBuilder::new(entry_point)
    }

    pub fn options(&self) -> &FactoryOptions {
        &self.shared.options
    }

    /// Launches the entry point unless a launch was already requested.
    ///
    /// Entry-point validation failures surface here rather than through a
    /// checkpoint.
    pub fn ensure_started(&self) -> Result<(), FactoryError> {
        self.shared.ensure_started()
    }

    pub async fn resolve_builder(
        &self,
        cancel: &CancellationToken,
    ) -> Result<BuilderView, FactoryError> {
        self.ensure_started()?;
        Ok(self.shared.checkpoints.builder.wait_with(cancel).await?)
    }

    pub async fn resolve_application(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Application, FactoryError> {
        self.ensure_started()?;
        Ok(self.shared.checkpoints.application.wait_with(cancel).await?)
    }

    pub async fn wait_until_started(&self, cancel: &CancellationToken) -> Result<(), FactoryError> {
        self.ensure_started()?;
        Ok(self.shared.checkpoints.started.wait_with(cancel).await?)
    }

    /// Waits for the entry point's main routine to return.
    pub async fn wait_for_exit(&self, cancel: &CancellationToken) -> Result<(), FactoryError> {
        self.ensure_started()?;
        Ok(self.shared.checkpoints.exited.wait_with(cancel).await?)
    }

    pub fn lifetime(&self) -> Option<ApplicationLifetime> {
        self.shared.lifetime.get().cloned()
    }

    pub fn create_client(
        &self,
        resource: &str,
        endpoint: Option<&str>,
    ) -> Result<ResourceClient, FactoryError> {
        Ok(self.started_application()?.create_client(resource, endpoint)?)
    }

    pub fn connection_string(&self, resource: &str) -> Result<String, FactoryError> {
        Ok(self.started_application()?.connection_string(resource)?)
    }

    pub fn endpoint(&self, resource: &str, endpoint: Option<&str>) -> Result<Url, FactoryError> {
        Ok(self.started_application()?.endpoint(resource, endpoint)?)
    }

    fn started_application(&self) -> Result<Application, FactoryError> {
        let checkpoints = &self.shared.checkpoints;
        if !checkpoints.started.is_succeeded() {
            return Err(FactoryError::not_started(
                "the application has not started; await wait_until_started first",
            ));
        }

        checkpoints.application.value().ok_or_else(|| {
            FactoryError::not_started("the application has not been built")
        })
    }

    /// Cancels pending milestones and, when the application was reached,
    /// requests its shutdown and releases it without waiting for it to exit.
    pub fn dispose(&self) {
        let shared = &self.shared;
        if !shared.claim_teardown() {
            return;
        }

        shared.checkpoints.cancel_for_dispose();
        let application = shared.checkpoints.application.value();
        shared
            .hooks
            .on_teardown(TeardownMode::Sync, application.is_some());

        let Some(application) = application else {
            shared.checkpoints.cancel_application();
            return;
        };

        if shared.claim_release() {
            if let Some(lifetime) = shared.lifetime.get() {
                lifetime.stop_application();
            }
            application.dispose();
        }
    }

    /// Like [`AppFactory::dispose`], but waits for the main routine to exit
    /// before releasing the application.
    ///
    /// Returns the routine's failure when it failed during this teardown.
    pub async fn dispose_async(&self) -> Result<(), FactoryError> {
        let shared = &self.shared;
        if !shared.claim_teardown() {
            return Ok(());
        }

        let exited_before = shared.checkpoints.exited.is_resolved();
        shared.checkpoints.cancel_for_dispose();
        let application = shared.checkpoints.application.value();
        shared
            .hooks
            .on_teardown(TeardownMode::Async, application.is_some());

        let Some(application) = application else {
            shared.checkpoints.cancel_application();
            return Ok(());
        };

        if !shared.claim_release() {
            return Ok(());
        }

        if let Some(lifetime) = shared.lifetime.get()
            && !lifetime.is_stopping()
        {
            lifetime.stop_application();
        }

        let exit = shared.checkpoints.exited.wait().await;
        application.dispose_async().await;

        match exit {
            Err(WaitError::Failed(error)) if !exited_before => Err(error),
            _ => Ok(()),
        }
    }
}

impl Drop for AppFactory {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for AppFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppFactory")
            .field("options", &self.shared.options)
            .field("launch_requested", &self.shared.is_launch_requested())
            .field("disposed", &self.shared.checkpoints.is_disposed())
            .finish()
    }
}
