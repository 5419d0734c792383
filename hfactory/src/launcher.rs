//! One-time launch of the entry point and the handshake that wires the
//! launch checkpoints into the application under construction.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use hhost::{
    AppBuilder, Application, ApplicationLifetime, EntryPoint, EntryPointFactory,
    EntryPointMetadata, Host, HostError, LaunchHooks, StartupOptions, resolve_entry_point,
};
use tokio_util::sync::CancellationToken;

use crate::checkpoints::LaunchCheckpoints;
use crate::config::{DELETE_RESOURCES_ON_SHUTDOWN_KEY, RANDOMIZE_PORTS_KEY, RESOURCE_NAME_SUFFIX_KEY};
use crate::intercept::InterceptedHost;
use crate::{FactoryError, FactoryOptions, FactoryRuntimeHooks};

pub(crate) struct FactoryShared {
    entry_point: Arc<dyn EntryPoint>,
    pub(crate) options: FactoryOptions,
    customizer: Arc<dyn LaunchHooks>,
    pub(crate) hooks: Arc<dyn FactoryRuntimeHooks>,
    pub(crate) checkpoints: Arc<LaunchCheckpoints>,
    pub(crate) lifetime: OnceLock<ApplicationLifetime>,
    start_guard: Mutex<bool>,
    launch_requested: AtomicBool,
    released: AtomicBool,
    torn_down: AtomicBool,
}

impl FactoryShared {
    pub(crate) fn new(
        entry_point: Arc<dyn EntryPoint>,
        options: FactoryOptions,
        customizer: Arc<dyn LaunchHooks>,
        hooks: Arc<dyn FactoryRuntimeHooks>,
    ) -> Self {
        Self {
            entry_point,
            options,
            customizer,
            checkpoints: Arc::new(LaunchCheckpoints::new(Arc::clone(&hooks))),
            hooks,
            lifetime: OnceLock::new(),
            start_guard: Mutex::new(false),
            launch_requested: AtomicBool::new(false),
            released: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        }
    }

    pub(crate) fn is_launch_requested(&self) -> bool {
        self.launch_requested.load(Ordering::Acquire)
    }

    /// Claims the single release of the built application.
    pub(crate) fn claim_release(&self) -> bool {
        !self.released.swap(true, Ordering::SeqCst)
    }

    /// Claims teardown; only the first sync or async dispose proceeds.
    pub(crate) fn claim_teardown(&self) -> bool {
        !self.torn_down.swap(true, Ordering::SeqCst)
    }

    /// Launches the entry point on the first call. Later calls return
    /// immediately, including while the first launch is still in flight.
    pub(crate) fn ensure_started(self: &Arc<Self>) -> Result<(), FactoryError> {
        if self.is_launch_requested() {
            return Ok(());
        }

        let mut started = self
            .start_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *started {
            return Ok(());
        }
        if self.checkpoints.is_disposed() {
            return Err(FactoryError::cancelled(
                "the factory was disposed before it was started",
            ));
        }

        let metadata = self.entry_point.metadata();
        validate_entry_point(&metadata)?;

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            FactoryError::configuration("the factory must be started from within a Tokio runtime")
        })?;

        let interceptor: Arc<dyn LaunchHooks> = Arc::new(LaunchInterceptor {
            args: self.options.args.clone(),
            environment_name: self.options.environment_name.clone(),
            application_name: metadata.application_name.clone(),
            checkpoints: Arc::clone(&self.checkpoints),
            customizer: Arc::clone(&self.customizer),
        });
        let checkpoints = Arc::clone(&self.checkpoints);
        let factory = resolve_entry_point(
            Arc::clone(&self.entry_point),
            interceptor,
            Box::new(move |result| on_entry_point_exit(&checkpoints, result)),
        );

        let timeout = self.options.resolve_startup_timeout();
        self.hooks
            .on_launch_start(&metadata.application_name, timeout);
        self.checkpoints.mark_launched();

        runtime.spawn(invoke_entry_point(Arc::clone(self), factory, timeout));

        *started = true;
        self.launch_requested.store(true, Ordering::Release);
        Ok(())
    }

    async fn on_built_core(&self, application: Application) -> Result<(), FactoryError> {
        let lifetime = application.lifetime().ok_or_else(|| {
            FactoryError::configuration(
                "the built application does not expose an application lifetime",
            )
        })?;
        let _ = self.lifetime.set(lifetime);

        if self.checkpoints.is_disposed() {
            self.checkpoints.cancel_application();
            self.release_late(&application).await;
            return Ok(());
        }

        let published = self.checkpoints.resolve_application(application.clone());
        if !published || self.checkpoints.is_disposed() {
            self.release_late(&application).await;
        }
        Ok(())
    }

    // Teardown began while the application was still being built.
    async fn release_late(&self, application: &Application) {
        if !self.claim_release() {
            return;
        }
        if let Some(lifetime) = self.lifetime.get() {
            lifetime.stop_application();
        }
        application.dispose_async().await;
    }
}

async fn invoke_entry_point(
    shared: Arc<FactoryShared>,
    factory: EntryPointFactory,
    timeout: Option<Duration>,
) {
    // Off the caller's stack so a caller inside a launch hook cannot deadlock.
    tokio::task::yield_now().await;

    let cancel = CancellationToken::new();
    let mut launch = factory(Vec::new(), cancel.clone());

    let outcome = match timeout {
        None => launch.await.map_err(FactoryError::from),
        Some(limit) => {
            tokio::select! {
                result = &mut launch => result.map_err(FactoryError::from),
                _ = tokio::time::sleep(limit) => {
                    cancel.cancel();
                    match launch.await {
                        Ok(application) => Ok(application),
                        Err(_) => Err(FactoryError::timeout(format!(
                            "the entry point did not build its application within {limit:?}"
                        ))),
                    }
                }
            }
        }
    };

    let result = match outcome {
        Ok(application) => shared.on_built_core(application).await,
        Err(error) => Err(error),
    };

    if let Err(error) = result {
        shared.checkpoints.fail_exited(&error);
        shared.checkpoints.fail_all(&error);
    }
}

fn on_entry_point_exit(checkpoints: &LaunchCheckpoints, result: Result<(), HostError>) {
    match result {
        Ok(()) => checkpoints.resolve_exited(),
        Err(error) => {
            let error = FactoryError::from(error);
            checkpoints.fail_exited(&error);
            checkpoints.fail_all(&error);
        }
    }
}

/// Checks that `metadata` describes something that can be launched.
pub fn validate_entry_point(metadata: &EntryPointMetadata) -> Result<(), FactoryError> {
    if !metadata.runnable {
        return Err(FactoryError::configuration(format!(
            "entry point '{}' does not expose a runnable main",
            metadata.application_name
        )));
    }

    if metadata.application_name.trim().is_empty() {
        return Err(FactoryError::configuration(
            "entry point metadata does not name the application",
        ));
    }

    if let Some(manifest) = metadata.manifest_path.as_deref() {
        if !Path::new(manifest).is_file() {
            return Err(FactoryError::configuration(format!(
                "build manifest '{}' for '{}' was not found; make sure the project has been built",
                manifest.display(),
                metadata.application_name
            )));
        }
    }

    Ok(())
}

struct LaunchInterceptor {
    args: Vec<String>,
    environment_name: String,
    application_name: String,
    checkpoints: Arc<LaunchCheckpoints>,
    customizer: Arc<dyn LaunchHooks>,
}

impl LaunchHooks for LaunchInterceptor {
    fn on_constructing(&self, options: &mut StartupOptions) {
        options.args.extend(self.args.iter().cloned());
        options.environment_name = self.environment_name.clone();
        options.application_name = self.application_name.clone();
        options.disable_dashboard = true;

        let suffix = format!("{:x}", rand::random::<u32>() & 0x7fff_ffff);
        options
            .configuration
            .insert(RANDOMIZE_PORTS_KEY.to_string(), "true".to_string());
        options
            .configuration
            .insert(DELETE_RESOURCES_ON_SHUTDOWN_KEY.to_string(), "true".to_string());
        options
            .configuration
            .insert(RESOURCE_NAME_SUFFIX_KEY.to_string(), suffix);

        self.customizer.on_constructing(options);
    }

    fn on_constructed(&self, builder: &mut AppBuilder) {
        self.customizer.on_constructed(builder);
    }

    fn on_building(&self, builder: &mut AppBuilder) -> Result<(), HostError> {
        if !builder.services().contains::<reqwest::Client>() {
            builder.services_mut().insert(reqwest::Client::new());
        }

        let checkpoints = Arc::downgrade(&self.checkpoints);
        builder
            .decorate_host(move |host| {
                Arc::new(InterceptedHost::new(host, checkpoints)) as Arc<dyn Host>
            })
            .map_err(|_| {
                HostError::configuration(
                    "the entry point removed its host registration; nothing to intercept",
                )
            })?;

        self.checkpoints.resolve_builder(builder.view());
        self.customizer.on_building(builder)
    }

    fn on_built(&self, application: &Application) {
        self.customizer.on_built(application);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoopFactoryRuntimeHooks;
    use hhost::NoopLaunchHooks;

    fn interceptor(args: &[&str]) -> LaunchInterceptor {
        LaunchInterceptor {
            args: args.iter().map(|arg| arg.to_string()).collect(),
            environment_name: "Development".to_string(),
            application_name: "shop".to_string(),
            checkpoints: Arc::new(LaunchCheckpoints::new(Arc::new(NoopFactoryRuntimeHooks))),
            customizer: Arc::new(NoopLaunchHooks),
        }
    }

    #[test]
    fn constructing_injects_test_overrides() {
        let hooks = interceptor(&["--seed", "7"]);
        let mut options = StartupOptions::new(["--own"]);

        hooks.on_constructing(&mut options);

        assert_eq!(options.args, vec!["--own", "--seed", "7"]);
        assert_eq!(options.environment_name, "Development");
        assert_eq!(options.application_name, "shop");
        assert!(options.disable_dashboard);
        assert_eq!(options.config(RANDOMIZE_PORTS_KEY), Some("true"));
        assert_eq!(options.config(DELETE_RESOURCES_ON_SHUTDOWN_KEY), Some("true"));

        let suffix = options
            .config(RESOURCE_NAME_SUFFIX_KEY)
            .expect("suffix is set");
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn building_registers_http_client_and_publishes_builder() {
        let hooks = interceptor(&[]);
        let mut builder = AppBuilder::new(StartupOptions::default());

        hooks.on_building(&mut builder).expect("building");

        assert!(builder.services().contains::<reqwest::Client>());
        assert!(hooks.checkpoints.builder.is_succeeded());
    }

    #[test]
    fn building_without_host_registration_is_a_configuration_error() {
        let hooks = interceptor(&[]);
        let mut builder = AppBuilder::new(StartupOptions::default());
        builder.remove_host();

        let error = hooks.on_building(&mut builder).expect_err("no host");

        assert_eq!(error.kind, hhost::HostErrorKind::Configuration);
        assert!(!hooks.checkpoints.builder.is_resolved());
    }

    #[test]
    fn validation_rejects_unlaunchable_entry_points() {
        let not_runnable = EntryPointMetadata::new("shop").with_runnable(false);
        assert!(validate_entry_point(&not_runnable).expect_err("not runnable").is_configuration());

        let unnamed = EntryPointMetadata::new("  ");
        assert!(validate_entry_point(&unnamed).expect_err("unnamed").is_configuration());

        let unbuilt = EntryPointMetadata::new("shop")
            .with_manifest_path("/definitely/not/here/shop.manifest.json");
        let error = validate_entry_point(&unbuilt).expect_err("missing manifest");
        assert!(error.message.contains("has been built"));

        assert!(validate_entry_point(&EntryPointMetadata::new("shop")).is_ok());
    }
}
