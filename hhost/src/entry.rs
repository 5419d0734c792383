//! Entry-point contract and the invoker that runs an entry point on its own
//! task while capturing the application it builds.

use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use futures_util::FutureExt;
use hcommon::BoxFuture;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::{AppBuilder, Application, HostError, LaunchHooks, StartupOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointMetadata {
    pub application_name: String,
    pub runnable: bool,
    /// Build manifest that must exist before the entry point can be launched.
    pub manifest_path: Option<PathBuf>,
}

impl EntryPointMetadata {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            runnable: true,
            manifest_path: None,
        }
    }

    pub fn with_manifest_path(mut self, manifest_path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(manifest_path.into());
        self
    }

    pub fn with_runnable(mut self, runnable: bool) -> Self {
        self.runnable = runnable;
        self
    }
}

/// An application's `main`.
///
/// Implementations compose their application through [`AppBuilder::create`]
/// using the supplied hooks, build it, and usually run it until shutdown.
pub trait EntryPoint: Send + Sync + 'static {
    fn metadata(&self) -> EntryPointMetadata;

    fn main(
        &self,
        args: Vec<String>,
        hooks: Arc<dyn LaunchHooks>,
    ) -> BoxFuture<'static, Result<(), HostError>>;
}

/// Launches an entry point and resolves once it has built its application.
pub type EntryPointFactory = Box<
    dyn FnOnce(Vec<String>, CancellationToken) -> BoxFuture<'static, Result<Application, HostError>>
        + Send,
>;

/// Receives the entry point's final outcome once `main` returns.
pub type EntryPointCompletion = Box<dyn FnOnce(Result<(), HostError>) + Send>;

struct CapturingHooks {
    inner: Arc<dyn LaunchHooks>,
    built: Mutex<Option<oneshot::Sender<Application>>>,
}

impl LaunchHooks for CapturingHooks {
    fn on_constructing(&self, options: &mut StartupOptions) {
        self.inner.on_constructing(options);
    }

    fn on_constructed(&self, builder: &mut AppBuilder) {
        self.inner.on_constructed(builder);
    }

    fn on_building(&self, builder: &mut AppBuilder) -> Result<(), HostError> {
        self.inner.on_building(builder)
    }

    fn on_built(&self, application: &Application) {
        self.inner.on_built(application);

        let sender = match self.built.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(sender) = sender {
            let _ = sender.send(application.clone());
        }
    }
}

/// Wraps `entry_point` into a factory.
///
/// The factory spawns `main` onto the current Tokio runtime and resolves with
/// the first application the entry point builds. It fails when `main` returns
/// or panics before building, and aborts `main` when `cancel` fires first.
/// `on_completed` observes `main`'s own outcome whenever it finishes.
pub fn resolve_entry_point(
    entry_point: Arc<dyn EntryPoint>,
    hooks: Arc<dyn LaunchHooks>,
    on_completed: EntryPointCompletion,
) -> EntryPointFactory {
    Box::new(move |args, cancel| {
        Box::pin(async move {
            let (built_tx, mut built_rx) = oneshot::channel();
            let (done_tx, mut done_rx) = oneshot::channel();
            let capture: Arc<dyn LaunchHooks> = Arc::new(CapturingHooks {
                inner: hooks,
                built: Mutex::new(Some(built_tx)),
            });

            let routine = entry_point.main(args, capture);
            let task = tokio::spawn(async move {
                let result = match AssertUnwindSafe(routine).catch_unwind().await {
                    Ok(result) => result,
                    Err(_) => Err(HostError::startup("entry point panicked")),
                };
                on_completed(result.clone());
                let _ = done_tx.send(result);
            });

            tokio::select! {
                biased;
                Ok(application) = &mut built_rx => Ok(application),
                done = &mut done_rx => match done {
                    Ok(Ok(())) => Err(HostError::startup(
                        "entry point returned without building an application",
                    )),
                    Ok(Err(error)) => Err(error),
                    Err(_) => Err(HostError::startup("entry point task ended unexpectedly")),
                },
                _ = cancel.cancelled() => {
                    task.abort();
                    Err(HostError::timeout("entry point launch was cancelled before the application was built"))
                }
            }
        })
    })
}
