//! Unified facade over the harbor workspace crates.
//!
//! This crate is designed to be the single dependency for most test suites.
//! It re-exports the core harbor crates and provides helpers for launching an
//! entry point under observation and for declaring resources.

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use hcheckpoint;
pub use hcommon;
pub use hfactory;
pub use hhost;
pub use hmessaging;
pub use hobserve;

pub use hcheckpoint::{Checkpoint, Resolution, WaitError};
pub use hcommon::{
    BoxFuture, ConfigOverrides, EndpointName, ResourceName, is_project_name_valid,
    sanitize_project_name,
};
pub use hfactory::{
    AppFactory, AppFactoryBuilder, CheckpointKind, DEFAULT_START_TIMEOUT, FactoryError,
    FactoryErrorKind, FactoryOptions, FactoryRuntimeHooks, NoopFactoryRuntimeHooks,
    START_TIMEOUT_ENV, TeardownMode, validate_entry_point,
};
pub use hhost::{
    AppBuilder, Application, ApplicationLifetime, BuilderView, EntryPoint, EntryPointMetadata,
    Host, HostError, HostErrorKind, LaunchHooks, LifetimeHost, NoopLaunchHooks, ResourceClient,
    ResourceSpec, StartupOptions,
};
pub use hmessaging::{ClientKind, EventHubsSettings, MessagingError, MessagingErrorKind};
pub use hobserve::{
    FanoutFactoryHooks, MetricsObservabilityHooks, SafeFactoryHooks, TracingObservabilityHooks,
};

pub use runtime::{
    HttpClientHooks, factory, observability_hooks, observed_factory, start_observed,
};
pub use util::{endpoint_resource, never_cancelled, resource};
