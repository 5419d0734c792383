//! Common imports for most harbor test suites.

pub use crate::harbor_args;
pub use crate::{
    AppBuilder, AppFactory, Application, ApplicationLifetime, BoxFuture, BuilderView, EntryPoint,
    EntryPointMetadata, FactoryError, FactoryErrorKind, FactoryOptions, Host, HostError,
    LaunchHooks, ResourceClient, ResourceSpec, StartupOptions,
};
pub use crate::{
    endpoint_resource, factory, never_cancelled, observability_hooks, observed_factory, resource,
    start_observed,
};
