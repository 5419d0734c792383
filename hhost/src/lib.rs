//! Application host model: the entry-point contract, the three-stage launch
//! handshake, the composition root and the built application.
//!
//! ```rust
//! use hhost::{AppBuilder, ResourceSpec, StartupOptions};
//!
//! let mut builder = AppBuilder::new(StartupOptions::new(["--seed"]).with_application_name("shop"));
//! builder.add_resource(ResourceSpec::new("db").with_connection_string("Host=localhost"));
//!
//! let application = builder.build().expect("application");
//! assert_eq!(application.connection_string("db").expect("connection"), "Host=localhost");
//! assert!(application.lifetime().is_some());
//! ```

mod application;
mod builder;
mod client;
mod entry;
mod error;
mod hooks;
mod host;
mod lifetime;
mod options;
mod resources;
mod services;

pub mod prelude {
    pub use crate::{
        AppBuilder, Application, ApplicationLifetime, EntryPoint, EntryPointMetadata, Host,
        HostError, HostErrorKind, LaunchHooks, ResourceSpec, StartupOptions,
    };
}

pub use application::Application;
pub use builder::{AppBuilder, BuilderView};
pub use client::ResourceClient;
pub use entry::{
    EntryPoint, EntryPointCompletion, EntryPointFactory, EntryPointMetadata, resolve_entry_point,
};
pub use error::{HostError, HostErrorKind};
pub use hooks::{LaunchHooks, NoopLaunchHooks};
pub use host::{Host, HostFactory, LifetimeHost};
pub use lifetime::ApplicationLifetime;
pub use options::StartupOptions;
pub use resources::{EndpointSpec, ResourceCatalog, ResourceSpec};
pub use services::ServiceRegistry;
