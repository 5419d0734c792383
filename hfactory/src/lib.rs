//! Application factory: launches an entry point once, observes its startup
//! through four checkpoints and tears it down in order.

mod checkpoints;
mod config;
mod error;
mod factory;
mod hooks;
mod intercept;
mod launcher;

pub use config::{
    DEFAULT_START_TIMEOUT, DELETE_RESOURCES_ON_SHUTDOWN_KEY, FactoryOptions, RANDOMIZE_PORTS_KEY,
    RESOURCE_NAME_SUFFIX_KEY, START_TIMEOUT_ENV, debugger_attached, startup_timeout_from,
};
pub use error::{FactoryError, FactoryErrorKind};
pub use factory::{AppFactory, AppFactoryBuilder};
pub use hooks::{CheckpointKind, FactoryRuntimeHooks, NoopFactoryRuntimeHooks, TeardownMode};
pub use launcher::validate_entry_point;
