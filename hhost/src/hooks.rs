//! Three-stage launch handshake invoked by an entry point while it composes
//! its application.
//!
//! ```rust
//! use hhost::{LaunchHooks, NoopLaunchHooks};
//!
//! fn accepts_hooks(_hooks: &dyn LaunchHooks) {}
//!
//! let hooks = NoopLaunchHooks;
//! accepts_hooks(&hooks);
//! ```

use crate::{AppBuilder, Application, HostError, StartupOptions};

pub trait LaunchHooks: Send + Sync {
    /// Runs before the builder exists.
    fn on_constructing(&self, _options: &mut StartupOptions) {}

    fn on_constructed(&self, _builder: &mut AppBuilder) {}

    /// Last point before the host is assembled. An error aborts the build.
    fn on_building(&self, _builder: &mut AppBuilder) -> Result<(), HostError> {
        Ok(())
    }

    fn on_built(&self, _application: &Application) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLaunchHooks;

impl LaunchHooks for NoopLaunchHooks {}
