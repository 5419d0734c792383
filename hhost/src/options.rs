//! Startup options handed to the `constructing` stage of the launch handshake.
//!
//! ```rust
//! use hhost::StartupOptions;
//!
//! let options = StartupOptions::new(["--verbose"])
//!     .with_application_name("orders")
//!     .with_config("Publisher:RandomizePorts", "true");
//!
//! assert_eq!(options.args, vec!["--verbose".to_string()]);
//! assert_eq!(options.config("Publisher:RandomizePorts"), Some("true"));
//! assert_eq!(options.environment_name, StartupOptions::DEFAULT_ENVIRONMENT);
//! ```

use hcommon::ConfigOverrides;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupOptions {
    pub args: Vec<String>,
    pub environment_name: String,
    pub application_name: String,
    pub disable_dashboard: bool,
    pub configuration: ConfigOverrides,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            environment_name: Self::DEFAULT_ENVIRONMENT.to_string(),
            application_name: String::new(),
            disable_dashboard: false,
            configuration: ConfigOverrides::new(),
        }
    }
}

impl StartupOptions {
    pub const DEFAULT_ENVIRONMENT: &'static str = "Production";

    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_environment_name(mut self, environment_name: impl Into<String>) -> Self {
        self.environment_name = environment_name.into();
        self
    }

    pub fn with_application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = application_name.into();
        self
    }

    pub fn with_dashboard_disabled(mut self, disable_dashboard: bool) -> Self {
        self.disable_dashboard = disable_dashboard;
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration.insert(key.into(), value.into());
        self
    }

    pub fn config(&self, key: &str) -> Option<&str> {
        self.configuration.get(key).map(String::as_str)
    }
}
