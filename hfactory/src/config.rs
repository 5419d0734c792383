//! Factory options and startup timeout resolution.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use hfactory::{DEFAULT_START_TIMEOUT, startup_timeout_from};
//!
//! assert_eq!(startup_timeout_from(None, false), Some(DEFAULT_START_TIMEOUT));
//! assert_eq!(startup_timeout_from(Some("30"), false), Some(Duration::from_secs(30)));
//! assert_eq!(startup_timeout_from(Some("30"), true), None);
//! ```

use std::time::Duration;

pub const START_TIMEOUT_ENV: &str = "HARBOR_FACTORY_START_TIMEOUT_SECONDS";
pub const DEFAULT_START_TIMEOUT: Duration = Duration::from_secs(300);

pub const RANDOMIZE_PORTS_KEY: &str = "Publisher:RandomizePorts";
pub const DELETE_RESOURCES_ON_SHUTDOWN_KEY: &str = "Publisher:DeleteResourcesOnShutdown";
pub const RESOURCE_NAME_SUFFIX_KEY: &str = "Publisher:ResourceNameSuffix";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryOptions {
    pub args: Vec<String>,
    pub environment_name: String,
    /// Takes precedence over [`START_TIMEOUT_ENV`].
    pub startup_timeout: Option<Duration>,
    pub detect_debugger: bool,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            environment_name: Self::DEFAULT_ENVIRONMENT.to_string(),
            startup_timeout: None,
            detect_debugger: true,
        }
    }
}

impl FactoryOptions {
    pub const DEFAULT_ENVIRONMENT: &'static str = "Development";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_environment_name(mut self, environment_name: impl Into<String>) -> Self {
        self.environment_name = environment_name.into();
        self
    }

    pub fn with_startup_timeout(mut self, startup_timeout: Duration) -> Self {
        self.startup_timeout = Some(startup_timeout);
        self
    }

    pub fn with_debugger_detection(mut self, detect_debugger: bool) -> Self {
        self.detect_debugger = detect_debugger;
        self
    }

    /// Bound on how long the entry point may take to build its application.
    /// `None` waits indefinitely.
    pub fn resolve_startup_timeout(&self) -> Option<Duration> {
        let debugging = self.detect_debugger && debugger_attached();
        if debugging {
            return None;
        }

        match self.startup_timeout {
            Some(timeout) => Some(timeout),
            None => startup_timeout_from(std::env::var(START_TIMEOUT_ENV).ok().as_deref(), false),
        }
    }
}

/// Resolves the startup timeout from a raw configuration value.
///
/// Unparsable values fall back to [`DEFAULT_START_TIMEOUT`].
pub fn startup_timeout_from(value: Option<&str>, debugger_attached: bool) -> Option<Duration> {
    if debugger_attached {
        return None;
    }

    let seconds = value.and_then(|raw| raw.trim().parse::<u64>().ok());
    Some(seconds.map_or(DEFAULT_START_TIMEOUT, Duration::from_secs))
}

#[cfg(target_os = "linux")]
pub fn debugger_attached() -> bool {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| {
            status
                .lines()
                .find_map(|line| line.strip_prefix("TracerPid:"))
                .and_then(|pid| pid.trim().parse::<u32>().ok())
        })
        .is_some_and(|pid| pid != 0)
}

#[cfg(not(target_os = "linux"))]
pub fn debugger_attached() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_values_fall_back_to_default() {
        assert_eq!(startup_timeout_from(Some("soon"), false), Some(DEFAULT_START_TIMEOUT));
        assert_eq!(startup_timeout_from(Some("-5"), false), Some(DEFAULT_START_TIMEOUT));
        assert_eq!(startup_timeout_from(Some(" 12 "), false), Some(Duration::from_secs(12)));
    }

    #[test]
    fn explicit_timeout_wins_when_no_debugger_is_considered() {
        let options = FactoryOptions::new()
            .with_startup_timeout(Duration::from_secs(1))
            .with_debugger_detection(false);

        assert_eq!(options.resolve_startup_timeout(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn defaults_target_development_environment() {
        let options = FactoryOptions::default().with_args(["--seed", "1"]);

        assert_eq!(options.environment_name, "Development");
        assert_eq!(options.args, vec!["--seed".to_string(), "1".to_string()]);
        assert!(options.detect_debugger);
    }
}
