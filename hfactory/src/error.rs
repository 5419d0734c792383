//! Factory-level error types and conversion helpers.
//!
//! ```rust
//! use hfactory::{FactoryError, FactoryErrorKind};
//!
//! let err = FactoryError::not_started("the application has not been started");
//! assert_eq!(err.kind, FactoryErrorKind::NotStarted);
//! assert!(err.to_string().contains("has not been started"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use hcheckpoint::WaitError;
use hhost::{HostError, HostErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryErrorKind {
    Configuration,
    InvalidArgument,
    Launch,
    Timeout,
    Cancelled,
    NotStarted,
    NotFound,
    Ambiguous,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryError {
    pub kind: FactoryErrorKind,
    pub message: String,
}

impl FactoryError {
    pub fn new(kind: FactoryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::Configuration, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::InvalidArgument, message)
    }

    pub fn launch(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::Launch, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::Timeout, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::Cancelled, message)
    }

    pub fn not_started(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::NotStarted, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::NotFound, message)
    }

    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::Ambiguous, message)
    }

    pub fn shutdown(message: impl Into<String>) -> Self {
        Self::new(FactoryErrorKind::Shutdown, message)
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == FactoryErrorKind::Configuration
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == FactoryErrorKind::Timeout
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FactoryErrorKind::Cancelled
    }
}

impl Display for FactoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for FactoryError {}

impl From<HostError> for FactoryError {
    fn from(value: HostError) -> Self {
        let kind = match value.kind {
            HostErrorKind::Configuration => FactoryErrorKind::Configuration,
            HostErrorKind::InvalidArgument => FactoryErrorKind::InvalidArgument,
            HostErrorKind::Startup | HostErrorKind::Other => FactoryErrorKind::Launch,
            HostErrorKind::Shutdown => FactoryErrorKind::Shutdown,
            HostErrorKind::Timeout => FactoryErrorKind::Timeout,
            HostErrorKind::NotFound => FactoryErrorKind::NotFound,
            HostErrorKind::Ambiguous => FactoryErrorKind::Ambiguous,
            HostErrorKind::Cancelled => FactoryErrorKind::Cancelled,
        };
        FactoryError::new(kind, value.message)
    }
}

impl From<WaitError<FactoryError>> for FactoryError {
    fn from(value: WaitError<FactoryError>) -> Self {
        match value {
            WaitError::Failed(error) => error,
            WaitError::Cancelled => {
                FactoryError::cancelled("checkpoint was cancelled because the factory was disposed")
            }
            WaitError::Interrupted => FactoryError::cancelled("wait was cancelled by the caller"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_errors_map_to_factory_kinds() {
        let startup = FactoryError::from(HostError::startup("port in use"));
        assert_eq!(startup.kind, FactoryErrorKind::Launch);
        assert_eq!(startup.message, "port in use");

        let ambiguous = FactoryError::from(HostError::ambiguous("two endpoints"));
        assert_eq!(ambiguous.kind, FactoryErrorKind::Ambiguous);
    }

    #[test]
    fn wait_errors_preserve_root_cause() {
        let root = FactoryError::launch("boom");
        assert_eq!(FactoryError::from(WaitError::Failed(root.clone())), root);
        assert!(FactoryError::from(WaitError::<FactoryError>::Cancelled).is_cancelled());
        assert!(FactoryError::from(WaitError::<FactoryError>::Interrupted).is_cancelled());
    }
}
