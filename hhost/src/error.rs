//! Host-level error types and classifications.
//!
//! ```rust
//! use hhost::{HostError, HostErrorKind};
//!
//! let err = HostError::not_found("resource 'db' was not found").with_resource("db");
//! assert_eq!(err.kind, HostErrorKind::NotFound);
//! assert!(err.to_string().contains("resource=db"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorKind {
    Configuration,
    InvalidArgument,
    Startup,
    Shutdown,
    Timeout,
    NotFound,
    Ambiguous,
    Cancelled,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError {
    pub kind: HostErrorKind,
    pub message: String,
    pub resource: Option<String>,
}

impl HostError {
    pub fn new(kind: HostErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            resource: None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::Configuration, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::InvalidArgument, message)
    }

    pub fn startup(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::Startup, message)
    }

    pub fn shutdown(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::Shutdown, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::Timeout, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::NotFound, message)
    }

    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::Ambiguous, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::Cancelled, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(HostErrorKind::Other, message)
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self.kind,
            HostErrorKind::NotFound | HostErrorKind::Ambiguous | HostErrorKind::InvalidArgument
        )
    }
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.resource {
            Some(resource) => write!(f, "{:?} [resource={}]: {}", self.kind, resource, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for HostError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_errors_are_classified() {
        assert!(HostError::not_found("missing").is_lookup_error());
        assert!(HostError::ambiguous("two").is_lookup_error());
        assert!(!HostError::startup("boom").is_lookup_error());
    }

    #[test]
    fn display_without_resource_uses_kind_and_message() {
        let error = HostError::configuration("no host registered");
        assert_eq!(error.to_string(), "Configuration: no host registered");
    }
}
