use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagingErrorKind {
    MissingConnectionInfo,
    MissingEventHubName,
    MalformedConnectionInfo,
    InvalidConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingError {
    pub kind: MessagingErrorKind,
    pub message: String,
}

impl MessagingError {
    pub fn new(kind: MessagingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_connection_info(message: impl Into<String>) -> Self {
        Self::new(MessagingErrorKind::MissingConnectionInfo, message)
    }

    pub fn missing_event_hub_name(message: impl Into<String>) -> Self {
        Self::new(MessagingErrorKind::MissingEventHubName, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(MessagingErrorKind::MalformedConnectionInfo, message)
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(MessagingErrorKind::InvalidConfiguration, message)
    }
}

impl Display for MessagingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for MessagingError {}
