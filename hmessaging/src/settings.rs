use std::fmt::{Display, Formatter};

use serde::Deserialize;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::{ConnectionStringProperties, MessagingError};

/// Which event hub client the settings configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    Producer,
    BufferedProducer,
    Consumer,
    PartitionReceiver,
    Processor,
}

impl ClientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Producer => "EventHubProducerClient",
            Self::BufferedProducer => "EventHubBufferedProducerClient",
            Self::Consumer => "EventHubConsumerClient",
            Self::PartitionReceiver => "PartitionReceiver",
            Self::Processor => "EventProcessorClient",
        }
    }
}

impl Display for ClientKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EventHubsSettings {
    pub connection_string: Option<String>,
    pub fully_qualified_namespace: Option<String>,
    pub event_hub_name: Option<String>,
    pub consumer_group: Option<String>,
    pub disable_health_checks: bool,
    pub disable_tracing: bool,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

impl EventHubsSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds settings from the `:`-separated `section` of a JSON document.
    ///
    /// A missing section yields default settings. Unknown keys are ignored.
    pub fn from_json_section(json: &str, section: &str) -> Result<Self, MessagingError> {
        let document: Value = serde_json::from_str(json).map_err(|err| {
            MessagingError::invalid_configuration(format!("configuration is not valid JSON: {err}"))
        })?;

        let mut node = &document;
        for key in section.split(':').filter(|key| !key.is_empty()) {
            match node.get(key) {
                Some(child) => node = child,
                None => return Ok(Self::default()),
            }
        }

        Self::deserialize(node).map_err(|err| {
            MessagingError::invalid_configuration(format!(
                "configuration section '{section}' is invalid: {err}"
            ))
        })
    }

    pub fn with_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = Some(connection_string.into());
        self
    }

    pub fn with_namespace(mut self, fully_qualified_namespace: impl Into<String>) -> Self {
        self.fully_qualified_namespace = Some(fully_qualified_namespace.into());
        self
    }

    pub fn with_event_hub_name(mut self, event_hub_name: impl Into<String>) -> Self {
        self.event_hub_name = Some(event_hub_name.into());
        self
    }

    pub fn with_consumer_group(mut self, consumer_group: impl Into<String>) -> Self {
        self.consumer_group = Some(consumer_group.into());
        self
    }

    pub fn connection_string(&self) -> Option<&str> {
        present(&self.connection_string)
    }

    pub fn namespace(&self) -> Option<&str> {
        present(&self.fully_qualified_namespace)
    }

    pub fn event_hub_name(&self) -> Option<&str> {
        present(&self.event_hub_name)
    }

    pub fn health_checks_enabled(&self) -> bool {
        !self.disable_health_checks
    }

    pub fn tracing_enabled(&self) -> bool {
        !self.disable_tracing
    }

    /// Requires a connection string or namespace, and an event hub name.
    ///
    /// A connection string carrying an `EntityPath` supplies the missing
    /// event hub name, which is copied into the settings.
    pub fn ensure_connection_info(
        &mut self,
        client: ClientKind,
        connection_name: &str,
        section: &str,
    ) -> Result<(), MessagingError> {
        if self.connection_string().is_none() && self.namespace().is_none() {
            return Err(MessagingError::missing_connection_info(format!(
                "A {client} could not be configured. Ensure valid connection information was provided in \
                 'ConnectionStrings:{connection_name}' or specify a 'ConnectionString' or \
                 'FullyQualifiedNamespace' in the '{section}' configuration section."
            )));
        }

        if self.event_hub_name().is_some() {
            return Ok(());
        }

        match self.connection_string() {
            Some(connection_string) => {
                let props = ConnectionStringProperties::parse(connection_string)?;
                let entity_path = props.event_hub_name.ok_or_else(|| {
                    MessagingError::missing_event_hub_name(format!(
                        "A {client} could not be configured. Ensure a valid EventHubName was provided in \
                         the '{section}' configuration section, or include an EntityPath in the ConnectionString."
                    ))
                })?;
                self.event_hub_name = Some(entity_path);
                Ok(())
            }
            None => Err(MessagingError::missing_event_hub_name(format!(
                "A {client} could not be configured. Ensure a valid EventHubName was provided in \
                 the '{section}' configuration section."
            ))),
        }
    }

    /// Short namespace name, e.g. `shop` for `shop.servicebus.windows.net`.
    ///
    /// Hosts outside the service bus domain (emulators, `localhost`) are
    /// returned unchanged.
    pub fn namespace_name(&self, client: ClientKind) -> Result<String, MessagingError> {
        let malformed = || {
            MessagingError::malformed(format!(
                "A {client} could not be configured. Please ensure that the ConnectionString or \
                 FullyQualifiedNamespace is well-formed."
            ))
        };

        let host = match self.namespace() {
            Some(namespace) => Url::parse(namespace)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string))
                .ok_or_else(malformed)?,
            None => {
                let connection_string = self.connection_string().ok_or_else(malformed)?;
                ConnectionStringProperties::parse(connection_string)
                    .map_err(|_| malformed())?
                    .host()
                    .to_string()
            }
        };

        let marker = host.to_ascii_lowercase().find(".servicebus");
        Ok(match marker {
            Some(index) => host[..index].to_string(),
            None => host,
        })
    }

    /// Identifier for a client instance of this process:
    /// `{machine}-{hub}-{consumer group or "default"}-{12 hex chars}`.
    pub fn generate_client_identifier(&self) -> String {
        client_identifier(
            &machine_name(),
            self.event_hub_name().unwrap_or_default(),
            present(&self.consumer_group),
            &random_slug(),
        )
    }
}

pub fn client_identifier(
    machine: &str,
    event_hub_name: &str,
    consumer_group: Option<&str>,
    slug: &str,
) -> String {
    format!(
        "{machine}-{event_hub_name}-{}-{slug}",
        consumer_group.unwrap_or("default")
    )
}

fn random_slug() -> String {
    Uuid::new_v4().simple().to_string()[20..].to_string()
}

fn machine_name() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|value| !value.is_empty()))
        .unwrap_or_else(|| "localhost".to_string())
}
