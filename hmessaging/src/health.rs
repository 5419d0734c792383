use crate::{ClientKind, EventHubsSettings, MessagingError};

/// Tracing target pattern covering every event hub client.
pub const TRACING_TARGET_PATTERN: &str = "Azure.Messaging.EventHubs.*";

/// Tracing targets to subscribe to, if tracing is enabled.
pub fn tracing_target(settings: &EventHubsSettings) -> Option<&'static str> {
    settings.tracing_enabled().then_some(TRACING_TARGET_PATTERN)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeTarget {
    ConnectionString(String),
    Namespace {
        fully_qualified_namespace: String,
        event_hub_name: String,
    },
}

/// How the health check reaches the event hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthProbe {
    /// The configured client is a producer and is probed directly.
    ReuseProducer,
    /// A dedicated producer is created for probing.
    DedicatedProducer {
        identifier: String,
        target: ProbeTarget,
    },
}

/// Derives the health probe for `client`, or `None` when health checks are
/// disabled.
pub fn health_probe(
    client: ClientKind,
    settings: &EventHubsSettings,
) -> Result<Option<HealthProbe>, MessagingError> {
    if !settings.health_checks_enabled() {
        return Ok(None);
    }

    if client == ClientKind::Producer {
        return Ok(Some(HealthProbe::ReuseProducer));
    }

    let event_hub_name = settings.event_hub_name().unwrap_or_default();
    let identifier = format!("HealthCheck-{event_hub_name}");

    let target = match (settings.connection_string(), settings.namespace()) {
        (Some(connection_string), _) => ProbeTarget::ConnectionString(connection_string.to_string()),
        (None, Some(namespace)) => ProbeTarget::Namespace {
            fully_qualified_namespace: namespace.to_string(),
            event_hub_name: event_hub_name.to_string(),
        },
        (None, None) => {
            return Err(MessagingError::missing_connection_info(format!(
                "A {client} health probe needs a ConnectionString or FullyQualifiedNamespace."
            )));
        }
    };

    Ok(Some(HealthProbe::DedicatedProducer { identifier, target }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_health_checks_produce_no_probe() {
        let settings = EventHubsSettings {
            disable_health_checks: true,
            ..EventHubsSettings::new().with_namespace("https://shop.servicebus.windows.net")
        };

        assert_eq!(health_probe(ClientKind::Consumer, &settings), Ok(None));
        assert_eq!(tracing_target(&settings), Some(TRACING_TARGET_PATTERN));

        let quiet = EventHubsSettings {
            disable_tracing: true,
            ..settings
        };
        assert_eq!(tracing_target(&quiet), None);
    }

    #[test]
    fn producers_are_probed_directly() {
        let settings = EventHubsSettings::new().with_connection_string("Endpoint=sb://shop/");

        assert_eq!(
            health_probe(ClientKind::Producer, &settings),
            Ok(Some(HealthProbe::ReuseProducer))
        );
    }

    #[test]
    fn other_clients_get_a_dedicated_producer_probe() {
        let settings = EventHubsSettings::new()
            .with_namespace("https://shop.servicebus.windows.net")
            .with_event_hub_name("orders");

        let probe = health_probe(ClientKind::Processor, &settings).expect("probe");

        assert_eq!(
            probe,
            Some(HealthProbe::DedicatedProducer {
                identifier: "HealthCheck-orders".to_string(),
                target: ProbeTarget::Namespace {
                    fully_qualified_namespace: "https://shop.servicebus.windows.net".to_string(),
                    event_hub_name: "orders".to_string(),
                },
            })
        );
    }

    #[test]
    fn connection_string_takes_precedence_for_probe_target() {
        let settings = EventHubsSettings::new()
            .with_connection_string("Endpoint=sb://shop/;EntityPath=orders")
            .with_namespace("https://other.servicebus.windows.net");

        let probe = health_probe(ClientKind::BufferedProducer, &settings)
            .expect("probe")
            .expect("enabled");

        assert!(matches!(
            probe,
            HealthProbe::DedicatedProducer {
                target: ProbeTarget::ConnectionString(_),
                ..
            }
        ));
    }
}
