//! Event hub client settings: connection validation, namespace naming,
//! client identifiers and health probes.
//!
//! ```rust
//! use hmessaging::{ClientKind, EventHubsSettings, HealthProbe, health_probe};
//!
//! let mut settings = EventHubsSettings::new()
//!     .with_connection_string("Endpoint=sb://shop.servicebus.windows.net/;EntityPath=orders");
//! settings
//!     .ensure_connection_info(ClientKind::Producer, "orders", "Harbor:Messaging:EventHubs")
//!     .expect("valid settings");
//!
//! assert_eq!(settings.event_hub_name(), Some("orders"));
//! assert_eq!(settings.namespace_name(ClientKind::Producer).expect("namespace"), "shop");
//! assert_eq!(
//!     health_probe(ClientKind::Producer, &settings).expect("probe"),
//!     Some(HealthProbe::ReuseProducer)
//! );
//! ```

mod connection;
mod error;
mod health;
mod settings;

pub use connection::ConnectionStringProperties;
pub use error::{MessagingError, MessagingErrorKind};
pub use health::{HealthProbe, ProbeTarget, TRACING_TARGET_PATTERN, health_probe, tracing_target};
pub use settings::{ClientKind, EventHubsSettings, client_identifier};
