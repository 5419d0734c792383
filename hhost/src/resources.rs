//! Resource declarations and endpoint/connection lookups.
//!
//! ```rust
//! use hhost::{ResourceCatalog, ResourceSpec};
//! use url::Url;
//!
//! let mut catalog = ResourceCatalog::new();
//! catalog.add(
//!     ResourceSpec::new("api")
//!         .with_endpoint("http", Url::parse("http://127.0.0.1:5080").expect("url")),
//! );
//!
//! let endpoint = catalog.endpoint("api", None).expect("single endpoint");
//! assert_eq!(endpoint.port(), Some(5080));
//! ```

use hcommon::{EndpointName, Registry, ResourceName};
use url::Url;

use crate::HostError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: EndpointName,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    pub name: ResourceName,
    pub endpoints: Vec<EndpointSpec>,
    pub connection_string: Option<String>,
}

impl ResourceSpec {
    pub fn new(name: impl Into<ResourceName>) -> Self {
        Self {
            name: name.into(),
            endpoints: Vec::new(),
            connection_string: None,
        }
    }

    pub fn with_endpoint(mut self, name: impl Into<EndpointName>, url: Url) -> Self {
        self.endpoints.push(EndpointSpec {
            name: name.into(),
            url,
        });
        self
    }

    pub fn with_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = Some(connection_string.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: Registry<ResourceName, ResourceSpec>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, resource: ResourceSpec) -> Option<ResourceSpec> {
        self.resources.insert(resource.name.clone(), resource)
    }

    pub fn get(&self, name: &str) -> Option<&ResourceSpec> {
        self.resources.get(name)
    }

    pub fn names(&self) -> Vec<ResourceName> {
        let mut names = self.resources.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn endpoint(&self, resource: &str, endpoint: Option<&str>) -> Result<Url, HostError> {
        let spec = self.require(resource)?;

        if spec.endpoints.is_empty() {
            return Err(
                HostError::not_found(format!("resource '{resource}' has no endpoints"))
                    .with_resource(resource),
            );
        }

        match endpoint {
            Some(endpoint) => spec
                .endpoints
                .iter()
                .find(|candidate| candidate.name.as_str() == endpoint)
                .map(|candidate| candidate.url.clone())
                .ok_or_else(|| {
                    HostError::not_found(format!(
                        "endpoint '{endpoint}' was not found on resource '{resource}'"
                    ))
                    .with_resource(resource)
                }),
            None => match spec.endpoints.as_slice() {
                [single] => Ok(single.url.clone()),
                candidates => {
                    let names = candidates
                        .iter()
                        .map(|candidate| candidate.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(HostError::ambiguous(format!(
                        "resource '{resource}' has multiple endpoints ({names}); specify an endpoint name"
                    ))
                    .with_resource(resource))
                }
            },
        }
    }

    pub fn connection_string(&self, resource: &str) -> Result<String, HostError> {
        self.require(resource)?
            .connection_string
            .clone()
            .ok_or_else(|| {
                HostError::not_found(format!(
                    "resource '{resource}' does not expose a connection string"
                ))
                .with_resource(resource)
            })
    }

    fn require(&self, resource: &str) -> Result<&ResourceSpec, HostError> {
        if resource.trim().is_empty() {
            return Err(HostError::invalid_argument("resource name must not be empty"));
        }

        self.resources.get(resource).ok_or_else(|| {
            HostError::not_found(format!("resource '{resource}' was not found"))
                .with_resource(resource)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HostErrorKind;

    fn url(value: &str) -> Url {
        Url::parse(value).expect("valid url")
    }

    fn catalog() -> ResourceCatalog {
        let mut catalog = ResourceCatalog::new();
        catalog.add(
            ResourceSpec::new("api")
                .with_endpoint("http", url("http://127.0.0.1:5080"))
                .with_endpoint("https", url("https://127.0.0.1:5443")),
        );
        catalog.add(
            ResourceSpec::new("cache")
                .with_endpoint("tcp", url("tcp://127.0.0.1:6379"))
                .with_connection_string("127.0.0.1:6379"),
        );
        catalog.add(ResourceSpec::new("worker"));
        catalog
    }

    #[test]
    fn single_endpoint_resolves_without_name() {
        let endpoint = catalog().endpoint("cache", None).expect("single endpoint");
        assert_eq!(endpoint.as_str(), "tcp://127.0.0.1:6379");
    }

    #[test]
    fn named_endpoint_resolves() {
        let endpoint = catalog()
            .endpoint("api", Some("https"))
            .expect("named endpoint");
        assert_eq!(endpoint.port(), Some(5443));
    }

    #[test]
    fn multiple_endpoints_without_name_is_ambiguous_and_names_candidates() {
        let error = catalog().endpoint("api", None).expect_err("ambiguous");

        assert_eq!(error.kind, HostErrorKind::Ambiguous);
        assert!(error.message.contains("http"));
        assert!(error.message.contains("https"));
    }

    #[test]
    fn lookups_report_missing_resources_and_endpoints() {
        let catalog = catalog();

        assert_eq!(
            catalog.endpoint("missing", None).expect_err("missing").kind,
            HostErrorKind::NotFound
        );
        assert_eq!(
            catalog.endpoint("worker", None).expect_err("no endpoints").kind,
            HostErrorKind::NotFound
        );
        assert_eq!(
            catalog.endpoint("api", Some("grpc")).expect_err("unknown endpoint").kind,
            HostErrorKind::NotFound
        );
        assert_eq!(
            catalog.endpoint(" ", None).expect_err("blank").kind,
            HostErrorKind::InvalidArgument
        );
    }

    #[test]
    fn connection_string_requires_declaration() {
        let catalog = catalog();

        assert_eq!(
            catalog.connection_string("cache").expect("connection string"),
            "127.0.0.1:6379"
        );
        let error = catalog.connection_string("api").expect_err("no connection string");
        assert_eq!(error.kind, HostErrorKind::NotFound);
        assert_eq!(error.resource.as_deref(), Some("api"));
    }
}
