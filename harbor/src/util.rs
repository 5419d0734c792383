//! Small convenience constructors for common types.

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{HostError, ResourceSpec};

pub fn resource(name: &str) -> ResourceSpec {
    ResourceSpec::new(name)
}

/// Declares a resource with named HTTP endpoints.
pub fn endpoint_resource<'a, I>(name: &str, endpoints: I) -> Result<ResourceSpec, HostError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    endpoints
        .into_iter()
        .try_fold(ResourceSpec::new(name), |spec, (endpoint, url)| {
            let url = Url::parse(url).map_err(|err| {
                HostError::invalid_argument(format!(
                    "endpoint '{endpoint}' of resource '{name}' has an invalid url '{url}': {err}"
                ))
                .with_resource(name)
            })?;
            Ok(spec.with_endpoint(endpoint, url))
        })
}

/// A token that is never cancelled, for waits bounded only by the factory.
pub fn never_cancelled() -> CancellationToken {
    CancellationToken::new()
}

#[cfg(test)]
mod tests {
    use crate::HostErrorKind;

    use super::endpoint_resource;

    #[test]
    fn endpoint_resource_collects_every_endpoint() {
        let spec = endpoint_resource(
            "api",
            [("http", "http://localhost:5000"), ("https", "https://localhost:5001")],
        )
        .expect("valid endpoints");

        assert_eq!(spec.endpoints.len(), 2);
        assert_eq!(spec.endpoints[1].name.as_str(), "https");
    }

    #[test]
    fn endpoint_resource_rejects_invalid_urls() {
        let error = endpoint_resource("api", [("http", "not a url")]).expect_err("invalid url");

        assert_eq!(error.kind, HostErrorKind::InvalidArgument);
        assert_eq!(error.resource.as_deref(), Some("api"));
    }
}
