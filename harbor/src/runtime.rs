//! Factory wiring helpers for test suites.

use std::sync::Arc;

use crate::{
    AppBuilder, AppFactory, EntryPoint, FactoryError, FactoryRuntimeHooks, FanoutFactoryHooks,
    HostError, LaunchHooks, MetricsObservabilityHooks, SafeFactoryHooks,
    TracingObservabilityHooks, never_cancelled,
};

/// Tracing and metrics hooks, each isolated from panics.
pub fn observability_hooks() -> Arc<dyn FactoryRuntimeHooks> {
    Arc::new(
        FanoutFactoryHooks::new()
            .with(Arc::new(SafeFactoryHooks::new(TracingObservabilityHooks)))
            .with(Arc::new(SafeFactoryHooks::new(MetricsObservabilityHooks))),
    )
}

pub fn factory<I, S>(entry_point: Arc<dyn EntryPoint>, args: I) -> AppFactory
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AppFactory::new(entry_point, args)
}

pub fn observed_factory<I, S>(entry_point: Arc<dyn EntryPoint>, args: I) -> AppFactory
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AppFactory::builder(entry_point)
        .args(args)
        .customizer(Arc::new(TracingObservabilityHooks))
        .runtime_hooks(observability_hooks())
        .build()
}

/// Builds an observed factory and waits until its application has started.
pub async fn start_observed<I, S>(
    entry_point: Arc<dyn EntryPoint>,
    args: I,
) -> Result<AppFactory, FactoryError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let factory = observed_factory(entry_point, args);
    factory.wait_until_started(&never_cancelled()).await?;
    Ok(factory)
}

/// Registers a caller-supplied HTTP client in place of the factory's default.
#[derive(Clone)]
pub struct HttpClientHooks {
    client: reqwest::Client,
}

impl HttpClientHooks {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl LaunchHooks for HttpClientHooks {
    fn on_building(&self, builder: &mut AppBuilder) -> Result<(), HostError> {
        builder.services_mut().insert(self.client.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        AppBuilder, BoxFuture, EntryPoint, EntryPointMetadata, FactoryErrorKind, HostError,
        LaunchHooks, StartupOptions, endpoint_resource, never_cancelled, resource,
    };

    use super::{HttpClientHooks, start_observed};

    struct CatalogEntryPoint;

    impl EntryPoint for CatalogEntryPoint {
        fn metadata(&self) -> EntryPointMetadata {
            EntryPointMetadata::new("catalog")
        }

        fn main(
            &self,
            args: Vec<String>,
            hooks: Arc<dyn LaunchHooks>,
        ) -> BoxFuture<'static, Result<(), HostError>> {
            Box::pin(async move {
                let mut builder = AppBuilder::create(StartupOptions::new(args), hooks);
                builder
                    .add_resource(resource("db").with_connection_string("Host=db;Database=catalog"))
                    .add_resource(endpoint_resource("web", [("http", "http://localhost:8080")])?);
                builder.build()?.run().await
            })
        }
    }

    #[tokio::test]
    async fn start_observed_waits_for_startup() {
        let factory = start_observed(Arc::new(CatalogEntryPoint), ["--seed", "3"])
            .await
            .expect("started");

        assert_eq!(
            factory.connection_string("db").expect("connection"),
            "Host=db;Database=catalog"
        );
        let client = factory.create_client("web", None).expect("client");
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");

        let missing = factory.endpoint("db", None).expect_err("db has no endpoints");
        assert_eq!(missing.kind, FactoryErrorKind::NotFound);

        factory.dispose_async().await.expect("teardown");
        factory
            .wait_for_exit(&never_cancelled())
            .await
            .expect("exited");
    }

    #[test]
    fn http_client_hooks_replace_registered_client() {
        let hooks = HttpClientHooks::new(reqwest::Client::new());
        let mut builder = AppBuilder::new(StartupOptions::default());

        hooks.on_building(&mut builder).expect("building");

        assert!(builder.services().contains::<reqwest::Client>());
    }
}
