//! HTTP client scoped to a single resource endpoint.
//!
//! ```rust
//! use hhost::ResourceClient;
//! use url::Url;
//!
//! let base = Url::parse("http://127.0.0.1:8080/api/").expect("url");
//! let client = ResourceClient::new(base, reqwest::Client::new());
//!
//! let url = client.url("orders/1").expect("joined url");
//! assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/orders/1");
//! ```

use reqwest::{Method, RequestBuilder};
use url::Url;

use crate::HostError;

#[derive(Debug, Clone)]
pub struct ResourceClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ResourceClient {
    pub fn new(base_url: Url, client: reqwest::Client) -> Self {
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> Result<Url, HostError> {
        self.base_url.join(path).map_err(|error| {
            HostError::invalid_argument(format!("invalid request path '{path}': {error}"))
        })
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, HostError> {
        Ok(self.client.request(method, self.url(path)?))
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder, HostError> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> Result<RequestBuilder, HostError> {
        self.request(Method::POST, path)
    }
}
