//! Transport seam between the search backend and the index server

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Sends a JSON body to an index endpoint and returns the JSON reply
pub trait SearchTransport {
    /// POST `body` to `path`, relative to the server root
    fn post(&self, path: &str, body: &JsonValue) -> Result<JsonValue>;
}

impl<T: SearchTransport + ?Sized> SearchTransport for &T {
    fn post(&self, path: &str, body: &JsonValue) -> Result<JsonValue> {
        (**self).post(path, body)
    }
}

/// Blocking HTTP transport
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a transport for the server at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join replaces the last segment unless the base ends with '/'
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("solidafy-paginate/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Server root requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the server root
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

impl SearchTransport for HttpTransport {
    fn post(&self, path: &str, body: &JsonValue) -> Result<JsonValue> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(body).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response.json()?)
    }
}
