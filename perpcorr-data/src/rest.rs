use crate::error::DataError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default timeout applied to every outbound request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-over-HTTP client shared by the exchange and aggregator integrations.
///
/// Each request carries its own fixed timeout, independent of any caller deadline. Non-2xx
/// statuses and undecodable bodies are surfaced as [`DataError`]s.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl RestClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET` the provided [`Url`] and deserialise the JSON response body.
    pub async fn get_json<T>(&self, url: &Url, headers: &[(&str, &str)]) -> Result<T, DataError>
    where
        T: DeserializeOwned,
    {
        let mut request = self.http.get(url.clone()).timeout(self.timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(%url, bytes = body.len(), "received response");

        serde_json::from_slice(&body).map_err(|error| DataError::Deserialise {
            url: url.to_string(),
            error: error.to_string(),
        })
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_TIMEOUT)
    }
}

/// Append `path` to `base`, tolerating trailing and leading slashes on either side.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, DataError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(DataError::from)
}
