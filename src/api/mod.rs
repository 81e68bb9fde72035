/// HTTP client for the BFHL classification endpoint.
///
/// Uses the synchronous `ureq` client. One [`BfhlClient`] is built per
/// process from the resolved [`ApiConfig`] and reused for every submission.
///
/// The form controller talks to the endpoint through the [`Transport`]
/// trait so tests can count and inspect outgoing requests without a network.
use std::time::Duration;

pub mod protocol;

use crate::config::schema::ApiConfig;
use crate::error::SubmitError;
use protocol::{BfhlRequest, BfhlResponse};

/// Default endpoint used when no config layer overrides it.
pub const DEFAULT_API_URL: &str = "https://bajaj-assesment-api.onrender.com/bfhl";

/// Something that can carry a [`BfhlRequest`] to the endpoint and bring back
/// the decoded answer.
pub trait Transport {
    fn send(&self, request: &BfhlRequest) -> Result<BfhlResponse, SubmitError>;
}

/// Synchronous BFHL HTTP client.
#[derive(Debug, Clone)]
pub struct BfhlClient {
    url: String,
    timeout: Duration,
}

impl BfhlClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    /// Build a client from the resolved config.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.url.trim(), Duration::from_millis(config.timeout_ms))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for BfhlClient {
    /// `POST` the request as JSON.
    ///
    /// Any non-2xx status becomes [`SubmitError::Api`] regardless of what the
    /// body says.
    fn send(&self, request: &BfhlRequest) -> Result<BfhlResponse, SubmitError> {
        let result = ureq::post(&self.url)
            .timeout(self.timeout)
            .set("Content-Type", "application/json")
            .send_json(request);

        match result {
            Ok(resp) => resp
                .into_json::<BfhlResponse>()
                .map_err(|e| SubmitError::Decode(e.to_string())),
            Err(ureq::Error::Status(status, _)) => Err(SubmitError::Api { status }),
            Err(ureq::Error::Transport(t)) => Err(SubmitError::Transport(t.to_string())),
        }
    }
}
