//! Shared HTTP client.
//!
//! One `Client` is built per run and shared read-only by every worker. It
//! pairs a [`Transport`] (curl in production, scripted doubles in tests) with
//! the retry policy, so a GET either returns a buffered 2xx body or a
//! classified [`FetchError`] once retries are exhausted.

mod curl_transport;

pub use curl_transport::CurlTransport;

use crate::retry::{run_with_retry, FetchError, RetryPolicy};
use std::time::Duration;

/// Browser-like identity sent on every request; the site rejects bare clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Status and fully buffered body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Performs a single GET attempt. Implementations must not retry.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Per-request settings for the curl transport.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Connect timeout per attempt.
    pub connect_timeout: Duration,
    /// Whole-transfer timeout per attempt.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Transport plus retry policy. `Sync`, so workers share it through an `Arc`.
pub struct Client {
    transport: Box<dyn Transport>,
    policy: RetryPolicy,
}

impl Client {
    /// Client backed by libcurl.
    pub fn new(options: ClientOptions, policy: RetryPolicy) -> Self {
        Self::with_transport(CurlTransport::new(options), policy)
    }

    /// Client backed by an arbitrary transport.
    pub fn with_transport<T: Transport + 'static>(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport: Box::new(transport),
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GETs `url`, retrying per policy, and returns the body of the first 2xx response.
    pub fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        run_with_retry(&self.policy, || {
            let resp = self.transport.get(url)?;
            if !(200..300).contains(&resp.status) {
                return Err(FetchError::Http(resp.status));
            }
            Ok(resp.body)
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("policy", &self.policy).finish_non_exhaustive()
    }
}
