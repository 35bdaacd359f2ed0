//! HTTP collection against the broker's management API.

use std::time::Instant;

use reqwest::{redirect, Client, StatusCode};
use tracing::debug;

use crate::catalog::Endpoint;
use crate::error::CollectError;
use crate::metric::{epoch_ms, Timing};
use crate::request::Request;

/// A fully accumulated response body plus the timing of the request
/// that produced it.
#[derive(Debug)]
pub struct Fetched {
    pub body: String,
    pub timing: Timing,
}

/// Client for one broker's management HTTP API.
///
/// Basic authentication is always sent, even when both credentials are
/// empty. Redirects are not followed so that a 301 from a misconfigured
/// management listener stays observable.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl ManagementClient {
    /// Build a client for the request's target broker.
    pub fn new(request: &Request) -> Result<Self, CollectError> {
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| CollectError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: request.base_url(),
            username: request.username.clone(),
            password: request.password.clone(),
        })
    }

    /// Perform one GET against `endpoint` and accumulate the full body.
    ///
    /// The start timestamp is captured immediately before the request is
    /// issued; elapsed time covers dispatch through body accumulation.
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<Fetched, CollectError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let started_ms = epoch_ms();
        let started = Instant::now();

        debug!(%url, "requesting management API document");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(CollectError::InvalidAuthentication);
        }
        if status == StatusCode::MOVED_PERMANENTLY {
            return Err(CollectError::Http(
                "Redirect detected. Please check RabbitMQ Management port configuration."
                    .to_string(),
            ));
        }
        if status != StatusCode::OK {
            return Err(CollectError::Http(format!(
                "Response error ({}).",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let timing = Timing {
            started_ms,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        debug!(
            path = endpoint.path(),
            bytes = body.len(),
            elapsed_ms = timing.elapsed_ms,
            "document accumulated"
        );

        Ok(Fetched { body, timing })
    }
}
