//! Input resolution for one collector invocation.
//!
//! Turns the raw positional argument list into a validated [`Request`].
//! Two shapes are accepted:
//!
//! ```text
//! <metric-state> <host> <port> <username> <password>
//! <target-id> <metric-state> <host> <port> <username> <password>
//! ```
//!
//! The metric-state string is a comma-separated sequence of exactly
//! seven `1`/`0` tokens, one per catalog entry.

use crate::catalog::{Endpoint, MetricId, METRIC_COUNT};
use crate::error::CollectError;

/// Default management-plugin port (RabbitMQ 3.0 and later).
pub const DEFAULT_PORT: u16 = 15672;

/// Management-plugin port used before RabbitMQ 3.0.
pub const LEGACY_PORT: u16 = 55672;

/// Connection parameters and metric selection for one invocation.
///
/// Immutable once constructed; lives for the duration of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Opaque identifier used only to label output lines.
    pub target: Option<String>,
    /// Enabled flag per catalog position.
    pub metrics: [bool; METRIC_COUNT],
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Request {
    /// Resolve a raw argument list into a request.
    ///
    /// `default_port` is used when the port argument is the empty
    /// string, so an empty port is never handed to the transport.
    pub fn from_args(args: &[String], default_port: u16) -> Result<Self, CollectError> {
        let (target, rest) = match args.len() {
            5 => (None, args),
            6 => (Some(args[0].clone()), &args[1..]),
            _ => return Err(CollectError::WrongParameterCount),
        };

        let metrics = parse_metric_state(&rest[0])?;
        let hostname = rest[1].clone();
        let port = resolve_port(&rest[2], default_port)?;
        let (username, password) = resolve_credentials(&rest[3], &rest[4]);

        Ok(Self {
            target,
            metrics,
            hostname,
            port,
            username,
            password,
        })
    }

    /// Whether the given metric was requested.
    pub fn wants(&self, id: MetricId) -> bool {
        self.metrics[id.flag_index()]
    }

    /// Whether any requested metric is sourced from `endpoint`.
    pub fn wants_endpoint(&self, endpoint: Endpoint) -> bool {
        MetricId::ALL
            .iter()
            .any(|id| id.endpoint() == endpoint && self.wants(*id))
    }

    /// Management API base URL, e.g. `http://broker:15672`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }
}

fn parse_metric_state(raw: &str) -> Result<[bool; METRIC_COUNT], CollectError> {
    // Stray quotes come in from shell-quoted monitor configurations.
    let cleaned = raw.replace('"', "");
    let tokens: Vec<&str> = cleaned.split(',').collect();

    if tokens.len() != METRIC_COUNT {
        return Err(CollectError::InvalidMetricState(tokens.len()));
    }

    let mut flags = [false; METRIC_COUNT];
    for (flag, token) in flags.iter_mut().zip(&tokens) {
        *flag = *token == "1";
    }
    Ok(flags)
}

fn resolve_port(raw: &str, default_port: u16) -> Result<u16, CollectError> {
    if raw.is_empty() {
        return Ok(default_port);
    }
    raw.parse()
        .map_err(|_| CollectError::Other(format!("Invalid port '{raw}'.")))
}

/// Normalize both credentials, then apply the `{0}` placeholder that
/// monitor templates use to request unauthenticated access.
fn resolve_credentials(username: &str, password: &str) -> (String, String) {
    let username = normalize_credential(username);
    let password = normalize_credential(password);

    if username == "{0}" {
        (String::new(), String::new())
    } else {
        (username, password)
    }
}

/// Empty string, the two-character empty-quote marker, and a single
/// stray quote all collapse to empty.
fn normalize_credential(raw: &str) -> String {
    match raw {
        "" | "\"\"" | "\"" => String::new(),
        other => other.to_string(),
    }
}
