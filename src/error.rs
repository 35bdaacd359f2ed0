//! Error taxonomy for a collector invocation.
//!
//! Every failure is terminal: there is no retry and no partial-success
//! reporting. Internal logic returns these as values; only the binary's
//! top level converts one into a printed diagnostic and a process exit
//! code.

use thiserror::Error;

/// Errors that can occur while resolving input or collecting metrics.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The positional argument list had neither 5 nor 6 entries.
    #[error("Wrong number of parameters.")]
    WrongParameterCount,

    /// The metric-state string did not have exactly seven tokens.
    #[error("Invalid metric state. Expected 7 comma-separated tokens, got {0}.")]
    InvalidMetricState(usize),

    /// The management API rejected the credentials (HTTP 401).
    #[error("Invalid authentication.")]
    InvalidAuthentication,

    /// Any other non-200 response, message carries the detail.
    #[error("{0}")]
    Http(String),

    /// Host unresolvable or connection refused.
    #[error("Unknown host.")]
    UnknownHost,

    /// An enabled metric's source field was absent from the response.
    #[error("Unable to collect metric {0}")]
    MetricNotFound(&'static str),

    /// Anything the taxonomy does not classify.
    #[error("{0}")]
    Other(String),
}

impl CollectError {
    /// Process exit code associated with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CollectError::InvalidAuthentication => 2,
            CollectError::WrongParameterCount => 3,
            CollectError::MetricNotFound(_) => 8,
            CollectError::InvalidMetricState(_) => 9,
            CollectError::Http(_) => 19,
            CollectError::UnknownHost => 20,
            CollectError::Other(_) => 1,
        }
    }
}

impl From<reqwest::Error> for CollectError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            CollectError::UnknownHost
        } else {
            CollectError::Other(err.to_string())
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(err: std::io::Error) -> Self {
        CollectError::Other(err.to_string())
    }
}
