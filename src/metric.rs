//! The computed metric value type.

use serde_json::Number;

use crate::catalog::MetricId;

/// A single computed measurement.
///
/// Created during response parsing and consumed immediately by the
/// output writer; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub id: MetricId,
    /// The extracted value, kept as a JSON number so that integers and
    /// floats render exactly as the API reported them.
    pub value: Number,
    /// Unix timestamp in milliseconds captured immediately before the
    /// producing request was issued.
    pub timestamp_ms: u64,
    /// Milliseconds from request dispatch to full body accumulation.
    pub elapsed_ms: u64,
}

/// Timing of the request that produced a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub started_ms: u64,
    pub elapsed_ms: u64,
}

impl Metric {
    /// Build a metric from an extracted value and the producing
    /// request's timing.
    pub fn new(id: MetricId, value: Number, timing: Timing) -> Self {
        Self {
            id,
            value,
            timestamp_ms: timing.started_ms,
            elapsed_ms: timing.elapsed_ms,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn epoch_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
