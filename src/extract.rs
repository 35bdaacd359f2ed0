//! Parsers for the two management API documents.
//!
//! Extraction is strict: an enabled metric whose source field is absent
//! from the response fails the whole invocation with a metric-not-found
//! error instead of emitting a placeholder value.

use serde::Deserialize;
use serde_json::Number;

use crate::catalog::{Endpoint, MetricId};
use crate::error::CollectError;
use crate::metric::{Metric, Timing};
use crate::request::Request;

/// `GET /api/overview` response, reduced to the fields the catalog reads.
#[derive(Debug, Deserialize)]
struct OverviewDocument {
    queue_totals: Option<QueueTotals>,
}

#[derive(Debug, Default, Deserialize)]
struct QueueTotals {
    messages: Option<Number>,
    messages_ready: Option<Number>,
    messages_unacknowledged: Option<Number>,
    messages_details: Option<RateDetails>,
    messages_ready_details: Option<RateDetails>,
    messages_unacknowledged_details: Option<RateDetails>,
}

#[derive(Debug, Deserialize)]
struct RateDetails {
    rate: Option<Number>,
}

/// One element of the `GET /api/nodes` response array.
#[derive(Debug, Deserialize)]
struct NodeInfo {
    mem_used: Option<u64>,
}

impl QueueTotals {
    fn field(&self, id: MetricId) -> Option<Number> {
        match id {
            MetricId::TotalMessages => self.messages.clone(),
            MetricId::MessagesReady => self.messages_ready.clone(),
            MetricId::MessagesUnacknowledged => self.messages_unacknowledged.clone(),
            MetricId::MessageRate => rate(&self.messages_details),
            MetricId::ReadyRate => rate(&self.messages_ready_details),
            MetricId::UnacknowledgedRate => rate(&self.messages_unacknowledged_details),
            MetricId::MemoryUsed => None,
        }
    }
}

fn rate(details: &Option<RateDetails>) -> Option<Number> {
    details.as_ref().and_then(|d| d.rate.clone())
}

/// Extract the enabled overview metrics from an accumulated body, in
/// catalog order.
pub fn overview_metrics(
    body: &str,
    request: &Request,
    timing: Timing,
) -> Result<Vec<Metric>, CollectError> {
    let document: OverviewDocument = serde_json::from_str(body)
        .map_err(|e| CollectError::Other(format!("Malformed overview response: {e}")))?;
    let totals = document.queue_totals.unwrap_or_default();

    let mut metrics = Vec::new();
    for id in MetricId::ALL {
        if id.endpoint() != Endpoint::Overview || !request.wants(id) {
            continue;
        }
        let value = totals
            .field(id)
            .ok_or(CollectError::MetricNotFound(id.code()))?;
        metrics.push(Metric::new(id, value, timing));
    }
    Ok(metrics)
}

/// Extract the node memory metric, if enabled, from an accumulated body.
///
/// Only the first node of the array is consulted; `mem_used` bytes are
/// reported as whole mebibytes (floor division by 1024 twice).
pub fn node_metrics(
    body: &str,
    request: &Request,
    timing: Timing,
) -> Result<Vec<Metric>, CollectError> {
    let nodes: Vec<NodeInfo> = serde_json::from_str(body)
        .map_err(|e| CollectError::Other(format!("Malformed nodes response: {e}")))?;

    if !request.wants(MetricId::MemoryUsed) {
        return Ok(Vec::new());
    }

    let mem_used = nodes
        .first()
        .and_then(|node| node.mem_used)
        .ok_or(CollectError::MetricNotFound(MetricId::MemoryUsed.code()))?;
    let mebibytes = mem_used / 1024 / 1024;

    Ok(vec![Metric::new(
        MetricId::MemoryUsed,
        Number::from(mebibytes),
        timing,
    )])
}
