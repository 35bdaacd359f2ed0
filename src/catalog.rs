//! The fixed catalog of metrics this collector knows how to compute.
//!
//! Each catalog entry maps a position in the caller-supplied metric-state
//! bitmask to a source field on one of the two management API documents
//! and a stable identifier code used on output lines.

/// Number of metrics in the catalog, and the required token count of a
/// metric-state string.
pub const METRIC_COUNT: usize = 7;

/// Which management API document a metric is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /api/overview` - cluster-wide queue totals and rates.
    Overview,
    /// `GET /api/nodes` - per-node resource usage; only the first node
    /// is consulted.
    Nodes,
}

impl Endpoint {
    /// Request path on the management listener.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Overview => "/api/overview",
            Endpoint::Nodes => "/api/nodes",
        }
    }
}

/// A metric the collector can compute, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    /// `queue_totals.messages`
    TotalMessages,
    /// `queue_totals.messages_ready`
    MessagesReady,
    /// `queue_totals.messages_unacknowledged`
    MessagesUnacknowledged,
    /// `queue_totals.messages_details.rate`
    MessageRate,
    /// `queue_totals.messages_ready_details.rate`
    ReadyRate,
    /// `queue_totals.messages_unacknowledged_details.rate`
    UnacknowledgedRate,
    /// `mem_used` of the first node, reported in whole mebibytes.
    MemoryUsed,
}

impl MetricId {
    /// All metrics in catalog order. The position of each entry is its
    /// flag position in the metric-state string.
    pub const ALL: [MetricId; METRIC_COUNT] = [
        MetricId::TotalMessages,
        MetricId::MessagesReady,
        MetricId::MessagesUnacknowledged,
        MetricId::MessageRate,
        MetricId::ReadyRate,
        MetricId::UnacknowledgedRate,
        MetricId::MemoryUsed,
    ];

    /// Stable identifier code emitted on output lines. A version tag may
    /// be appended at output time; it is not part of the catalog.
    pub fn code(self) -> &'static str {
        match self {
            MetricId::TotalMessages => "33:Total messages",
            MetricId::MessagesReady => "177:Messages ready to delivery",
            MetricId::MessagesUnacknowledged => "46:Messages unacknowledged",
            MetricId::MessageRate => "216:Messages processed/Sec",
            MetricId::ReadyRate => "143:Messages ready/Sec",
            MetricId::UnacknowledgedRate => "198:Messages unacknowledged/Sec",
            MetricId::MemoryUsed => "99:Total memory usage",
        }
    }

    /// The management API document this metric is extracted from.
    pub fn endpoint(self) -> Endpoint {
        match self {
            MetricId::MemoryUsed => Endpoint::Nodes,
            _ => Endpoint::Overview,
        }
    }

    /// Position of this metric in the metric-state bitmask.
    pub fn flag_index(self) -> usize {
        match self {
            MetricId::TotalMessages => 0,
            MetricId::MessagesReady => 1,
            MetricId::MessagesUnacknowledged => 2,
            MetricId::MessageRate => 3,
            MetricId::ReadyRate => 4,
            MetricId::UnacknowledgedRate => 5,
            MetricId::MemoryUsed => 6,
        }
    }
}
