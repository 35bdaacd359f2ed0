//! # rabbitwatch
//!
//! One-shot RabbitMQ performance collector for the management HTTP API.
//!
//! Given connection parameters and a bitmask selecting which of seven
//! known metrics to compute, the collector issues two concurrent GET
//! requests against the broker's `/api/overview` and `/api/nodes`
//! endpoints, extracts the enabled fields, and prints one pipe-delimited
//! line per metric to stdout. Any classified failure (authentication,
//! HTTP status, transport, schema mismatch) aborts the invocation with a
//! distinct process exit code.
//!
//! ## Architecture
//!
//! - **[`catalog`]**: the fixed ordered list of seven (flag position,
//!   source field, output id) mappings
//! - **[`request`]**: raw argument list → validated [`Request`]
//! - **[`client`]**: HTTP GET with Basic auth and error classification
//! - **[`extract`]**: strict serde-based extraction of enabled metrics
//! - **[`collector`]**: concurrent dispatch of both endpoint pipelines
//! - **[`output`]**: configurable line rendering and stdout writing
//! - **[`error`]**: the error taxonomy and its exit-code mapping
//!
//! ## Usage
//!
//! ```no_run
//! use rabbitwatch::{Collector, Request, DEFAULT_PORT};
//!
//! # let _ = tokio_test::block_on(async {
//! let args: Vec<String> = ["1,1,1,1,1,1,1", "localhost", "", "guest", "guest"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let request = Request::from_args(&args, DEFAULT_PORT)?;
//! let collector = Collector::new(request)?;
//! let metrics = collector.collect().await?;
//!
//! for metric in &metrics {
//!     println!("{}: {}", metric.id.code(), metric.value);
//! }
//! # Ok::<(), rabbitwatch::CollectError>(())
//! # });
//! ```

pub mod catalog;
pub mod client;
pub mod collector;
pub mod error;
pub mod extract;
pub mod metric;
pub mod output;
pub mod request;

pub use catalog::{Endpoint, MetricId, METRIC_COUNT};
pub use collector::Collector;
pub use error::CollectError;
pub use metric::{Metric, Timing};
pub use output::{LineShape, OutputFormat};
pub use request::{Request, DEFAULT_PORT, LEGACY_PORT};
