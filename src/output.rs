//! Line rendering for the downstream monitoring pipeline.
//!
//! One line per metric, pipe-delimited, trailing delimiter included.
//! The line shape and the version tag embedded in the metric id vary
//! across monitor deployments, so both are explicit options here rather
//! than hard-coded constants.

use std::io::{self, Write};

use crate::metric::Metric;

/// Output line shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    /// `<id>|<value>|`
    Plain,
    /// `<timestamp-ms>|<id>|<target>|<value>|`
    Tagged,
}

/// How metric lines are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    pub shape: LineShape,
    /// Version tag appended to the metric id code as `:<tag>`; `None`
    /// leaves the bare code.
    pub version_tag: Option<String>,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            shape: LineShape::Plain,
            version_tag: Some("4".to_string()),
        }
    }
}

impl OutputFormat {
    /// Render one metric as a single output line, without the newline.
    pub fn render(&self, metric: &Metric, target: Option<&str>) -> String {
        let id = self.display_id(metric);
        match self.shape {
            LineShape::Plain => format!("{}|{}|", id, metric.value),
            LineShape::Tagged => format!(
                "{}|{}|{}|{}|",
                metric.timestamp_ms,
                id,
                target.unwrap_or(""),
                metric.value
            ),
        }
    }

    fn display_id(&self, metric: &Metric) -> String {
        match &self.version_tag {
            Some(tag) => format!("{}:{}", metric.id.code(), tag),
            None => metric.id.code().to_string(),
        }
    }
}

/// Write all metrics to `out` in the order given, then flush.
pub fn write_metrics<W: Write>(
    mut out: W,
    format: &OutputFormat,
    metrics: &[Metric],
    target: Option<&str>,
) -> io::Result<()> {
    for metric in metrics {
        writeln!(out, "{}", format.render(metric, target))?;
    }
    out.flush()
}
