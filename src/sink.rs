// ABOUTME: Output sinks receiving the canonical metric produced by each poll cycle
// ABOUTME: In-memory accumulator for tests plus a line-protocol/JSON writer for the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metric Sinks
//!
//! The collector hands every complete metric to a [`MetricSink`]. A sink only
//! ever sees whole records; a failed cycle emits nothing.

use librelinkup_core::constants::metric_keys;
use librelinkup_core::models::CanonicalMetric;
use librelinkup_core::CollectorResult;
use std::fmt::Write as _;
use std::io::Write;

/// Receiver of canonical metrics
pub trait MetricSink {
    /// Accept one complete metric
    ///
    /// # Errors
    ///
    /// Returns a sink error if the metric could not be written
    fn add_metric(&mut self, metric: CanonicalMetric) -> CollectorResult<()>;
}

/// Collects metrics in memory
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    metrics: Vec<CanonicalMetric>,
}

impl Accumulator {
    /// Empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics received so far, in arrival order
    #[must_use]
    pub fn metrics(&self) -> &[CanonicalMetric] {
        &self.metrics
    }

    /// Number of metrics received
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether nothing was received
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Remove and return everything received
    pub fn drain(&mut self) -> Vec<CanonicalMetric> {
        std::mem::take(&mut self.metrics)
    }
}

impl MetricSink for Accumulator {
    fn add_metric(&mut self, metric: CanonicalMetric) -> CollectorResult<()> {
        self.metrics.push(metric);
        Ok(())
    }
}

/// Text encoding used by [`LineSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// InfluxDB line protocol
    #[default]
    #[value(name = "line")]
    LineProtocol,
}

/// Writes one line per metric to any `Write` implementation
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> LineSink<W> {
    /// Create a sink writing in the given format
    #[must_use]
    pub const fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Unwrap the underlying writer
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetricSink for LineSink<W> {
    fn add_metric(&mut self, metric: CanonicalMetric) -> CollectorResult<()> {
        let line = match self.format {
            OutputFormat::LineProtocol => to_line_protocol(&metric),
            OutputFormat::Json => serde_json::to_string(&metric).map_err(std::io::Error::from)?,
        };
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Render a metric as `name,tag=v,... field=v,...` without a trailing timestamp
#[must_use]
pub fn to_line_protocol(metric: &CanonicalMetric) -> String {
    let mut line = escape(&metric.name, &[',', ' ']);
    for (key, value) in metric.tag_pairs() {
        let _ = write!(
            line,
            ",{}={}",
            escape(key, &[',', ' ', '=']),
            escape(value, &[',', ' ', '='])
        );
    }
    let fields = &metric.fields;
    let _ = write!(
        line,
        " {}={}i,{}={},{}=\"{}\"",
        metric_keys::MG_DL,
        fields.mg_dl,
        metric_keys::MMOL_L,
        fields.mmol_l,
        metric_keys::TIMESTAMP,
        escape(&fields.timestamp, &['"', '\\'])
    );
    line
}

fn escape(raw: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
