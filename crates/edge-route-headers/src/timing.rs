//! Server-Timing collection for a single request.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use crate::header_set::HeaderSet;

/// A single Server-Timing metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingMetric {
    /// Metric name (sanitized to a valid token on formatting).
    pub name: String,
    /// Human-readable description.
    pub desc: Option<String>,
    /// Measured duration.
    pub duration: Option<Duration>,
}

/// Collector for per-request timing metrics, formatted as a
/// `Server-Timing` header value.
///
/// Metrics keep recording order. The emitted header is appended rather
/// than overwritten so timings from parent routes stay visible once the
/// values flow through [`pipe_headers`](crate::pipe_headers).
#[derive(Debug, Clone, Default)]
pub struct ServerTimings {
    metrics: Vec<TimingMetric>,
}

impl ServerTimings {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded metrics.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Record a metric with a measured duration.
    pub fn record(&mut self, name: impl Into<String>, desc: Option<&str>, duration: Duration) {
        self.metrics.push(TimingMetric {
            name: name.into(),
            desc: desc.map(str::to_string),
            duration: Some(duration),
        });
    }

    /// Record a marker metric with no duration (e.g. a cache hit).
    pub fn record_marker(&mut self, name: impl Into<String>, desc: Option<&str>) {
        self.metrics.push(TimingMetric {
            name: name.into(),
            desc: desc.map(str::to_string),
            duration: None,
        });
    }

    /// Measure a closure and record its duration.
    pub fn time<T>(&mut self, name: &str, desc: Option<&str>, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.record(name, desc, start.elapsed());
        result
    }

    /// Recorded metrics in order.
    pub fn metrics(&self) -> &[TimingMetric] {
        &self.metrics
    }

    /// Format as a `Server-Timing` header value.
    ///
    /// Empty when nothing was recorded; callers should skip the header
    /// in that case.
    pub fn header_value(&self) -> String {
        let mut value = String::new();
        for metric in &self.metrics {
            if !value.is_empty() {
                value.push_str(", ");
            }
            value.push_str(&sanitize_token(&metric.name));
            if let Some(desc) = &metric.desc {
                let _ = write!(value, ";desc=\"{}\"", desc.replace('"', "'"));
            }
            if let Some(duration) = metric.duration {
                let _ = write!(value, ";dur={:.2}", duration.as_secs_f64() * 1000.0);
            }
        }
        value
    }

    /// Append the `Server-Timing` header onto a header set.
    pub fn apply(&self, headers: &mut HeaderSet) {
        if !self.is_empty() {
            headers.append("Server-Timing", self.header_value());
        }
    }
}

/// Replace characters that are not valid in a Server-Timing metric name.
fn sanitize_token(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '*') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
