//! Outcome counter and latency histogram for predict calls.
//!
//! Exposed metrics:
//! - `request_predict_total{status="success"|"error"}`: predict calls by outcome (counter)
//! - `request_predict_seconds`: wall-clock latency of successful predict calls (histogram)

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

use crate::Result;

pub const REQUEST_COUNT_METRIC: &str = "request_predict_total";
pub const PREDICT_LATENCY_METRIC: &str = "request_predict_seconds";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

impl Outcome {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Metric aggregates owned by one model instance. Clones share the same series.
#[derive(Clone)]
pub struct PredictMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: Histogram,
}

impl PredictMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new(REQUEST_COUNT_METRIC, "Total OCR requests"),
            &["status"],
        )?;
        let latency = Histogram::with_opts(HistogramOpts::new(
            PREDICT_LATENCY_METRIC,
            "Inference latency",
        ))?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
        })
    }

    /// Accounts for one finished predict call. Latency is only observed on success.
    pub fn record(&self, outcome: Outcome, elapsed: Duration) {
        self.requests.with_label_values(&[outcome.as_label()]).inc();
        if outcome == Outcome::Success {
            self.latency.observe(elapsed.as_secs_f64());
        }
    }

    pub fn count(&self, outcome: Outcome) -> u64 {
        self.requests.with_label_values(&[outcome.as_label()]).get()
    }

    pub fn latency_samples(&self) -> u64 {
        self.latency.get_sample_count()
    }

    /// Prometheus text exposition of every registered series.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
