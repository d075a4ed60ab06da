//! Histogram with fixed, cumulative buckets.
//!
//! Each observation touches one `_bucket` series per bound (with an `le`
//! label), a `+Inf` bucket, `_sum` and `_count`. The series are ordinary
//! samples whose labels carry `__suffix`, so the core serializer renders
//! them without knowing about histograms. Bucket series are created on the
//! first observation of a label set even when the value misses them, which
//! keeps the rendered bucket list complete and ordered.
//!
//! The series of one observation are updated one after another, not as a
//! group: a concurrent render may briefly see `_count` ahead of a bucket.

use promtext_core::error::{PromTextError, Result};
use promtext_core::{LabelSet, Metric, MetricKind, MetricOpts, SUFFIX_LABEL};

use crate::value::format_float;

/// Bucket label name.
pub const LE_LABEL: &str = "le";

pub const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug, Clone)]
pub struct HistogramKind {
    buckets: Vec<f64>,
}

impl HistogramKind {
    pub fn new(buckets: Vec<f64>) -> Result<Self> {
        validate_buckets(&buckets)?;
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> &[f64] {
        &self.buckets
    }
}

impl MetricKind for HistogramKind {
    type Value = f64;

    fn type_name(&self) -> &'static str {
        "histogram"
    }

    fn default_value(&self) -> f64 {
        0.0
    }

    fn render_value(&self, value: &f64) -> String {
        format_float(*value)
    }
}

/// Bounds must be non-empty, finite and strictly increasing.
pub fn validate_buckets(buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(PromTextError::Configuration(
            "histogram buckets must not be empty".into(),
        ));
    }
    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(PromTextError::Configuration(
            "histogram buckets must be finite (+Inf is implicit)".into(),
        ));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(PromTextError::Configuration(
            "histogram buckets must be strictly increasing".into(),
        ));
    }
    Ok(())
}

pub struct Histogram {
    metric: Metric<HistogramKind>,
}

impl Histogram {
    /// Histogram with [`DEFAULT_BUCKETS`].
    pub fn new(opts: MetricOpts) -> Result<Self> {
        Self::with_buckets(opts, DEFAULT_BUCKETS.to_vec())
    }

    pub fn with_buckets(opts: MetricOpts, buckets: Vec<f64>) -> Result<Self> {
        Ok(Self {
            metric: Metric::new(opts, HistogramKind::new(buckets)?)?,
        })
    }

    /// Record one observation. `le` and `__suffix` are reserved and rejected
    /// when supplied by the caller.
    pub fn observe(&self, labels: &LabelSet, value: f64) -> Result<()> {
        for reserved in [LE_LABEL, SUFFIX_LABEL] {
            if labels.contains(reserved) {
                return Err(PromTextError::InvalidObservation(format!(
                    "label {reserved:?} is reserved on histogram {}",
                    self.metric.full_name()
                )));
            }
        }

        for &bound in self.metric.kind().buckets() {
            let step = if value <= bound { 1.0 } else { 0.0 };
            let series = bucket_labels(labels, &format_float(bound));
            self.metric.upsert(&series, |c| c + step);
        }
        self.metric.upsert(&bucket_labels(labels, "+Inf"), |c| c + 1.0);
        self.metric.upsert(&suffixed(labels, "_sum"), |s| s + value);
        self.metric.upsert(&suffixed(labels, "_count"), |c| c + 1.0);

        tracing::trace!(metric = %self.metric.full_name(), value, "observed");
        Ok(())
    }

    pub fn count(&self, labels: &LabelSet) -> f64 {
        self.metric.get(&suffixed(labels, "_count"))
    }

    pub fn sum(&self, labels: &LabelSet) -> f64 {
        self.metric.get(&suffixed(labels, "_sum"))
    }

    /// Cumulative count of the bucket with upper bound `le` (`+Inf` allowed).
    pub fn bucket(&self, labels: &LabelSet, le: f64) -> f64 {
        self.metric.get(&bucket_labels(labels, &format_float(le)))
    }

    pub fn metric(&self) -> &Metric<HistogramKind> {
        &self.metric
    }

    pub fn serialize(&self) -> String {
        self.metric.serialize()
    }
}

fn suffixed(labels: &LabelSet, suffix: &str) -> LabelSet {
    labels.clone().with(SUFFIX_LABEL, suffix)
}

fn bucket_labels(labels: &LabelSet, le: &str) -> LabelSet {
    suffixed(labels, "_bucket").with(LE_LABEL, le)
}
