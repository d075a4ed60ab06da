//! Monotonic counter.

use promtext_core::error::{PromTextError, Result};
use promtext_core::{LabelSet, Metric, MetricKind, MetricOpts};

use crate::value::format_float;

#[derive(Debug, Clone, Copy, Default)]
pub struct CounterKind;

impl MetricKind for CounterKind {
    type Value = f64;

    fn type_name(&self) -> &'static str {
        "counter"
    }

    fn default_value(&self) -> f64 {
        0.0
    }

    fn render_value(&self, value: &f64) -> String {
        format_float(*value)
    }
}

pub struct Counter {
    metric: Metric<CounterKind>,
}

impl Counter {
    pub fn new(opts: MetricOpts) -> Result<Self> {
        Ok(Self {
            metric: Metric::new(opts, CounterKind)?,
        })
    }

    /// Increment by 1.
    pub fn inc(&self, labels: &LabelSet) -> f64 {
        self.metric.upsert(labels, |c| c + 1.0)
    }

    /// Increment by `v`. Negative or NaN increments are rejected and leave
    /// the counter untouched.
    pub fn add(&self, labels: &LabelSet, v: f64) -> Result<f64> {
        if v.is_nan() || v < 0.0 {
            return Err(PromTextError::InvalidObservation(format!(
                "counter {} cannot be increased by {v}",
                self.metric.full_name()
            )));
        }
        Ok(self.metric.upsert(labels, |c| c + v))
    }

    pub fn get(&self, labels: &LabelSet) -> f64 {
        self.metric.get(labels)
    }

    pub fn metric(&self) -> &Metric<CounterKind> {
        &self.metric
    }

    pub fn serialize(&self) -> String {
        self.metric.serialize()
    }
}
