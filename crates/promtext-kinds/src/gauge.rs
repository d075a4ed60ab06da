//! Gauge: a value that can go up and down or be set outright.

use promtext_core::error::Result;
use promtext_core::{LabelSet, Metric, MetricKind, MetricOpts};

use crate::value::format_float;

#[derive(Debug, Clone, Copy, Default)]
pub struct GaugeKind;

impl MetricKind for GaugeKind {
    type Value = f64;

    fn type_name(&self) -> &'static str {
        "gauge"
    }

    fn default_value(&self) -> f64 {
        0.0
    }

    fn render_value(&self, value: &f64) -> String {
        format_float(*value)
    }
}

pub struct Gauge {
    metric: Metric<GaugeKind>,
}

impl Gauge {
    pub fn new(opts: MetricOpts) -> Result<Self> {
        Ok(Self {
            metric: Metric::new(opts, GaugeKind)?,
        })
    }

    pub fn set(&self, labels: &LabelSet, v: f64) -> f64 {
        self.metric.upsert(labels, |_| v)
    }

    pub fn add(&self, labels: &LabelSet, v: f64) -> f64 {
        self.metric.upsert(labels, |g| g + v)
    }

    pub fn inc(&self, labels: &LabelSet) -> f64 {
        self.add(labels, 1.0)
    }

    pub fn dec(&self, labels: &LabelSet) -> f64 {
        self.add(labels, -1.0)
    }

    pub fn get(&self, labels: &LabelSet) -> f64 {
        self.metric.get(labels)
    }

    pub fn metric(&self) -> &Metric<GaugeKind> {
        &self.metric
    }

    pub fn serialize(&self) -> String {
        self.metric.serialize()
    }
}
