//! Type-erased wrapper so metrics of different kinds can live in one list.

use promtext_core::error::Result;
use promtext_core::LabelSet;

use crate::{Counter, Gauge, Histogram};

pub enum AnyMetric {
    Counter(Counter),
    Gauge(Gauge),
    Histogram(Histogram),
}

impl AnyMetric {
    pub fn full_name(&self) -> &str {
        match self {
            AnyMetric::Counter(m) => m.metric().full_name(),
            AnyMetric::Gauge(m) => m.metric().full_name(),
            AnyMetric::Histogram(m) => m.metric().full_name(),
        }
    }

    /// Apply a value the way the kind understands it: counters add, gauges
    /// set, histograms observe.
    pub fn record(&self, labels: &LabelSet, value: f64) -> Result<()> {
        match self {
            AnyMetric::Counter(m) => m.add(labels, value).map(|_| ()),
            AnyMetric::Gauge(m) => {
                m.set(labels, value);
                Ok(())
            }
            AnyMetric::Histogram(m) => m.observe(labels, value),
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            AnyMetric::Counter(m) => m.serialize(),
            AnyMetric::Gauge(m) => m.serialize(),
            AnyMetric::Histogram(m) => m.serialize(),
        }
    }
}

impl From<Counter> for AnyMetric {
    fn from(m: Counter) -> Self {
        AnyMetric::Counter(m)
    }
}

impl From<Gauge> for AnyMetric {
    fn from(m: Gauge) -> Self {
        AnyMetric::Gauge(m)
    }
}

impl From<Histogram> for AnyMetric {
    fn from(m: Histogram) -> Self {
        AnyMetric::Histogram(m)
    }
}
