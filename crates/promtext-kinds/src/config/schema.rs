use serde::Deserialize;

use promtext_core::error::{PromTextError, Result};
use promtext_core::{LabelSet, MetricOpts};

use crate::histogram::validate_buckets;
use crate::{AnyMetric, Counter, Gauge, Histogram};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpositionConfig {
    pub version: u32,

    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

impl ExpositionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromTextError::UnsupportedVersion);
        }
        if self.metrics.is_empty() {
            return Err(PromTextError::Configuration("metrics must not be empty".into()));
        }
        for m in &self.metrics {
            m.validate()?;
        }
        Ok(())
    }

    /// Construct every metric and replay its observations, in file order.
    pub fn build(&self) -> Result<Vec<AnyMetric>> {
        let metrics = self
            .metrics
            .iter()
            .map(MetricConfig::build)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(metrics = metrics.len(), "metrics built from config");
        Ok(metrics)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindConfig {
    Counter,
    Gauge,
    Histogram,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    pub kind: KindConfig,

    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub subsystem: String,

    pub name: String,

    pub help: String,

    /// Histogram only; defaults to the standard buckets.
    #[serde(default)]
    pub buckets: Option<Vec<f64>>,

    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl MetricConfig {
    pub fn opts(&self) -> MetricOpts {
        MetricOpts::new(self.name.as_str(), self.help.as_str())
            .namespace(self.namespace.as_str())
            .subsystem(self.subsystem.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        self.opts().validate()?;
        match (&self.buckets, self.kind) {
            (Some(buckets), KindConfig::Histogram) => validate_buckets(buckets),
            (Some(_), _) => Err(PromTextError::Configuration(format!(
                "metric {}: buckets are only allowed on histograms",
                self.name
            ))),
            (None, _) => Ok(()),
        }
    }

    pub fn build(&self) -> Result<AnyMetric> {
        let opts = self.opts();
        let metric: AnyMetric = match self.kind {
            KindConfig::Counter => Counter::new(opts)?.into(),
            KindConfig::Gauge => Gauge::new(opts)?.into(),
            KindConfig::Histogram => match &self.buckets {
                Some(buckets) => Histogram::with_buckets(opts, buckets.clone())?.into(),
                None => Histogram::new(opts)?.into(),
            },
        };
        for obs in &self.observations {
            metric.record(&obs.labels, obs.value)?;
        }
        Ok(metric)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Observation {
    #[serde(default)]
    pub labels: LabelSet,
    pub value: f64,
}
