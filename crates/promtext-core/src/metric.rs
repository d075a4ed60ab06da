//! Metric identity components plus the sample store, generic over the kind.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{PromTextError, Result};
use crate::exposition;
use crate::labels::{LabelSet, MetricIdentity};
use crate::store::MetricStore;

/// Capability interface every concrete metric kind implements.
pub trait MetricKind {
    /// Stored value shape (a number for counters/gauges, anything for others).
    type Value: Clone;

    /// Type tag for the `# TYPE` line (`counter`, `gauge`, `histogram`).
    fn type_name(&self) -> &'static str;

    /// Fallback returned by [`Metric::get`] for unseen label sets and the
    /// starting point of the first upsert.
    fn default_value(&self) -> Self::Value;

    /// Text rendered after the label block.
    fn render_value(&self, value: &Self::Value) -> String;
}

/// Construction options. `name` and `help` are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricOpts {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub subsystem: String,
    pub name: String,
    pub help: String,
}

impl MetricOpts {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            ..Self::default()
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.subsystem = subsystem.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(PromTextError::Configuration(
                "metric name must not be empty".into(),
            ));
        }
        if self.help.is_empty() {
            return Err(PromTextError::Configuration(
                "metric help must not be empty".into(),
            ));
        }
        Ok(())
    }
}

pub struct Metric<K: MetricKind> {
    opts: MetricOpts,
    full_name: String,
    kind: K,
    store: MetricStore<K::Value>,
}

impl<K: MetricKind> Metric<K> {
    /// Fails with [`PromTextError::Configuration`] when name or help is empty.
    ///
    /// The full name always joins all three parts with `_`, so an empty
    /// namespace or subsystem still leaves its separator behind
    /// (`__requests`).
    pub fn new(opts: MetricOpts, kind: K) -> Result<Self> {
        opts.validate()?;
        let full_name = [
            opts.namespace.as_str(),
            opts.subsystem.as_str(),
            opts.name.as_str(),
        ]
        .join("_");
        tracing::debug!(metric = %full_name, kind = kind.type_name(), "metric created");
        Ok(Self {
            opts,
            full_name,
            kind,
            store: MetricStore::new(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.opts.namespace
    }

    pub fn subsystem(&self) -> &str {
        &self.opts.subsystem
    }

    pub fn name(&self) -> &str {
        &self.opts.name
    }

    pub fn help(&self) -> &str {
        &self.opts.help
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Sole mutation path; see [`MetricStore::upsert`].
    pub fn upsert<F>(&self, labels: &LabelSet, update: F) -> K::Value
    where
        F: FnOnce(K::Value) -> K::Value,
    {
        self.store.upsert(labels, || self.kind.default_value(), update)
    }

    pub fn get(&self, labels: &LabelSet) -> K::Value {
        self.store.get(labels, || self.kind.default_value())
    }

    /// Stored samples in first-seen order.
    pub fn values(&self) -> Vec<(LabelSet, K::Value)> {
        self.store.samples()
    }

    /// For debugging only.
    pub fn labels(&self) -> IndexMap<MetricIdentity, LabelSet> {
        self.store.labels()
    }

    pub fn store(&self) -> &MetricStore<K::Value> {
        &self.store
    }

    /// Render in Prometheus text exposition format.
    pub fn serialize(&self) -> String {
        exposition::render(self)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::error::ErrorKind;

    struct Plain;

    impl MetricKind for Plain {
        type Value = i64;

        fn type_name(&self) -> &'static str {
            "untyped"
        }

        fn default_value(&self) -> i64 {
            -1
        }

        fn render_value(&self, value: &i64) -> String {
            value.to_string()
        }
    }

    #[test]
    fn full_name_joins_all_parts() {
        let m = Metric::new(
            MetricOpts::new("requests", "h").namespace("http").subsystem("server"),
            Plain,
        )
        .unwrap();
        assert_eq!(m.full_name(), "http_server_requests");
        assert_eq!(m.namespace(), "http");
        assert_eq!(m.subsystem(), "server");
        assert_eq!(m.name(), "requests");
        assert_eq!(m.help(), "h");
    }

    #[test]
    fn full_name_keeps_separators_of_empty_parts() {
        let m = Metric::new(MetricOpts::new("requests", "h"), Plain).unwrap();
        assert_eq!(m.full_name(), "__requests");

        let m = Metric::new(MetricOpts::new("requests", "h").namespace("http"), Plain).unwrap();
        assert_eq!(m.full_name(), "http__requests");

        let m = Metric::new(MetricOpts::new("requests", "h").subsystem("server"), Plain).unwrap();
        assert_eq!(m.full_name(), "_server_requests");
    }

    #[test]
    fn empty_name_or_help_is_rejected() {
        let err = Metric::new(MetricOpts::new("", "help"), Plain)
            .err()
            .expect("must fail");
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = Metric::new(MetricOpts::new("name", ""), Plain)
            .err()
            .expect("must fail");
        assert_eq!(err.kind().as_str(), "CONFIGURATION");
    }

    #[test]
    fn opts_deserialize_strictly() {
        let opts: MetricOpts =
            serde_json::from_str(r#"{"name":"requests","help":"h","namespace":"http"}"#).unwrap();
        assert_eq!(opts.subsystem, "");
        assert_eq!(Metric::new(opts, Plain).unwrap().full_name(), "http__requests");

        assert!(serde_json::from_str::<MetricOpts>(r#"{"name":"x","help":"h","nam":"y"}"#).is_err());
        assert!(serde_json::from_str::<MetricOpts>(r#"{"name":"x"}"#).is_err());
    }

    #[test]
    fn get_falls_back_to_kind_default() {
        let m = Metric::new(MetricOpts::new("x", "h"), Plain).unwrap();
        let labels = LabelSet::new([("a", "1")]);
        assert_eq!(m.get(&labels), -1);
        assert!(m.values().is_empty());

        assert_eq!(m.upsert(&labels, |v| v + 5), 4);
        assert_eq!(m.get(&labels), 4);
        assert_eq!(m.get(&labels), 4);
        assert_eq!(m.values(), vec![(labels.clone(), 4)]);
        assert_eq!(m.labels().get(&labels.identity()), Some(&labels));
    }
}
