//! Concrete metric kinds on top of `promtext-core`, plus a YAML loader that
//! builds metrics and replays observations for the `promtext-render` binary.
//!
//! Every kind stores `f64` samples; composite series (histogram buckets,
//! `_sum`, `_count`) are plain samples carrying the `__suffix` label.

pub mod any;
pub mod config;
pub mod counter;
pub mod gauge;
pub mod histogram;
pub mod value;

pub use any::AnyMetric;
pub use counter::{Counter, CounterKind};
pub use gauge::{Gauge, GaugeKind};
pub use histogram::{Histogram, HistogramKind, DEFAULT_BUCKETS};
