//! promtext core: label identity, per-metric sample storage, and the
//! Prometheus text exposition serializer.
//!
//! Concrete metric kinds plug in through [`MetricKind`]; this crate carries no
//! transport and no registry. A [`Metric`] owns its samples for as long as the
//! caller keeps it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. The only fallible
//! path is metric construction, which surfaces as `PromTextError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod exposition;
pub mod labels;
pub mod metric;
pub mod store;

pub use error::{ErrorKind, PromTextError, Result};
pub use labels::{identity_of, LabelSet, MetricIdentity, SUFFIX_LABEL};
pub use metric::{Metric, MetricKind, MetricOpts};
pub use store::MetricStore;
