//! Per-metric sample storage keyed by label identity.
//!
//! One insertion-ordered map holds both the label set and the value of every
//! series, so the identity -> labels and identity -> value views can never
//! disagree. The map is guarded by a mutex; every operation takes `&self`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::labels::{LabelSet, MetricIdentity};

struct Entry<V> {
    labels: LabelSet,
    value: V,
}

pub struct MetricStore<V> {
    map: Mutex<IndexMap<MetricIdentity, Entry<V>>>,
}

impl<V> Default for MetricStore<V> {
    fn default() -> Self {
        Self {
            map: Mutex::new(IndexMap::new()),
        }
    }
}

impl<V: Clone> MetricStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking update closure cannot leave the map half-written.
    fn lock(&self) -> MutexGuard<'_, IndexMap<MetricIdentity, Entry<V>>> {
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `update` to the stored value (or to `default()` when the label
    /// set is unseen) and store the result. Returns the new value.
    ///
    /// The first label set seen for an identity is the one kept for
    /// rendering. Both closures run under the store lock.
    pub fn upsert<D, F>(&self, labels: &LabelSet, default: D, update: F) -> V
    where
        D: FnOnce() -> V,
        F: FnOnce(V) -> V,
    {
        let id = labels.identity();
        let mut map = self.lock();
        match map.get_mut(&id) {
            Some(entry) => {
                let current = entry.value.clone();
                entry.value = update(current);
                entry.value.clone()
            }
            None => {
                let value = update(default());
                tracing::trace!(identity = %id, series = map.len() + 1, "new series");
                map.insert(
                    id,
                    Entry {
                        labels: labels.clone(),
                        value: value.clone(),
                    },
                );
                value
            }
        }
    }

    /// Stored value for `labels`, or `default()` when unseen. Never inserts.
    pub fn get<D>(&self, labels: &LabelSet, default: D) -> V
    where
        D: FnOnce() -> V,
    {
        let id = labels.identity();
        self.lock()
            .get(&id)
            .map(|entry| entry.value.clone())
            .unwrap_or_else(default)
    }

    /// Every stored (labels, value) pair in first-insertion order.
    pub fn samples(&self) -> Vec<(LabelSet, V)> {
        self.lock()
            .values()
            .map(|entry| (entry.labels.clone(), entry.value.clone()))
            .collect()
    }

    /// Raw identity -> labels mapping, for debugging.
    pub fn labels(&self) -> IndexMap<MetricIdentity, LabelSet> {
        self.lock()
            .iter()
            .map(|(id, entry)| (*id, entry.labels.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
