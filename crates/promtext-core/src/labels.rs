//! Label sets and their identity digest.
//!
//! A [`LabelSet`] keeps labels in the order the caller supplied them; that
//! order is what the serializer renders. [`MetricIdentity`] is computed from a
//! canonical (name-sorted) encoding, so the same name/value pairs always map
//! to the same stored sample regardless of construction order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved label carrying a metric-name suffix (`_sum`, `_count`, ...).
/// Never rendered as a label.
pub const SUFFIX_LABEL: &str = "__suffix";

/// Insertion-ordered mapping from label name to label value.
///
/// Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(IndexMap<String, String>);

impl LabelSet {
    pub fn new<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        labels.into_iter().collect()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the value of the label with given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Removes a label, keeping the relative order of the others.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Digest of the canonical form: pairs sorted by name, every name and
    /// value length-prefixed.
    pub fn identity(&self) -> MetricIdentity {
        let mut pairs = self.iter().collect::<Vec<_>>();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut hasher = blake3::Hasher::new();
        hasher.update(&(pairs.len() as u64).to_le_bytes());
        for (name, value) in pairs {
            hasher.update(&(name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
            hasher.update(&(value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        MetricIdentity(hasher.finalize().into())
    }
}

impl<K, V> FromIterator<(K, V)> for LabelSet
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
                .collect(),
        )
    }
}

/// Shorthand for [`LabelSet::identity`].
pub fn identity_of(labels: &LabelSet) -> MetricIdentity {
    labels.identity()
}

/// Lookup key of a stored sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricIdentity([u8; 32]);

impl MetricIdentity {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for MetricIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<MetricIdentity> for String {
    fn from(id: MetricIdentity) -> Self {
        hex::encode(id.0)
    }
}
