//! Query keys: the identity a cached read is stored under.

use serde::Serialize;
use serde_json::Value;

/// An ordered list of JSON segments, e.g. `["jobs", "detail", 7]`.
///
/// Invalidation matches by prefix, so `["jobs", "list"]` covers every list
/// query regardless of its parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryKey(Vec<Value>);

impl QueryKey {
    /// Start a key with its scope segment.
    pub fn new(scope: &str) -> Self {
        Self(vec![Value::String(scope.to_string())])
    }

    /// Append a segment.
    pub fn push(mut self, segment: impl Into<Value>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Append a serializable parameter object.
    ///
    /// Unset (skipped) fields are absent from the segment, so two parameter
    /// sets that serialize identically share a cache entry.
    pub fn push_params<P: Serialize>(mut self, params: &P) -> Self {
        self.0
            .push(serde_json::to_value(params).unwrap_or(Value::Null));
        self
    }

    /// Whether `prefix` matches the first segments of this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
    }

    /// Stable string form used as the store's map key.
    pub(crate) fn hash_key(&self) -> String {
        Value::Array(self.0.clone()).to_string()
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Array(self.0.clone()))
    }
}
