//! Stable scene object identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique IDs
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A stable scene object identifier that persists across save/load cycles.
///
/// Ids are plain strings so documents and template seeds can use readable
/// names (`"player"`, `"enemy1"`). Generated ids take the form `<kind>_<n>`.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an existing id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id with the given prefix, e.g. `cube_3`
    pub fn generate(prefix: &str) -> Self {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("{prefix}_{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix after the last `_`, if any
    pub fn numeric_suffix(&self) -> Option<u64> {
        self.0.rsplit_once('_').and_then(|(_, n)| n.parse().ok())
    }

    /// Move the counter past the given value (for loading documents).
    /// Saturates at `u64::MAX`.
    pub fn ensure_counter_above(value: u64) {
        raise_counter(&NEXT_ID, value);
    }
}

fn raise_counter(counter: &AtomicU64, value: u64) {
    counter.fetch_max(value.saturating_add(1), Ordering::Relaxed);
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation() {
        let id1 = ObjectId::generate("cube");
        let id2 = ObjectId::generate("cube");
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("cube_"));
        assert!(id2.numeric_suffix().unwrap() > id1.numeric_suffix().unwrap());
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(ObjectId::new("tree_42").numeric_suffix(), Some(42));
        assert_eq!(ObjectId::new("player").numeric_suffix(), None);
        assert_eq!(ObjectId::new("enemy_boss").numeric_suffix(), None);
    }

    #[test]
    fn test_ensure_counter_above() {
        ObjectId::ensure_counter_above(10_000);
        let id = ObjectId::generate("sphere");
        assert!(id.numeric_suffix().unwrap() > 10_000);
    }

    #[test]
    fn test_ensure_counter_above_saturates() {
        let counter = AtomicU64::new(1);
        raise_counter(&counter, u64::MAX);
        assert_eq!(counter.load(Ordering::Relaxed), u64::MAX);
        raise_counter(&counter, 5);
        assert_eq!(counter.load(Ordering::Relaxed), u64::MAX);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ObjectId::new("player")).unwrap();
        assert_eq!(json, "\"player\"");
    }
}
