//! Execution result types.
//!
//! Bitstring ordering: the rightmost character is classical bit 0
//! (OpenQASM 3 convention). The string `"01"` means clbit 0 read `1`
//! and clbit 1 read `0`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts from circuit execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from `(bitstring, count)` pairs. Duplicates are summed.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_default() += count;
    }

    /// Count for a bitstring, zero if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Most frequent bitstring; ties go to the lexicographically smallest key.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots() as f64;
        if total == 0.0 {
            return FxHashMap::default();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }

    /// Counts sorted by count, descending.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut items: Vec<_> = self.counts.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Counts sorted by bitstring, ascending.
    pub fn sorted_by_key(&self) -> Vec<(&String, &u64)> {
        let mut items: Vec<_> = self.counts.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Width shared by every key, or `None` if keys disagree or there are none.
    pub fn key_width(&self) -> Option<usize> {
        let mut widths = self.counts.keys().map(String::len);
        let first = widths.next()?;
        widths.all(|w| w == first).then_some(first)
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl std::fmt::Display for Counts {
    /// Renders as `{'00': 512, '11': 512}`, keys ascending.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.sorted_by_key().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{k}': {v}")?;
        }
        f.write_str("}")
    }
}

/// Result of circuit execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Backend-side execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl ExecutionResult {
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            metadata: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_execution_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = Some(time_ms);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        self.counts.probabilities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("00", 3);
        counts.insert("11", 5);
        counts.insert("00", 2);

        assert_eq!(counts.get("00"), 5);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_shots(), 10);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.key_width(), Some(2));
    }

    #[test]
    fn test_most_frequent_breaks_ties_by_key() {
        let counts = Counts::from_pairs([("11", 4), ("00", 4), ("01", 1)]);
        let (key, count) = counts.most_frequent().unwrap();
        assert_eq!(key, "00");
        assert_eq!(*count, 4);
    }

    #[test]
    fn test_display_sorted_by_key() {
        let counts = Counts::from_pairs([("1", 7), ("0", 3)]);
        assert_eq!(counts.to_string(), "{'0': 3, '1': 7}");
    }

    #[test]
    fn test_probabilities() {
        let counts = Counts::from_pairs([("0", 1), ("1", 3)]);
        let probs = counts.probabilities();
        assert!((probs["1"] - 0.75).abs() < 1e-12);
        assert!(Counts::new().probabilities().is_empty());
    }

    #[test]
    fn test_key_width_mismatch() {
        let counts = Counts::from_pairs([("0", 1), ("10", 1)]);
        assert_eq!(counts.key_width(), None);
        assert_eq!(Counts::new().key_width(), None);
    }
}
