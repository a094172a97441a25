//! Data model shared by the reducer, the overlap calculator and callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An opaque key value. Raw bytes, so keys need not be valid UTF-8.
pub type Key = Vec<u8>;

/// Occurrence counts for every key seen on one source.
///
/// Keys are compared byte-for-byte; no decoding, case folding or trimming
/// is applied. A key is only present once it has been observed, so every
/// stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFrequencies {
    counts: HashMap<Key, u64>,
    record_count: u64,
}

impl KeyFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`.
    pub fn observe(&mut self, key: impl Into<Key>) {
        *self.counts.entry(key.into()).or_insert(0) += 1;
        self.record_count += 1;
    }

    /// Occurrences of `key`, 0 if it was never seen.
    pub fn count(&self, key: impl AsRef<[u8]>) -> u64 {
        self.counts.get(key.as_ref()).copied().unwrap_or(0)
    }

    /// Total number of keys consumed, duplicates included.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Number of unique keys.
    pub fn distinct_count(&self) -> u64 {
        self.counts.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> {
        self.counts.iter().map(|(k, v)| (k.as_slice(), *v))
    }

    pub fn statistics(&self) -> SourceStatistics {
        SourceStatistics {
            record_count: self.record_count,
            distinct_key_count: self.distinct_count(),
        }
    }
}

impl<S: Into<Key>> FromIterator<S> for KeyFrequencies {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut frequencies = Self::new();
        for key in iter {
            frequencies.observe(key);
        }
        frequencies
    }
}

/// Per-source counts reported in the final result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatistics {
    pub record_count: u64,
    pub distinct_key_count: u64,
}

/// Overlap between two completed frequency maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    /// Keys present on both sides, ignoring multiplicity
    pub distinct: u64,
    /// Sum over shared keys of the smaller occurrence count
    pub total: u64,
}

/// Outcome of intersecting two key streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionResult {
    pub first: SourceStatistics,
    pub second: SourceStatistics,
    pub total_overlap: u64,
    pub distinct_overlap: u64,
}

impl IntersectionResult {
    pub fn new(first: SourceStatistics, second: SourceStatistics, overlap: Overlap) -> Self {
        Self {
            first,
            second,
            total_overlap: overlap.total,
            distinct_overlap: overlap.distinct,
        }
    }
}
