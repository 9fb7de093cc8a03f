//! Insertion-ordered counting and ranked top-K selection.
//!
//! Every ranked view goes through [`Counter`], so tie-breaking is decided in one place by
//! [`TieBreak`].

use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How ties between equal counts are resolved when ranking or picking a maximum.
///
/// [`TieBreak::Lexicographic`] gives the same answers as a sorted group-by followed by
/// idxmax / nlargest, where the smallest label wins a tie. Use it to reproduce the rankings of
/// the reference catalog dashboard; [`TieBreak::FirstSeen`] follows input order instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The key encountered first in input order wins.
    #[default]
    FirstSeen,
    /// The lexicographically smaller key wins.
    Lexicographic,
}

impl TieBreak {
    /// Ordering that puts the preferred `(key, count)` entry first.
    fn compare<K: Ord>(self, a: (&K, u64), b: (&K, u64)) -> Ordering {
        let by_count = b.1.cmp(&a.1);
        match self {
            // Stable sorts keep insertion order for equal counts.
            TieBreak::FirstSeen => by_count,
            TieBreak::Lexicographic => by_count.then_with(|| a.0.cmp(b.0)),
        }
    }
}

/// Occurrence counts keyed by first-encounter order.
#[derive(Debug, Clone)]
pub struct Counter<K> {
    counts: IndexMap<K, u64>,
}

impl<K> Counter<K> {
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(k, c)| (k, *c))
    }
}

impl<K: Hash + Eq> Counter<K> {
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: K, n: u64) {
        *self.counts.entry(key).or_insert(0) += n;
    }

    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

impl<K: Ord> Counter<K> {
    /// All entries by descending count, ties resolved by `tie_break`.
    pub fn ranked(&self, tie_break: TieBreak) -> Vec<(&K, u64)> {
        let mut entries: Vec<(&K, u64)> = self.iter().collect();
        entries.sort_by(|a, b| tie_break.compare(*a, *b));
        entries
    }

    /// The `k` highest entries. Fewer are returned when fewer exist.
    pub fn top(&self, k: usize, tie_break: TieBreak) -> Vec<(&K, u64)> {
        let mut entries = self.ranked(tie_break);
        entries.truncate(k);
        entries
    }

    /// All entries in ascending key order.
    pub fn sorted_by_key(&self) -> Vec<(&K, u64)> {
        let mut entries: Vec<(&K, u64)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// The single highest entry.
    pub fn argmax(&self, tie_break: TieBreak) -> Option<(&K, u64)> {
        self.iter().fold(None, |best, entry| match best {
            Some(current) if tie_break.compare(entry, current) != Ordering::Less => Some(current),
            _ => Some(entry),
        })
    }
}

impl<K> Default for Counter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> FromIterator<K> for Counter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Counter::new();
        for key in iter {
            counter.add(key);
        }
        counter
    }
}
