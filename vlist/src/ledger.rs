use alloc::vec::Vec;

use crate::key::{KeyMap, ListKey};

/// Returns `true` for heights the ledger accepts: finite and non-negative.
pub fn is_valid_height(height: f64) -> bool {
    height.is_finite() && height >= 0.0
}

/// Last-measured heights, keyed by item identity.
///
/// Entries are only created by measurement. They outlive the item's stay in the rendered window
/// so offsets above the window keep using real heights, and a re-measurement overwrites the
/// previous value for that identity.
#[derive(Clone, Debug)]
pub struct HeightLedger<K> {
    heights: KeyMap<K, f64>,
}

impl<K: ListKey> Default for HeightLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ListKey> HeightLedger<K> {
    pub fn new() -> Self {
        Self {
            heights: KeyMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.heights.get(key).copied()
    }

    /// Returns the measured height, or `estimate` if `key` has not been measured.
    pub fn height_or(&self, key: &K, estimate: f64) -> f64 {
        self.get(key).unwrap_or(estimate)
    }

    /// Records a measurement and reports whether the stored value changed.
    ///
    /// Unchanged values and anomalies (non-finite or negative heights) leave the ledger untouched
    /// and return `false`.
    pub fn set(&mut self, key: K, height: f64) -> bool {
        if !is_valid_height(height) {
            vlog!(warn, height, "HeightLedger::set: ignoring invalid height");
            return false;
        }
        match self.heights.get_mut(&key) {
            Some(cur) if *cur == height => false,
            Some(cur) => {
                *cur = height;
                true
            }
            None => {
                self.heights.insert(key, height);
                true
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<f64> {
        self.heights.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.heights.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn clear(&mut self) {
        self.heights.clear();
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.heights.retain(|k, _| keep(k));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.heights.iter().map(|(k, h)| (k, *h))
    }

    /// Copies the entries out (useful for persisting measurements).
    pub fn export(&self) -> Vec<(K, f64)> {
        self.iter().map(|(k, h)| (k.clone(), h)).collect()
    }
}
