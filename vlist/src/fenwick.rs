use alloc::vec::Vec;

/// Item heights plus their prefix sums (binary indexed tree).
///
/// All stored values are finite and non-negative, so prefix sums are monotone in the index and
/// the descent in [`Fenwick::count_below`] is valid.
///
/// Nodes are never patched with deltas. Every write recomputes the affected nodes from the
/// current values, so each node is a function of the values alone and repeated fractional
/// updates cannot drift.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    values: Vec<f64>,
    tree: Vec<f64>, // 1-indexed
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn new() -> Self {
        Self::from_heights(Vec::new())
    }

    pub(crate) fn from_heights(values: Vec<f64>) -> Self {
        let n = values.len();
        let mut sums = Self {
            values,
            tree: alloc::vec![0.0f64; n + 1],
            max_bit: highest_power_of_two_leq(n),
        };
        for i in 1..=n {
            sums.tree[i] = sums.node(i);
        }
        sums
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }
        self.values.truncate(new_len);
        self.tree.truncate(new_len + 1);
        self.max_bit = highest_power_of_two_leq(new_len);
    }

    /// Appends one value; the new node only covers values that are already in place.
    pub(crate) fn push(&mut self, value: f64) {
        self.values.push(value);
        self.tree.push(0.0);
        let n = self.len();
        self.tree[n] = self.node(n);
        self.max_bit = highest_power_of_two_leq(n);
    }

    /// Replaces the value at `index` and recomputes the nodes covering it.
    pub(crate) fn set(&mut self, index: usize, value: f64) {
        let n = self.len();
        if index >= n || self.values[index] == value {
            return;
        }
        self.values[index] = value;
        let mut i = index + 1;
        while i <= n {
            self.tree[i] = self.node(i);
            i += lsb(i);
        }
    }

    /// Sum of the first `count` values.
    pub(crate) fn prefix_sum(&self, count: usize) -> f64 {
        let mut i = count.min(self.len());
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> f64 {
        self.prefix_sum(self.len())
    }

    /// Returns the number of leading values whose running total stays strictly below `target`.
    ///
    /// Equivalently, the index of the first item whose inclusive running total reaches `target`
    /// (or `len()` if none does).
    pub(crate) fn count_below(&self, mut target: f64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] < target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }

    /// Node `i` from its own value and its children `i - step` (ascending), which must be final.
    fn node(&self, i: usize) -> f64 {
        let mut sum = self.values[i - 1];
        let mut step = lsb(i) >> 1;
        while step != 0 {
            sum += self.tree[i - step];
            step >>= 1;
        }
        sum
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
