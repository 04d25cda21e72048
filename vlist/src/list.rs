use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::fenwick::Fenwick;
use crate::key::{KeyMap, ListKey};
use crate::ledger::is_valid_height;
use crate::{
    ConfigError, HeightLedger, ListOptions, RenderPlan, RenderedItem, ViewportState, Window,
};

/// A headless windowing engine for variable-height lists.
///
/// `HeightList` owns the ordered item identities, the [`HeightLedger`], prefix sums over the
/// effective (measured-or-estimated) heights, and the viewport state. It holds no UI objects:
/// the host feeds it scroll/resize events and post-layout measurements, and reads back a
/// [`RenderPlan`] whenever [`HeightList::take_dirty`] reports a change.
///
/// Lookups and height updates are `O(log n)`; replacing the whole item sequence is `O(n)`.
#[derive(Clone, Debug)]
pub struct HeightList<K> {
    options: ListOptions<K>,
    keys: Vec<K>,
    positions: KeyMap<K, usize>,
    measured: Vec<bool>,
    sums: Fenwick,
    ledger: HeightLedger<K>,
    viewport: ViewportState,
    dirty: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K: ListKey> HeightList<K> {
    /// Creates an empty list.
    ///
    /// Fails if `options` does not pass [`ListOptions::validate`].
    pub fn new(options: ListOptions<K>) -> Result<Self, ConfigError> {
        options.validate()?;
        vlog!(
            debug,
            estimated_item_height = options.estimated_item_height,
            buffer_count = options.buffer_count,
            "HeightList::new"
        );
        Ok(Self {
            keys: Vec::new(),
            positions: KeyMap::new(),
            measured: Vec::new(),
            sums: Fenwick::new(),
            ledger: HeightLedger::new(),
            viewport: ViewportState {
                scroll_offset: options.initial_scroll_offset,
                viewport_height: options.initial_viewport_height,
            },
            dirty: true,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    pub fn options(&self) -> &ListOptions<K> {
        &self.options
    }

    pub fn ledger(&self) -> &HeightLedger<K> {
        &self.ledger
    }

    pub fn estimated_item_height(&self) -> f64 {
        self.options.estimated_item_height
    }

    pub fn buffer_count(&self) -> usize {
        self.options.buffer_count
    }

    pub fn set_buffer_count(&mut self, buffer_count: usize) {
        if self.options.buffer_count == buffer_count {
            return;
        }
        self.options.buffer_count = buffer_count;
        self.mark_changed();
    }

    /// Replaces the estimate used for unmeasured items.
    pub fn set_estimated_item_height(&mut self, height: f64) -> Result<(), ConfigError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(ConfigError::InvalidEstimatedHeight(height));
        }
        if self.options.estimated_item_height == height {
            return Ok(());
        }
        self.options.estimated_item_height = height;
        self.rebuild_heights();
        self.mark_changed();
        Ok(())
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&HeightList<K>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.notify();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// A host typically applies a resize, a scroll offset, and a handful of measurements per
    /// frame; batching turns those into one recomputation.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        let out = f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
        out
    }

    /// Whether anything affecting the render plan changed since the last call; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // --- items ---

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Replaces the item sequence.
    ///
    /// Heights follow identities: items already in the ledger keep their measured height
    /// wherever they move to, everything else starts at the estimate. Keys must be unique.
    pub fn set_items(&mut self, keys: impl IntoIterator<Item = K>) {
        let keys: Vec<K> = keys.into_iter().collect();
        if keys == self.keys {
            return;
        }
        self.keys = keys;
        self.positions.clear();
        for (i, key) in self.keys.iter().enumerate() {
            if self.positions.insert(key.clone(), i).is_some() {
                vlog!(warn, index = i, "HeightList::set_items: duplicate item key");
            }
        }
        self.rebuild_heights();
        self.mark_changed();
    }

    /// Appends one item in `O(log n)`.
    pub fn push_item(&mut self, key: K) {
        let index = self.keys.len();
        let (height, measured) = match self.ledger.get(&key) {
            Some(h) => (h, true),
            None => (self.options.estimated_item_height, false),
        };
        vlog!(trace, index, height, measured, "HeightList::push_item");
        if self.positions.insert(key.clone(), index).is_some() {
            vlog!(warn, index, "HeightList::push_item: duplicate item key");
        }
        self.keys.push(key);
        self.measured.push(measured);
        self.sums.push(height);
        self.mark_changed();
    }

    /// Drops items from the end so that at most `len` remain. Ledger entries are kept.
    pub fn truncate_items(&mut self, len: usize) {
        if len >= self.keys.len() {
            return;
        }
        for key in self.keys.drain(len..) {
            self.positions.remove(&key);
        }
        self.measured.truncate(len);
        self.sums.truncate(len);
        self.mark_changed();
    }

    // --- measurement ---

    /// Reports the rendered height of `key`, as measured after layout.
    ///
    /// Returns `true` when the ledger changed. Identical reports and anomalous heights are
    /// no-ops: they neither mark the list dirty nor fire `on_change`.
    pub fn measure(&mut self, key: K, height: f64) -> bool {
        let index = self.positions.get(&key).copied();
        if !self.ledger.set(key, height) {
            return false;
        }
        vlog!(trace, ?index, height, "HeightList::measure");
        if let Some(index) = index {
            self.apply_height(index, height, true);
            self.mark_changed();
        }
        true
    }

    /// Applies several measurements with a single notification; returns how many changed.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (K, f64)>) -> usize {
        self.batch_update(|list| {
            measurements
                .into_iter()
                .filter(|(_, h)| is_valid_height(*h))
                .fold(0usize, |n, (k, h)| n + usize::from(list.measure(k, h)))
        })
    }

    /// Drops the measurement for `key`; the item falls back to the estimate until re-measured.
    pub fn forget(&mut self, key: &K) -> bool {
        if self.ledger.remove(key).is_none() {
            return false;
        }
        if let Some(index) = self.index_of(key) {
            let estimate = self.options.estimated_item_height;
            self.apply_height(index, estimate, false);
            self.mark_changed();
        }
        true
    }

    pub fn reset_measurements(&mut self) {
        if self.ledger.is_empty() {
            return;
        }
        self.ledger.clear();
        self.rebuild_heights();
        self.mark_changed();
    }

    /// Removes ledger entries for identities no longer in the item sequence.
    ///
    /// Returns the number of removed entries. Stale entries are harmless; pruning only bounds
    /// memory for long-lived lists.
    pub fn prune_ledger(&mut self) -> usize {
        let before = self.ledger.len();
        let positions = &self.positions;
        self.ledger.retain(|k| positions.contains_key(k));
        let removed = before - self.ledger.len();
        vlog!(debug, removed, "HeightList::prune_ledger");
        removed
    }

    /// Exports the ledger (e.g. to persist measured heights alongside a conversation).
    pub fn export_ledger(&self) -> Vec<(K, f64)> {
        self.ledger.export()
    }

    /// Replaces the ledger from previously exported entries. Invalid heights are skipped.
    pub fn import_ledger(&mut self, entries: impl IntoIterator<Item = (K, f64)>) {
        self.ledger.clear();
        for (k, h) in entries {
            self.ledger.set(k, h);
        }
        vlog!(debug, entries = self.ledger.len(), "HeightList::import_ledger");
        self.rebuild_heights();
        self.mark_changed();
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// The effective (measured-or-estimated) height of the item at `index`.
    pub fn item_height(&self, index: usize) -> Option<f64> {
        self.sums.get(index)
    }

    /// Absolute offset of the item's top edge.
    pub fn item_start(&self, index: usize) -> Option<f64> {
        (index < self.keys.len()).then(|| self.sums.prefix_sum(index))
    }

    pub fn item_end(&self, index: usize) -> Option<f64> {
        (index < self.keys.len()).then(|| self.sums.prefix_sum(index + 1))
    }

    fn apply_height(&mut self, index: usize, height: f64, measured: bool) {
        self.measured[index] = measured;
        self.sums.set(index, height);
    }

    fn rebuild_heights(&mut self) {
        vlog!(
            debug,
            count = self.keys.len(),
            cached = self.ledger.len(),
            "HeightList::rebuild_heights"
        );
        let estimate = self.options.estimated_item_height;
        let mut heights = Vec::with_capacity(self.keys.len());
        self.measured.clear();
        self.measured.reserve_exact(self.keys.len());
        for key in &self.keys {
            let height = self.ledger.get(key);
            heights.push(height.unwrap_or(estimate));
            self.measured.push(height.is_some());
        }
        self.sums = Fenwick::from_heights(heights);
    }

    // --- viewport ---

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f64 {
        self.viewport.scroll_offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport.viewport_height
    }

    /// `true` once the host has reported a positive viewport height.
    pub fn is_viewport_measured(&self) -> bool {
        self.viewport.viewport_height > 0.0
    }

    /// Applies a scroll offset. The latest write wins; negative offsets are treated as `0`.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        if !offset.is_finite() {
            vlog!(warn, offset, "HeightList::set_scroll_offset: ignoring non-finite offset");
            return;
        }
        let offset = offset.max(0.0);
        if self.viewport.scroll_offset == offset {
            return;
        }
        vlog!(trace, offset, "HeightList::set_scroll_offset");
        self.viewport.scroll_offset = offset;
        self.mark_changed();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: f64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a container resize. Non-finite or negative heights are ignored.
    pub fn set_viewport_height(&mut self, height: f64) {
        if !is_valid_height(height) {
            vlog!(warn, height, "HeightList::set_viewport_height: ignoring invalid height");
            return;
        }
        if self.viewport.viewport_height == height {
            return;
        }
        vlog!(trace, height, "HeightList::set_viewport_height");
        self.viewport.viewport_height = height;
        self.mark_changed();
    }

    pub fn set_viewport(&mut self, viewport: ViewportState) {
        self.batch_update(|list| {
            list.set_viewport_height(viewport.viewport_height);
            list.set_scroll_offset(viewport.scroll_offset);
        });
    }

    // --- derived values ---

    /// Sum of every item's effective height.
    pub fn total_height(&self) -> f64 {
        self.sums.total()
    }

    /// The largest offset that still fills the viewport (`0` when everything fits).
    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_height() - self.viewport.viewport_height).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        if !offset.is_finite() {
            return self.viewport.scroll_offset;
        }
        offset.clamp(0.0, self.max_scroll_offset())
    }

    /// Distance between the viewport's bottom edge and the end of the content.
    pub fn distance_to_bottom(&self) -> f64 {
        (self.total_height() - self.viewport.bottom()).max(0.0)
    }

    /// `true` when the viewport's bottom edge is within `tolerance` of the end of the content.
    pub fn is_at_bottom(&self, tolerance: f64) -> bool {
        self.distance_to_bottom() <= tolerance.max(0.0)
    }

    /// The window for the current viewport state.
    pub fn window(&self) -> Window {
        self.window_for(self.viewport.scroll_offset, self.viewport.viewport_height)
    }

    /// Computes the window for an arbitrary scroll offset and viewport height.
    ///
    /// The start anchor is the first item whose running total reaches `scroll_offset`; the end
    /// anchor is the first item whose running total reaches the viewport's bottom edge. Both are
    /// widened by `buffer_count` and clamped to `[0, len]`.
    pub fn window_for(&self, scroll_offset: f64, viewport_height: f64) -> Window {
        let count = self.keys.len();
        if count == 0 {
            return Window::EMPTY;
        }
        let scroll = sanitize(scroll_offset);
        let view = sanitize(viewport_height);
        let buffer = self.options.buffer_count;

        let anchor = self.sums.count_below(scroll).min(count - 1);
        let start_index = anchor.saturating_sub(buffer);

        let end_anchor = self.sums.count_below(scroll + view);
        let end_index = if end_anchor >= count {
            count
        } else {
            end_anchor.saturating_add(1).saturating_add(buffer).min(count)
        };

        Window {
            start_index,
            end_index,
            total_height: self.sums.total(),
        }
    }

    /// Cumulative height of every item before `start_index`.
    pub fn offset_top(&self, start_index: usize) -> f64 {
        self.sums.prefix_sum(start_index)
    }

    /// The window plus the translation for its first item.
    pub fn render_plan(&self) -> RenderPlan {
        let w = self.window();
        RenderPlan {
            start_index: w.start_index,
            end_index: w.end_index,
            offset_top: self.offset_top(w.start_index),
            total_height: w.total_height,
        }
    }

    /// Visits the items of the current window in order.
    pub fn for_each_rendered_item(&self, mut f: impl FnMut(RenderedItem<K>)) {
        let w = self.window();
        if w.is_empty() {
            return;
        }
        for i in w.start_index..w.end_index {
            f(RenderedItem {
                key: self.keys[i].clone(),
                index: i,
                start: self.sums.prefix_sum(i),
                height: self.sums.get(i).unwrap_or(0.0),
                measured: self.measured[i],
            });
        }
    }

    /// Collects the current window's items into `out` (clears `out` first).
    pub fn collect_rendered_items(&self, out: &mut Vec<RenderedItem<K>>) {
        out.clear();
        self.for_each_rendered_item(|it| out.push(it));
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
