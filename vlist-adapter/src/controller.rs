use alloc::vec::Vec;

use vlist::{ConfigError, HeightList, ListKey, ListOptions, RenderPlan};

use crate::autoscroll::{Autoscroll, FeedSnapshot, ScrollBehavior, ScrollToBottom};
use crate::feed::{FeedItem, MeasureLayout};
use crate::tween::{Easing, Tween};

/// Identifies one mount of the scroll container.
///
/// Deferred work is tagged with the handle that was live when it was scheduled and is dropped if
/// the container has since been unmounted or remounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MountHandle(u64);

impl MountHandle {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Tuning for [`Controller`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerOptions {
    /// Duration of smooth scroll-to-bottom animations.
    pub smooth_scroll_ms: u64,
    pub easing: Easing,
    /// Behavior of scrolls triggered by new items.
    pub autoscroll: ScrollBehavior,
    /// See [`Autoscroll::with_stick_threshold`].
    pub stick_threshold: Option<f64>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            smooth_scroll_ms: 300,
            easing: Easing::SmoothStep,
            autoscroll: ScrollBehavior::Smooth,
            stick_threshold: None,
        }
    }
}

/// Outcome of [`Controller::after_layout`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPass {
    /// Number of rendered items whose recorded height changed.
    pub measured: usize,
    /// Offset the host must apply to its scroll container right away (instant scrolls).
    pub scroll_to: Option<f64>,
    /// A smooth scroll is in flight; keep calling [`Controller::tick`].
    pub animating: bool,
    /// State changed since the last [`Controller::poll_render`]; render again.
    pub needs_render: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingScroll {
    mount: MountHandle,
    behavior: ScrollBehavior,
}

/// A framework-neutral controller that wraps a [`HeightList`] and drives the measurement
/// feedback loop for a scroll container.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `mount` / `unmount` when the scroll container is attached or detached
/// - `on_resize` / `on_scroll` when UI events occur
/// - `sync_items` whenever the item sequence changes
/// - `after_layout` once layout for the current render has been committed
/// - `tick(now_ms)` each frame while a smooth scroll is animating
///
/// Scrolls to the bottom are never applied when requested. They are deferred to the next
/// `after_layout`, after fresh measurements were recorded, so the target reflects the real
/// height of the item that triggered them.
#[derive(Clone, Debug)]
pub struct Controller<K> {
    list: HeightList<K>,
    options: ControllerOptions,
    autoscroll: Autoscroll,
    mount: Option<MountHandle>,
    generation: u64,
    pending: Option<PendingScroll>,
    tween: Option<Tween>,
}

impl<K: ListKey> Controller<K> {
    pub fn new(list_options: ListOptions<K>, options: ControllerOptions) -> Result<Self, ConfigError> {
        Ok(Self::from_list(HeightList::new(list_options)?, options))
    }

    pub fn from_list(list: HeightList<K>, options: ControllerOptions) -> Self {
        let autoscroll =
            Autoscroll::new(options.autoscroll).with_stick_threshold(options.stick_threshold);
        Self {
            list,
            options,
            autoscroll,
            mount: None,
            generation: 0,
            pending: None,
            tween: None,
        }
    }

    pub fn list(&self) -> &HeightList<K> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut HeightList<K> {
        &mut self.list
    }

    pub fn into_list(self) -> HeightList<K> {
        self.list
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn autoscroll(&self) -> &Autoscroll {
        &self.autoscroll
    }

    // --- mount lifecycle ---

    /// Attaches a scroll container of the given height and returns its handle.
    pub fn mount(&mut self, viewport_height: f64) -> MountHandle {
        self.generation += 1;
        let handle = MountHandle(self.generation);
        vlog!(debug, generation = handle.0, viewport_height, "Controller::mount");
        self.mount = Some(handle);
        self.list.set_viewport_height(viewport_height);
        handle
    }

    /// Detaches the scroll container. Pending scrolls become no-ops and animations stop.
    pub fn unmount(&mut self) {
        vlog!(debug, "Controller::unmount");
        self.mount = None;
        self.cancel_animation();
    }

    pub fn mount_handle(&self) -> Option<MountHandle> {
        self.mount
    }

    pub fn is_live(&self, handle: MountHandle) -> bool {
        self.mount == Some(handle)
    }

    // --- UI events ---

    pub fn on_resize(&mut self, viewport_height: f64) {
        self.list.set_viewport_height(viewport_height);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any active animation, unless the offset is the echo of the one the
    /// animation just applied.
    pub fn on_scroll(&mut self, offset: f64) {
        if self.tween.is_some() && offset == self.list.scroll_offset() {
            return;
        }
        self.cancel_animation();
        self.list.set_scroll_offset(offset);
    }

    /// Replaces the item sequence and evaluates autoscroll.
    ///
    /// Appending to the previous sequence takes a fast path that keeps prefix sums intact.
    /// Returns the scroll that was scheduled, if any.
    pub fn sync_items<T: FeedItem<Key = K>>(&mut self, items: &[T]) -> Option<ScrollToBottom> {
        let distance_to_bottom = self.list.distance_to_bottom();
        let known = self.list.len();
        let appended = items.len() >= known
            && self
                .list
                .keys()
                .iter()
                .zip(items)
                .all(|(k, item)| k == item.key());

        if appended {
            self.list.batch_update(|list| {
                for item in &items[known..] {
                    list.push_item(item.key().clone());
                }
            });
        } else {
            self.list.set_items(items.iter().map(|item| item.key().clone()));
        }

        let snapshot = FeedSnapshot {
            len: items.len(),
            last_origin: items.last().map(|item| item.origin()),
            total_height: self.list.total_height(),
            viewport_height: self.list.viewport_height(),
            distance_to_bottom,
        };
        let command = self.autoscroll.observe(&snapshot)?;
        self.schedule(command.behavior).then_some(command)
    }

    /// Requests a scroll to the end of the content on the next [`Self::after_layout`].
    ///
    /// Returns `false` (and does nothing) when no container is mounted.
    pub fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) -> bool {
        self.schedule(behavior)
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending.is_some()
    }

    fn schedule(&mut self, behavior: ScrollBehavior) -> bool {
        let Some(mount) = self.mount else {
            vlog!(debug, "Controller: no container mounted; scroll ignored");
            return false;
        };
        self.pending = Some(PendingScroll { mount, behavior });
        true
    }

    // --- rendering ---

    pub fn render_plan(&self) -> RenderPlan {
        self.list.render_plan()
    }

    /// Returns a fresh plan if anything changed since the previous poll.
    pub fn poll_render(&mut self) -> Option<RenderPlan> {
        self.list.take_dirty().then(|| self.list.render_plan())
    }

    /// Records a height reported by the host for one item.
    pub fn report_height(&mut self, key: K, height: f64) -> bool {
        self.list.measure(key, height)
    }

    /// Runs the post-layout phase: measures every item of the current window through `layout`,
    /// then applies the pending scroll, if it still belongs to the live mount.
    pub fn after_layout(&mut self, layout: &mut impl MeasureLayout<K>, now_ms: u64) -> LayoutPass {
        let Some(mount) = self.mount else {
            if self.pending.take().is_some() {
                vlog!(debug, "Controller::after_layout: unmounted; dropping pending scroll");
            }
            return LayoutPass::default();
        };

        let mut rendered = Vec::new();
        self.list.for_each_rendered_item(|item| rendered.push(item.key));
        let measured = self.list.measure_many(
            rendered
                .into_iter()
                .filter_map(|key| layout.measure(&key).map(|h| (key, h))),
        );
        vlog!(trace, measured, "Controller::after_layout");

        let mut pass = LayoutPass {
            measured,
            ..LayoutPass::default()
        };
        if let Some(pending) = self.pending.take() {
            if pending.mount != mount {
                vlog!(debug, "Controller::after_layout: scroll belongs to a previous mount");
            } else if !self.list.is_viewport_measured() {
                vlog!(debug, "Controller::after_layout: viewport not measured; scroll ignored");
            } else {
                pass.scroll_to = self.apply_scroll_to_bottom(pending.behavior, now_ms);
            }
        }
        pass.animating = self.is_animating();
        pass.needs_render = self.list.is_dirty();
        pass
    }

    fn apply_scroll_to_bottom(&mut self, behavior: ScrollBehavior, now_ms: u64) -> Option<f64> {
        let target = self.list.max_scroll_offset();
        match behavior {
            ScrollBehavior::Instant => {
                self.cancel_animation();
                self.list.set_scroll_offset(target);
                Some(self.list.scroll_offset())
            }
            ScrollBehavior::Smooth => {
                let from = match self.tween {
                    Some(tween) => tween.sample(now_ms),
                    None => self.list.scroll_offset(),
                };
                self.tween = Some(Tween::new(
                    from,
                    target,
                    now_ms,
                    self.options.smooth_scroll_ms,
                    self.options.easing,
                ));
                None
            }
        }
    }

    // --- animation ---

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Advances the smooth scroll, if any, and returns the offset to apply.
    ///
    /// The animation heads for the bottom as it is *now*: if content grew or shrank since it
    /// started, it is retargeted without extending its deadline.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let mut tween = self.tween?;

        let bottom = self.list.max_scroll_offset();
        if tween.to != bottom {
            let remaining = tween.remaining_ms(now_ms);
            tween.retarget(now_ms, bottom, remaining);
        }

        self.list.set_scroll_offset_clamped(tween.sample(now_ms));
        self.tween = (!tween.is_done(now_ms)).then_some(tween);
        Some(self.list.scroll_offset())
    }
}
