use crate::feed::Origin;

/// How a scroll-to-bottom should be applied by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// A request to bring the end of the content into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToBottom {
    pub behavior: ScrollBehavior,
}

/// What the feed looks like right after an update, as seen by [`Autoscroll::observe`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedSnapshot {
    pub len: usize,
    /// Origin of the last item, if any.
    pub last_origin: Option<Origin>,
    pub total_height: f64,
    pub viewport_height: f64,
    /// Distance from the viewport's bottom edge to the end of the content *before* the update.
    pub distance_to_bottom: f64,
}

/// Decides when an update to the feed should follow the newest item.
///
/// Fires only when the item count grew since the previous observation, and then only if the
/// newest item was not produced by the user or all content fits in the viewport. In-place
/// updates (streamed text growing the last item) never fire.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Autoscroll {
    prev_len: usize,
    behavior: ScrollBehavior,
    stick_threshold: Option<f64>,
}

impl Autoscroll {
    pub fn new(behavior: ScrollBehavior) -> Self {
        Self {
            prev_len: 0,
            behavior,
            stick_threshold: None,
        }
    }

    /// Additionally require the reader to have been within `threshold` of the bottom before the
    /// update. Overflowing content scrolled further up is then left alone.
    pub fn with_stick_threshold(mut self, threshold: Option<f64>) -> Self {
        self.stick_threshold = threshold.filter(|t| t.is_finite()).map(|t| t.max(0.0));
        self
    }

    pub fn behavior(&self) -> ScrollBehavior {
        self.behavior
    }

    pub fn stick_threshold(&self) -> Option<f64> {
        self.stick_threshold
    }

    /// The length seen by the previous observation.
    pub fn prev_len(&self) -> usize {
        self.prev_len
    }

    /// Forgets the previous length, so the next non-empty observation counts as growth.
    pub fn reset(&mut self) {
        self.prev_len = 0;
    }

    pub fn observe(&mut self, snapshot: &FeedSnapshot) -> Option<ScrollToBottom> {
        let grew = snapshot.len > self.prev_len;
        self.prev_len = snapshot.len;
        if !grew {
            return None;
        }

        let fits = snapshot.total_height <= snapshot.viewport_height;
        let follows = fits || snapshot.last_origin.is_some_and(|o| !o.is_user());
        if !follows {
            vlog!(trace, len = snapshot.len, "Autoscroll::observe: newest item is from the user");
            return None;
        }
        let away = self
            .stick_threshold
            .is_some_and(|t| !fits && snapshot.distance_to_bottom > t);
        if away {
            vlog!(
                trace,
                distance = snapshot.distance_to_bottom,
                "Autoscroll::observe: reader is away from the bottom"
            );
            return None;
        }
        Some(ScrollToBottom {
            behavior: self.behavior,
        })
    }
}
