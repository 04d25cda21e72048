/// A time-based interpolation of the scroll offset, sampled by the host's frame clock.
///
/// The controller uses one tween per smooth scroll-to-bottom. Because the bottom keeps moving
/// while a reply streams in, the destination is not fixed: [`Tween::retarget`] swaps it for a
/// new one without a visible jump.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    /// Never zero; a zero duration is stored as `1` and completes on the next millisecond.
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Milliseconds left until the tween lands on `to`.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        self.duration_ms.saturating_sub(elapsed)
    }

    /// The offset at `now_ms`. Exactly `to` once done, never negative.
    pub fn sample(&self, now_ms: u64) -> f64 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let eased = self.easing.sample(self.progress(now_ms));
        (self.from + (self.to - self.from) * eased).max(0.0)
    }

    /// Heads for `new_to` from wherever the tween is at `now_ms`.
    ///
    /// The clock restarts at `now_ms` and runs for `duration_ms`; pass
    /// [`Tween::remaining_ms`] to keep the original landing time when chasing a moving bottom.
    pub fn retarget(&mut self, now_ms: u64, new_to: f64, duration_ms: u64) {
        let here = self.sample(now_ms);
        *self = Self::new(here, new_to, now_ms, duration_ms, self.easing);
    }
}

/// Easing curves over `t` in `[0, 1]`; each maps `0` to `0` and `1` to `1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic if t < 0.5 => 4.0 * t * t * t,
            Self::EaseInOutCubic => {
                let u = 2.0 - 2.0 * t;
                1.0 - u * u * u / 2.0
            }
        }
    }
}
